use super::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use ienet_document::{Breakpoint, StyleMap};
use ienet_editor::{viewport_width, Builder};

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Page id
    pub page_id: String,

    /// Element id
    pub element_id: String,

    /// Breakpoint to resolve at (desktop, tablet, mobile); defaults to the config's
    #[arg(short, long)]
    pub breakpoint: Option<Breakpoint>,

    /// Also print the preview canvas style
    #[arg(long)]
    pub canvas: bool,
}

pub async fn style(args: StyleArgs, ctx: &Context) -> Result<()> {
    let mut builder = Builder::load(&ctx.store, &args.page_id, ctx.config.builder_options()).await?;
    if let Some(breakpoint) = args.breakpoint {
        builder.set_breakpoint(breakpoint);
    }

    let element = builder
        .find_element(&args.element_id)
        .ok_or_else(|| anyhow!("Element not found: {}", args.element_id))?;
    let resolved = builder
        .resolved_style(&args.element_id)
        .unwrap_or_default();

    println!(
        "{} {} @ {} ({}px)",
        element.element_type.as_str().cyan(),
        element.id.bright_white(),
        builder.breakpoint().as_str().bold(),
        viewport_width(builder.breakpoint())
    );
    print_style(&resolved);

    if args.canvas {
        println!();
        println!("{}", "canvas".cyan());
        print_style(&builder.canvas_style());
    }

    Ok(())
}

fn print_style(style: &StyleMap) {
    if style.is_empty() {
        println!("  {}", "(no styles)".dimmed());
    }
    for (property, value) in style {
        println!("  {}: {}", property.bright_white(), value);
    }
}
