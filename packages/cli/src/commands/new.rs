use super::Context;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use ienet_document::{slugify, PageData};
use ienet_editor::{Builder, PageStore, StoreError};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page title
    pub title: String,

    /// Page id (defaults to the slug)
    #[arg(long)]
    pub id: Option<String>,

    /// Library templates to append, in order
    #[arg(short, long = "template")]
    pub templates: Vec<String>,

    /// Force overwrite an existing page
    #[arg(short, long)]
    pub force: bool,
}

pub async fn new_page(args: NewArgs, ctx: &Context) -> Result<()> {
    let slug = slugify(&args.title);
    if slug.is_empty() {
        bail!("Title '{}' does not produce a usable slug", args.title);
    }
    let id = args.id.unwrap_or_else(|| slug.clone());

    match ctx.store.load_page(&id).await {
        Ok(_) if !args.force => {
            println!("{} Page {} already exists", "⚠️".yellow(), id.bright_white());
            println!("Use --force to overwrite");
            return Ok(());
        }
        Ok(_) => {}
        Err(StoreError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    println!("{}", format!("📝 Creating page {}...", id).bright_blue().bold());

    let mut builder = Builder::with_options(
        PageData::new(id.clone(), args.title.clone()),
        ctx.config.builder_options(),
    );

    for template in &args.templates {
        builder.add_from_library(template, None, None)?;
        println!("  {} Added {}", "✓".green(), template);
    }

    builder.save(&ctx.store).await?;

    let path = ctx.store.page_path(&id)?;
    println!("  {} Saved {}", "✓".green(), path.display());
    println!();
    println!("{}", "✅ Page created!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: ienet tree {}", id);
    println!("  2. Run: ienet seo {}", id);

    Ok(())
}
