use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ienet_document::PageElement;
use ienet_editor::Builder;

const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page id
    pub page_id: String,

    /// Print the stored JSON instead
    #[arg(long)]
    pub json: bool,
}

pub async fn tree(args: TreeArgs, ctx: &Context) -> Result<()> {
    let builder = Builder::load(&ctx.store, &args.page_id, ctx.config.builder_options()).await?;
    let page = builder.page();

    if args.json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        page.title.bright_white().bold(),
        format!("/{}", page.slug).dimmed(),
        format!("({} elements)", page.element_count()).dimmed()
    );

    if page.elements.is_empty() {
        println!("  {}", "(empty)".dimmed());
    }
    for element in &page.elements {
        print_element(element, 1);
    }

    Ok(())
}

fn print_element(element: &PageElement, depth: usize) {
    let indent = "  ".repeat(depth);
    let preview = element
        .content
        .as_deref()
        .map(|content| format!(" \"{}\"", truncate(content, PREVIEW_CHARS)))
        .unwrap_or_default();

    println!(
        "{}{} {}{}",
        indent,
        element.element_type.as_str().cyan(),
        element.id.dimmed(),
        preview
    );

    for child in &element.children {
        print_element(child, depth + 1);
    }
}

fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a\nb", 10), "a b");
        assert_eq!(truncate("abcdefghij", 4), "abcd…");
    }
}
