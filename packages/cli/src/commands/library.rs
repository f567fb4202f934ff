use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use ienet_editor::{Category, ComponentLibrary, ComponentTemplate};

#[derive(Debug, Args)]
pub struct LibraryArgs {
    /// Only list one category (basic, layout, components, forms, pro)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Filter by name or description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn library(args: LibraryArgs) -> Result<()> {
    let library = ComponentLibrary::new();

    let category = args
        .category
        .as_deref()
        .map(|name| Category::parse(name).ok_or_else(|| anyhow!("Unknown category: {}", name)))
        .transpose()?;

    let matches = select(&library, category, args.search.as_deref());

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("{}", "No templates match".yellow());
        return Ok(());
    }

    for category in Category::ALL {
        let entries: Vec<_> = matches.iter().filter(|t| t.category == category).collect();
        if entries.is_empty() {
            continue;
        }

        println!("{}", category.as_str().bright_blue().bold());
        for entry in entries {
            let pro = if entry.is_pro { " PRO".magenta().bold() } else { "".normal() };
            println!(
                "  {:<20} {}{}",
                entry.id.bright_white(),
                entry.description.dimmed(),
                pro
            );
        }
        println!();
    }

    Ok(())
}

fn select<'a>(
    library: &'a ComponentLibrary,
    category: Option<Category>,
    search: Option<&str>,
) -> Vec<&'a ComponentTemplate> {
    let found: Vec<&ComponentTemplate> = match search {
        Some(query) => library.search(query).collect(),
        None => library.templates().iter().collect(),
    };
    found
        .into_iter()
        .filter(|template| category.map_or(true, |c| template.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_category_and_search() {
        let library = ComponentLibrary::new();

        let forms = select(&library, Some(Category::Forms), None);
        assert!(!forms.is_empty());
        assert!(forms.iter().all(|t| t.category == Category::Forms));

        let grids = select(&library, Some(Category::Layout), Some("grid"));
        assert!(grids.iter().any(|t| t.id == "grid-2col"));
        assert!(select(&library, Some(Category::Basic), Some("grid")).is_empty());
    }
}
