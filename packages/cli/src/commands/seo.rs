use super::Context;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use ienet_editor::{Builder, EditorError, StoreError};
use ienet_seo::{Grade, IssueLevel, SeoReport};
use std::path::Path;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct SeoArgs {
    /// Page id to score
    pub page_id: Option<String>,

    /// Score every page in the store
    #[arg(short, long, conflicts_with = "page_id")]
    pub all: bool,

    /// Show info-level issues too
    #[arg(short, long)]
    pub info: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub async fn seo(args: SeoArgs, ctx: &Context) -> Result<()> {
    let page_ids = match (&args.page_id, args.all) {
        (Some(id), _) => vec![id.clone()],
        (None, true) => find_page_ids(&ctx.config.store_path(&ctx.cwd)),
        (None, false) => bail!("Pass a page id or --all"),
    };

    if page_ids.is_empty() {
        println!("{} No pages found", "⚠️".yellow());
        return Ok(());
    }

    let mut reports = Vec::new();
    for id in page_ids {
        match Builder::load(&ctx.store, &id, ctx.config.builder_options()).await {
            Ok(builder) => reports.push((id, builder.seo_report())),
            // a stray json file that is not a page
            Err(EditorError::Persistence(StoreError::Serde(e))) if args.all => {
                eprintln!("{} Skipping {}: {}", "✗".red(), id, e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if args.format == "json" {
        let json: Vec<_> = reports
            .iter()
            .map(|(id, report)| serde_json::json!({ "page": id, "report": report }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for (id, report) in &reports {
        print_report(id, report, args.info);
    }

    if reports.len() > 1 {
        let average = reports.iter().map(|(_, r)| r.score).sum::<u32>() / reports.len() as u32;
        println!("   Pages checked: {}", reports.len());
        println!("   Average score: {}", average);
    }

    Ok(())
}

fn print_report(id: &str, report: &SeoReport, show_info: bool) {
    let grade = match report.grade {
        Grade::Good => report.grade.to_string().green().bold(),
        Grade::Fair => report.grade.to_string().yellow().bold(),
        Grade::Poor => report.grade.to_string().red().bold(),
    };
    println!("{}  {}/100 {}", id.bright_white(), report.score, grade);

    for issue in &report.issues {
        if !show_info && issue.level == IssueLevel::Info {
            continue;
        }

        let level = match issue.level {
            IssueLevel::Error => "error".red().bold(),
            IssueLevel::Warning => "warning".yellow().bold(),
            IssueLevel::Info => "info".blue().bold(),
        };
        println!("  {} [{}] {}", level, issue.rule, issue.message);

        if let Some(suggestion) = &issue.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    println!();
}

/// Page ids of every `<id>.json` under the store directory
fn find_page_ids(dir: &Path) -> Vec<String> {
    let mut ids: Vec<String> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| is_page_file(path))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    ids.sort();
    ids
}

fn is_page_file(path: &Path) -> bool {
    path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_page_ids_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("home.json"), "{}").unwrap();
        std::fs::write(dir.path().join("about.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("draft.json.tmp"), "").unwrap();

        assert_eq!(find_page_ids(dir.path()), vec!["about", "home"]);
    }

    #[test]
    fn test_missing_store_dir_has_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_page_ids(&dir.path().join("absent")).is_empty());
    }
}
