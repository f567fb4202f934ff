mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    library, new_page, seo, style, tree, Context, LibraryArgs, NewArgs, SeoArgs, StyleArgs,
    TreeArgs,
};
use config::Config;
use std::path::PathBuf;

/// IeNet CLI - page builder tooling
#[derive(Parser, Debug)]
#[command(name = "ienet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page store directory (overrides the config file)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a page from library templates
    New(NewArgs),

    /// Print a page's element tree
    Tree(TreeArgs),

    /// Score page metadata for search engines
    Seo(SeoArgs),

    /// Resolve an element's style at a breakpoint
    Style(StyleArgs),

    /// List component library templates
    Library(LibraryArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::load(&cwd)?;
    if let Some(store_dir) = cli.store_dir {
        config.store_dir = store_dir.display().to_string();
    }

    let ctx = Context {
        store: config.store(&cwd),
        config,
        cwd,
    };

    match cli.command {
        Command::New(args) => new_page(args, &ctx).await,
        Command::Tree(args) => tree(args, &ctx).await,
        Command::Seo(args) => seo(args, &ctx).await,
        Command::Style(args) => style(args, &ctx).await,
        Command::Library(args) => library(args),
    }
}
