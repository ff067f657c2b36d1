//! CLI entry point for grove

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grove::commands::search::SearchMode;
use grove::content::Category;

#[derive(Parser)]
#[command(name = "grove")]
#[command(version)]
#[command(about = "Browse the posts of a Grove blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Category to list ("all" for every post)
        #[arg(default_value = Category::ALL)]
        category: Category,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Slug of the post (its file name without extension)
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search posts by title, description, excerpt or tag
    Search {
        /// Search text
        query: String,

        /// Match the query as an exact tag
        #[arg(short, long)]
        tag: bool,

        /// Restrict the search to one category
        #[arg(short = 'C', long, default_value = Category::ALL)]
        category: Category,
    },

    /// Show post counts per category and tag
    Stats,

    /// List posts and reload whenever a post changes
    Watch {
        /// Category to list ("all" for every post)
        #[arg(default_value = Category::ALL)]
        category: Category,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "grove=debug,info"
    } else {
        "grove=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let grove = grove::Grove::new(&base_dir)?;
    tracing::debug!("Reading posts from {:?}", grove.posts_dir);
    let cache = grove.post_cache();

    match cli.command {
        Commands::List { category, json } => {
            grove::commands::list::run(&cache, &category, json).await?;
        }

        Commands::Show { slug, json } => {
            grove::commands::show::run(&cache, &slug, json).await?;
        }

        Commands::Search {
            query,
            tag,
            category,
        } => {
            let mode = if tag {
                SearchMode::Tag
            } else {
                SearchMode::Text
            };
            grove::commands::search::run(&cache, &category, &query, mode).await?;
        }

        Commands::Stats => {
            grove::commands::stats::run(&grove.config, &cache).await?;
        }

        Commands::Watch { category } => {
            grove::commands::watch::run(&grove, &cache, &category).await?;
        }
    }

    Ok(())
}
