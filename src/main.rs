//! CLI entry point for postfeed

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postfeed::commands::render::RenderOptions;

#[derive(Parser)]
#[command(name = "postfeed")]
#[command(version)]
#[command(about = "Post listings for a small static blog", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name for the new post (defaults to the slugified title)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate the home and index pages
    #[command(alias = "g")]
    Generate,

    /// Print a post listing fragment
    #[command(alias = "r")]
    Render {
        /// Read posts from a YAML, JSON or TOML manifest
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Maximum number of posts (defaults to the home page limit)
        #[arg(short, long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Render every post
        #[arg(short, long)]
        all: bool,

        /// Fragment format (html, markdown)
        #[arg(short, long, default_value = "html")]
        format: String,
    },

    /// List posts
    List,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postfeed=debug,info"
    } else {
        "postfeed=info"
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
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            postfeed::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let site = postfeed::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let file = postfeed::commands::new::create_post(&site, &title, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::Generate => {
            let site = postfeed::Site::new(&base_dir)?;
            tracing::info!("Generating listing pages...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Render {
            manifest,
            limit,
            all,
            format,
        } => {
            let site = postfeed::Site::new(&base_dir)?;
            let options = RenderOptions {
                manifest,
                limit,
                all,
                format: format.parse()?,
            };
            let fragment = postfeed::commands::render::run(&site, &options)?;
            print!("{}", fragment);
        }

        Commands::List => {
            let site = postfeed::Site::new(&base_dir)?;
            postfeed::commands::list::run(&site)?;
        }

        Commands::Clean => {
            let site = postfeed::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postfeed version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
