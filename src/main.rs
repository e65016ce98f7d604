//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::content::Layout;
use folio::Site;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Check and index the content of a static blog", long_about = None)]
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

    /// Create a new post or page
    New {
        /// Layout to use (post, page)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new document
        title: String,
    },

    /// List site content
    List {
        /// Type of content to list (post, page, tag, category, key)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Validate every document's front matter
    Check {
        /// Re-check on file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Write the content manifest for the renderer
    #[command(alias = "m")]
    Manifest,

    /// Remove the destination folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { layout, title } => {
            let layout: Layout = layout.parse()?;
            let site = Site::new(&base_dir)?;
            let path = site.new_document(&title, layout)?;
            println!("Created {:?}", path);
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Check { watch } => {
            let site = Site::new(&base_dir)?;
            if watch {
                // A failing check is reported, not fatal, while watching
                if let Err(e) = site.check() {
                    println!("❌ {}", e);
                }
                folio::commands::check::watch(&site)?;
            } else {
                let store = site.check()?;
                println!(
                    "✅ {} posts, {} pages",
                    store.posts.len(),
                    store.pages.len()
                );
            }
        }

        Commands::Manifest => {
            let site = Site::new(&base_dir)?;
            let path = site.manifest()?;
            println!("Manifest written to {:?}", path);
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning destination folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
