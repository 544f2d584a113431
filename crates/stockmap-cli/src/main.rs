mod search;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockmap")]
#[command(about = "Search nearby warehouses for in-stock inventory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch inventory and print the result list
    Search {
        /// Access identifier; defaults to the last one that searched successfully
        #[arg(long)]
        user: Option<String>,
        /// Search radius in miles (clamped to 5..=100)
        #[arg(long, default_value_t = 25)]
        radius: u32,
        /// Also write a standalone HTML results page with a map
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Fetch inventory and write the dated KML export
    Export {
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value_t = 25)]
        radius: u32,
        /// Directory the KML file is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the active KML style table as YAML
    Styles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = stockmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search { user, radius, html }) => {
            search::run_search(&config, user.as_deref(), radius, html.as_deref()).await?;
        }
        Some(Commands::Export {
            user,
            radius,
            out_dir,
        }) => {
            search::run_export(&config, user.as_deref(), radius, &out_dir).await?;
        }
        Some(Commands::Styles) => search::run_styles(&config)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
