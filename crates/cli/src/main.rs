use anyhow::Result;
use artpaper_core::{AppConfig, DEFAULT_COMPOSE_MAX, DEFAULT_DOWNLOAD_DELAY_MS, DEFAULT_DOWNLOAD_MAX};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "artpaper")]
#[command(about = "Art catalog downloader and annotated wallpaper generator", long_about = None)]
struct Cli {
    /// JSON config file. Falls back to $ARTPAPER_CONFIG, then built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the Web Gallery of Art catalog into the database
    #[command(alias = "updateDatabase")]
    IngestCatalog,
    /// Download images for records that have none yet
    #[command(alias = "downloadImages")]
    DownloadImages {
        #[arg(short, long, default_value_t = DEFAULT_DOWNLOAD_MAX)]
        max: usize,
        /// Pause between two downloads
        #[arg(short, long, alias = "delayMs", default_value_t = DEFAULT_DOWNLOAD_DELAY_MS)]
        delay_ms: u64,
    },
    /// Compose wallpapers from the most recently downloaded images
    #[command(alias = "createWallpapers")]
    CreateWallpapers {
        #[arg(short, long, default_value_t = DEFAULT_COMPOSE_MAX)]
        max: usize,
    },
    /// Show record counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::IngestCatalog => commands::ingest::run_ingest(&config).await?,
        Commands::DownloadImages { max, delay_ms } => {
            commands::download::run_download(&config, max, delay_ms).await?;
        },
        Commands::CreateWallpapers { max } => commands::wallpapers::run_create_wallpapers(&config, max).await?,
        Commands::Status => commands::status::run_status(&config)?,
    }

    Ok(())
}
