//! CLI entry point for the mehandi backend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mehandi::config::Settings;
use mehandi::http;
use mehandi::store::{ConfigStore, StorageLayout};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(
    name = "mehandi",
    version,
    about = "Backend API for a mehandi studio gallery and booking site"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server.
    Serve {
        /// Port to listen on (overrides settings file and PORT).
        #[arg(long)]
        port: Option<u16>,
        /// Storage base directory holding data/ and uploads/.
        #[arg(long)]
        base_dir: Option<PathBuf>,
        /// Settings file (defaults to mehandi.toml when present).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Rotate the admin access token in the local config file.
    RotateToken {
        /// New token, at least 4 characters.
        new_token: String,
        /// Storage base directory holding data/ and uploads/.
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            base_dir,
            config,
        } => {
            let mut settings = Settings::load(config.as_deref())?;
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(base_dir) = base_dir {
                settings.base_dir = base_dir;
            }

            let validation = settings.validate()?;
            for warning in &validation.warnings {
                tracing::warn!("{warning}");
            }

            http::serve(settings).await
        }
        Commands::RotateToken {
            new_token,
            base_dir,
        } => {
            let mut settings = Settings::load(None)?;
            if let Some(base_dir) = base_dir {
                settings.base_dir = base_dir;
            }
            let layout = StorageLayout::resolve(&settings.base_dir, settings.ephemeral);
            ConfigStore::new(&layout)
                .rotate(&new_token)
                .await
                .context("failed to rotate admin token (has the server been bootstrapped?)")?;
            println!("Admin access token updated.");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if matches!(std::env::var("LOG_FORMAT").ok().as_deref(), Some("json")) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
