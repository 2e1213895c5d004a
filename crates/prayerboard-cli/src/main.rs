use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prayerboard_core::{AppConfig, MemoryStore, PrayerStore, RestStore};

mod commands;

#[derive(Parser)]
#[command(name = "prayerboard")]
#[command(author, version, about = "A terminal prayer list board")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Print the latest prayer list
    Show {
        /// Only print the cached snapshot, without contacting the backend
        #[arg(long)]
        offline: bool,
        /// Wrap width of the printed list
        #[arg(short = 'w', long, default_value_t = 80)]
        width: u16,
    },
    /// Check this build against the backend's minimum version
    CheckVersion,
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let dir = config.data_dir();
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("prayerboard.log"))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

/// Hosted backend when configured, the bundled sample otherwise
fn build_store(config: &AppConfig) -> Result<Arc<dyn PrayerStore>> {
    if config.backend.base_url.is_some() {
        Ok(Arc::new(RestStore::new(&config.backend)?))
    } else {
        tracing::info!("No backend configured, using the sample list");
        Ok(Arc::new(MemoryStore::with_sample()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let runs_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, runs_tui)?;

    let store = build_store(&config)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, store).await,
        Some(Commands::Show { offline, width }) => {
            commands::show::run(&config, store.as_ref(), offline, width).await
        }
        Some(Commands::CheckVersion) => commands::version::run(&config, store.as_ref()).await,
    }
}
