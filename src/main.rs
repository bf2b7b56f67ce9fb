// TikTunes - TikTok Song Extractor
// One binary, two faces: a full-screen terminal UI for poking around and a
// one-shot batch mode for scripting

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tiktunes::cli::{self, Args};
use tiktunes::Config;

fn init_logging(dev: bool) -> Result<()> {
    // Create logs directory in project root
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(&log_dir, "tiktunes.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    // Base filter: info level for general logs, debug for tiktunes
    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tiktunes=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(base_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if dev {
        eprintln!("🔧 Dev mode: logging to logs/tiktunes.log");
    }

    // Prevent the guard from being dropped
    std::mem::forget(_guard);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.dev)?;
    info!("🎵 TikTunes starting up");

    // A profile argument means batch mode; no arguments opens the shell
    if let Some(profile) = &args.profile {
        return cli::run_batch(profile, args.max_videos);
    }

    let config = Config::load()?;
    run_interactive(config).await
}

#[cfg(feature = "tui")]
async fn run_interactive(config: Config) -> Result<()> {
    let mut app = tiktunes::ui::App::new(config)?;
    app.run().await
}

#[cfg(not(feature = "tui"))]
async fn run_interactive(_config: Config) -> Result<()> {
    anyhow::bail!("built without the `tui` feature - pass a username or URL for batch mode")
}
