use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use feed::FeedSimulator;
use ui::{TuiApp, run_headless};
use utils::config::Config;

mod error;
mod feed;
mod generator;
mod types;
mod ui;
mod utils;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::from_path(".env").ok();

    let config = Config::from_env()?;
    init_tracing(&config)?;
    config.print_info();

    let simulator = FeedSimulator::spawn(config.clone());

    if config.headless {
        run_headless(simulator).await?;
    } else {
        let mut app = TuiApp::new(simulator, config.tick_rate())?;
        app.run().await?;
    }

    Ok(())
}

/// Headless runs log to stderr. The TUI owns the terminal, so it only logs when
/// `FEED_LOG_FILE` points somewhere else.
fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if config.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
