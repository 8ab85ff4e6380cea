use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use iris_console::{config, page::Page, tui::App};
use std::{fs::OpenOptions, io, sync::Mutex};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // The terminal owns stdout, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logs.file)
        .with_context(|| format!("Failed to open log file {}", config.logs.file))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&log_level)?)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .json()
        .init();

    info!(
        "Starting iris console against {} with log level: {}",
        config.service.base_url, log_level
    );

    let page = Page::mount(&config)?;
    let mut app = App::new(page);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = app.run().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    info!("Iris console exited");
    result.map_err(Into::into)
}
