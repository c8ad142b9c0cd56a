use std::process::ExitCode;

use anyhow::{Context, Result};
use glowcart_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use glowcart_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}

fn logging_config() -> Result<AppConfig> {
    AppConfig::load(LoadOptions::default()).context("logging disabled: could not load config")
}

fn main() -> ExitCode {
    // Stdout carries command payloads, so logs go to stderr. A bad config is
    // reported again by the command itself.
    match logging_config() {
        Ok(config) => init_logging(&config),
        Err(error) => eprintln!("{error:#}"),
    }

    glowcart_cli::run()
}
