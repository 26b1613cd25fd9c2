//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Cookies configuration validation and logging

use anyhow::Result;
use simplelog::*;
use std::fs::File;
use std::path::Path;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs cookies configuration at application startup
///
/// Restricted content (age-gated, members-only, bot-challenged) can only
/// be resolved when a cookies file is available, so make its state
/// visible up front instead of surfacing it request by request.
pub fn log_cookies_configuration() {
    let cookies_file = config::COOKIES_FILE.as_str();

    if Path::new(cookies_file).exists() {
        log::info!("Cookies file: {} (will be passed to yt-dlp)", cookies_file);
    } else {
        log::warn!(
            "Cookies file {} not found - restricted content will be unavailable until one is uploaded via /upload_cookies",
            cookies_file
        );
    }
}
