//! Process execution utilities with timeout support
//!
//! Provides a helper for running the external yt-dlp binary with a
//! configurable timeout to prevent hung processes from blocking requests.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::core::error::AppError;

/// Run an async Command with a timeout.
///
/// Returns the process Output on success, or an AppError on timeout/IO failure.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, AppError> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(AppError::Io(e)),
        Err(_) => Err(AppError::Extract(format!(
            "Process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
