//! yt-dlp-backed resolver.
//!
//! Shells out to the yt-dlp binary in metadata-only mode. One JSON
//! document comes back per invocation (`-J`), with playlist members
//! inlined as entries; `--ignore-errors` turns unavailable members into
//! null placeholders instead of failing the whole run.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::process::run_with_timeout;
use crate::extract::resolver::{RawInfo, Resolve, ResolveError};

/// Resolver backed by the yt-dlp binary named in [`config::YTDL_BIN`].
#[derive(Debug, Default)]
pub struct YtdlpResolver;

impl YtdlpResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolve for YtdlpResolver {
    async fn resolve(&self, url: &str, cookies: Option<&Path>) -> Result<RawInfo, ResolveError> {
        let ytdl_bin = &*config::YTDL_BIN;

        log::info!("Resolving metadata for {}", url);

        let mut cmd = Command::new(ytdl_bin);
        cmd.args([
            "-J",
            "--skip-download",
            "--no-warnings",
            "--ignore-errors",
            "--socket-timeout",
        ])
        .arg(config::extract::SOCKET_TIMEOUT_SECS.to_string());

        if let Some(path) = cookies {
            cmd.arg("--cookies").arg(path);
        }

        cmd.arg(url).stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = match run_with_timeout(&mut cmd, config::extract::ytdlp_timeout()).await {
            Ok(output) => output,
            Err(AppError::Io(e)) => {
                return Err(ResolveError::Spawn {
                    bin: ytdl_bin.clone(),
                    source: e,
                })
            }
            Err(_) => return Err(ResolveError::Timeout(config::extract::YTDLP_TIMEOUT_SECS)),
        };

        // With --ignore-errors a partially-broken playlist still dumps
        // JSON and exits nonzero; only an empty stdout is a hard failure.
        if output.stdout.is_empty() {
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                log::warn!("yt-dlp failed for {}: {}", url, stderr.lines().next().unwrap_or(""));
                return Err(ResolveError::Failed { stderr });
            }
            return Err(ResolveError::Empty);
        }

        let info: RawInfo = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }
}

/// Returns the installed yt-dlp version string.
///
/// Used as a startup probe so a missing binary is reported once at
/// launch instead of on the first request.
pub async fn ytdlp_version() -> AppResult<String> {
    let mut cmd = Command::new(&*config::YTDL_BIN);
    cmd.arg("--version");

    let output = run_with_timeout(&mut cmd, Duration::from_secs(10)).await?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if version.is_empty() {
        return Err(AppError::Extract(
            "yt-dlp is not installed or --version produced no output".to_string(),
        ));
    }

    Ok(version)
}
