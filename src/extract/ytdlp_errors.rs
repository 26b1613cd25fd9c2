//! yt-dlp failure analysis.
//!
//! Maps extractor stderr to a failure kind and a user-facing reason
//! string. Reasons end up inline in the UI, so they name what the user
//! can do (upload cookies, retry) instead of echoing a stack trace.

use crate::extract::resolver::ResolveError;

/// Failure kinds recognizable from yt-dlp stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Sign-in / bot challenge; fresh cookies usually fix it
    SignInRequired,
    /// Content is private, removed, or region-blocked
    Unavailable,
    /// Timeouts, DNS, connection resets
    Network,
    /// Anything else
    Unknown,
}

/// Determines the failure kind from yt-dlp stderr text.
pub fn classify_stderr(stderr: &str) -> FailureKind {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("sign in to confirm")
        || stderr_lower.contains("please sign in")
        || stderr_lower.contains("cookies are no longer valid")
        || stderr_lower.contains("cookies have likely been rotated")
        || stderr_lower.contains("use --cookies")
        || stderr_lower.contains("bot detection")
    {
        return FailureKind::SignInRequired;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("this video is not available")
        || stderr_lower.contains("video has been removed")
        || stderr_lower.contains("this video does not exist")
        || stderr_lower.contains("blocked in your country")
        || stderr_lower.contains("who has blocked it")
    {
        return FailureKind::Unavailable;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("failed to connect")
        || stderr_lower.contains("temporary failure in name resolution")
    {
        return FailureKind::Network;
    }

    FailureKind::Unknown
}

/// Builds the user-facing reason for a resolution failure.
///
/// Classified causes get an actionable message; unclassified ones keep
/// a trimmed slice of the raw error text for diagnosis.
pub fn unavailable_reason(err: &ResolveError) -> String {
    match err {
        ResolveError::Failed { stderr } => match classify_stderr(stderr) {
            FailureKind::SignInRequired => {
                "Sign-in required: the source is asking to confirm you are not a bot. Upload fresh cookies and try again."
                    .to_string()
            }
            FailureKind::Unavailable => {
                "Video unavailable: it may be private, removed, or blocked in your region.".to_string()
            }
            FailureKind::Network => {
                "Network problem while contacting the source. Try again in a minute.".to_string()
            }
            FailureKind::Unknown => format!("Could not extract info: {}", error_excerpt(stderr)),
        },
        ResolveError::Timeout(secs) => format!(
            "Extraction timed out after {}s. The source may be slow or unreachable; try again.",
            secs
        ),
        ResolveError::Empty => "No info returned (maybe all items are unavailable)".to_string(),
        other => format!("Could not extract info: {}", other),
    }
}

/// First meaningful line of stderr, bounded so reasons stay terse.
fn error_excerpt(stderr: &str) -> String {
    let line = stderr
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| stderr.lines().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("unknown error");

    line.chars().take(200).collect()
}
