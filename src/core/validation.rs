//! User-input validation utilities
//!
//! Provides security-focused validation for user inputs:
//! - Media URL validation (scheme + length checks before anything is spawned)
//! - Title sanitization (ASCII-safe attachment filenames for HTTP headers)

use thiserror::Error;
use url::Url;

use crate::core::config;

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing URL
    #[error("URL is required")]
    MissingUrl,

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Validates that a URL is a plausible media URL before it is handed
/// to the resolver.
///
/// # Security
/// - Only HTTP/HTTPS schemes allowed (the extractor would otherwise
///   accept `file://` and local paths)
/// - Length-bounded to keep hostile inputs out of process arguments
///
/// # Examples
/// ```
/// use vidgate::core::validation::validate_media_url;
///
/// assert!(validate_media_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
/// assert!(validate_media_url("").is_err());
/// assert!(validate_media_url("ftp://example.com/video").is_err());
/// ```
pub fn validate_media_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }

    if url.len() > config::validation::MAX_URL_LENGTH {
        return Err(ValidationError::InvalidUrl(format!(
            "URL exceeds {} characters",
            config::validation::MAX_URL_LENGTH
        )));
    }

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Url::parse(url).map_err(|e| ValidationError::InvalidUrl(format!("{}", e)))?;

    Ok(())
}

/// Sanitizes a title to an ASCII-safe filename stem for HTTP headers.
///
/// Keeps only `A-Z a-z 0-9 space . - _`, trims surrounding whitespace,
/// falls back to "video" when nothing survives, and truncates to
/// [`config::validation::MAX_TITLE_LENGTH`] characters.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '-' | '_'))
        .collect();

    let mut cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        cleaned = "video".to_string();
    }
    if cleaned.len() > config::validation::MAX_TITLE_LENGTH {
        cleaned.truncate(config::validation::MAX_TITLE_LENGTH);
    }
    cleaned
}
