use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Path to the cookies file passed to yt-dlp for restricted content
/// Read from COOKIES_FILE environment variable
/// The file is created/overwritten by POST /upload_cookies and read by
/// every /extract call if it exists. Default: cookies.txt
pub static COOKIES_FILE: Lazy<String> =
    Lazy::new(|| env::var("COOKIES_FILE").unwrap_or_else(|_| "cookies.txt".to_string()));

/// TCP port for the web server
/// Read from PORT environment variable
/// Default: 5000
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000)
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: vidgate.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "vidgate.log".to_string()));

/// Extraction configuration
pub mod extract {
    use super::Duration;

    /// Socket timeout passed to yt-dlp (in seconds)
    pub const SOCKET_TIMEOUT_SECS: u64 = 30;

    /// Overall timeout for a yt-dlp metadata run (in seconds)
    /// Metadata-only runs are much cheaper than downloads, but playlist
    /// dumps on slow extractors can still take a while.
    pub const YTDLP_TIMEOUT_SECS: u64 = 120;

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }
}

/// Relay (download proxy) configuration
pub mod relay {
    use super::Duration;

    /// Connect timeout for opening the remote resource (in seconds)
    /// No overall request timeout: the relay streams arbitrarily large
    /// files and a whole-request bound would abort them mid-transfer.
    pub const CONNECT_TIMEOUT_SECS: u64 = 15;

    /// Connect timeout duration
    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }
}

/// Validation configuration
pub mod validation {
    /// Maximum URL length (RFC 7230 recommends 8000, but we use 2048 for safety)
    pub const MAX_URL_LENGTH: usize = 2048;

    /// Maximum length of a sanitized attachment filename stem
    pub const MAX_TITLE_LENGTH: usize = 100;
}
