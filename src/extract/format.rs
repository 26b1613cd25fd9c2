//! Candidate format filtering and selection.
//!
//! Extractors report every representation they know about: progressive
//! files, DASH/HLS manifests, audio-only and video-only streams. Only
//! progressive HTTP files can be relayed byte-for-byte by the download
//! proxy, so everything else is filtered out before scoring.

use serde::Deserialize;

/// One representation of a media item as reported by the resolver.
///
/// Every field is optional: extractor output varies wildly between
/// sites and the filter must stay total over whatever shows up.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateFormat {
    /// Direct fetch URL
    #[serde(default)]
    pub url: Option<String>,
    /// Transport protocol tag ("https", "m3u8_native", "http_dash_segments", ...)
    #[serde(default)]
    pub protocol: Option<String>,
    /// Audio codec tag; "none" means no audio track
    #[serde(default)]
    pub acodec: Option<String>,
    /// Video codec tag; "none" means no video track
    #[serde(default)]
    pub vcodec: Option<String>,
    /// Vertical resolution
    #[serde(default)]
    pub height: Option<f64>,
    /// Average total bitrate (kbit/s)
    #[serde(default)]
    pub tbr: Option<f64>,
    /// Exact file size in bytes, when the extractor knows it
    #[serde(default)]
    pub filesize: Option<f64>,
    /// Approximate file size in bytes
    #[serde(default)]
    pub filesize_approx: Option<f64>,
    /// File extension
    #[serde(default)]
    pub ext: Option<String>,
}

impl CandidateFormat {
    /// Exact size if known, approximate otherwise.
    pub fn size_bytes(&self) -> Option<f64> {
        self.filesize.or(self.filesize_approx)
    }
}

fn codec_usable(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if !c.is_empty() && c != "none")
}

/// Returns true if the candidate is a real downloadable progressive file:
/// - has a direct URL
/// - has both audio and video tracks
/// - is a plain HTTP fetch (no m3u8/dash/mpd manifests)
pub fn is_downloadable(fmt: &CandidateFormat) -> bool {
    match fmt.url.as_deref() {
        Some(url) if !url.is_empty() => {}
        _ => return false,
    }

    let proto = fmt.protocol.as_deref().unwrap_or("").to_lowercase();
    if proto.contains("m3u8") || proto.contains("dash") || proto.contains("mpd") {
        return false;
    }

    if !codec_usable(fmt.acodec.as_deref()) || !codec_usable(fmt.vcodec.as_deref()) {
        return false;
    }

    // Some extractors omit the protocol for plain https URLs; when one
    // is present it must be an HTTP transport.
    if !proto.is_empty() && !proto.starts_with("http") {
        return false;
    }

    true
}

fn score(fmt: &CandidateFormat) -> i64 {
    let height = fmt.height.unwrap_or(0.0).max(0.0) as i64;
    let tbr = fmt.tbr.unwrap_or(0.0).max(0.0) as i64;
    // Resolution dominates: the multiplier guarantees any height step
    // outranks realistic bitrate differences, bitrate breaks ties.
    height * 1000 + tbr
}

/// Picks the best downloadable file by height, then bitrate.
///
/// Candidates failing [`is_downloadable`] are skipped. Ties keep the
/// first-seen candidate (stable left-to-right scan). Returns `None`
/// when nothing survives the filter.
pub fn select_best(formats: &[CandidateFormat]) -> Option<&CandidateFormat> {
    let mut best: Option<&CandidateFormat> = None;
    let mut best_score: i64 = -1;

    for fmt in formats {
        if !is_downloadable(fmt) {
            continue;
        }
        let s = score(fmt);
        if s > best_score {
            best_score = s;
            best = Some(fmt);
        }
    }

    best
}
