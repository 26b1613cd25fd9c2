//! Response normalization.
//!
//! Reduces a chosen [`CandidateFormat`] to the client-facing descriptor
//! and packages single items and collections into the uniform JSON
//! shape the UI renders. Failures never surface here as errors: an item
//! either carries a file or a human-readable reason for its absence.

use serde::Serialize;

use crate::extract::format::{select_best, CandidateFormat};

/// Renders a byte count as a compact human-readable string.
///
/// Scales through B/KB/MB/GB/TB/PB with one decimal place. Absent,
/// zero, or non-finite input yields an empty string rather than "0B" -
/// the UI simply omits the size in that case.
pub fn human_size(bytes: Option<f64>) -> String {
    let Some(mut n) = bytes else {
        return String::new();
    };
    if !n.is_finite() || n <= 0.0 {
        return String::new();
    }

    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if n < 1024.0 {
            return format!("{:.1}{}", n, unit);
        }
        n /= 1024.0;
    }
    format!("{:.1}PB", n)
}

/// The chosen best file, reduced to what the client needs to start a
/// download.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedFile {
    /// Direct fetch URL, passed to the download proxy verbatim
    pub url: String,
    /// File extension, "mp4" when the extractor did not report one
    pub ext: String,
    /// Human-readable size, empty when unknown
    pub filesize: String,
}

/// Projects a selected candidate into a [`SelectedFile`].
///
/// Callers must only pass candidates that came out of
/// [`select_best`]; a `SelectedFile` is never built from a format that
/// failed the downloadability filter.
pub fn to_selected_file(best: Option<&CandidateFormat>) -> Option<SelectedFile> {
    best.map(|f| SelectedFile {
        url: f.url.clone().unwrap_or_default(),
        ext: f
            .ext
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "mp4".to_string()),
        filesize: human_size(f.size_bytes()),
    })
}

/// Outcome of format selection over one item.
///
/// Tagged so the "failure becomes a reasoned success response" contract
/// is carried by the type instead of being an implicit status-code
/// choice in the handler.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// A downloadable progressive file was found
    Ready(SelectedFile),
    /// Nothing survived selection; carries the user-facing reason
    Unavailable(String),
}

impl FileOutcome {
    /// Runs filter + selection + projection over an item's format list.
    pub fn from_formats(formats: &[CandidateFormat]) -> Self {
        match to_selected_file(select_best(formats)) {
            Some(file) => FileOutcome::Ready(file),
            None => FileOutcome::Unavailable(
                "No directly downloadable file: only segmented or single-track formats were offered".to_string(),
            ),
        }
    }

    /// Splits into the (file, reason) pair the response shape uses.
    pub fn into_parts(self) -> (Option<SelectedFile>, Option<String>) {
        match self {
            FileOutcome::Ready(file) => (Some(file), None),
            FileOutcome::Unavailable(reason) => (None, Some(reason)),
        }
    }
}

/// One playable unit of a collection.
#[derive(Debug, Serialize)]
pub struct Entry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub file: Option<SelectedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Uniform extraction response: a single item or a named collection.
///
/// The `mode` tag is what the UI switches on. A collection that
/// collapses to exactly one resolvable member is reported as `Single`.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Extraction {
    Single {
        title: Option<String>,
        file: Option<SelectedFile>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Playlist {
        title: String,
        entries: Vec<Entry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Extraction {
    /// A single item that could not be resolved at all.
    pub fn unavailable(reason: String) -> Self {
        Extraction::Single {
            title: None,
            file: None,
            reason: Some(reason),
        }
    }
}
