//! Resolver seam between the orchestrator and the real extractor.
//!
//! The metadata extractor is modeled as a single-operation trait so the
//! orchestration logic is fully testable against synthetic fixtures
//! without shelling out to anything.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::extract::format::CandidateFormat;

/// Raw item-or-collection tree as reported by the extractor.
///
/// A collection exposes `entries`; members may be `null` placeholders
/// when the extractor was told to tolerate per-item failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub formats: Vec<CandidateFormat>,
    #[serde(default)]
    pub entries: Option<Vec<Option<RawInfo>>>,
}

impl RawInfo {
    /// Best URL for re-resolving this item individually.
    ///
    /// Collection listings often carry only a bare video id; a
    /// canonical watch URL is constructed for that case.
    pub fn member_url(&self) -> Option<String> {
        self.webpage_url
            .clone()
            .or_else(|| self.url.clone())
            .or_else(|| {
                self.id
                    .as_ref()
                    .map(|id| format!("https://www.youtube.com/watch?v={}", id))
            })
    }
}

/// Resolution failures, kept separate from [`crate::core::AppError`]
/// because the orchestrator converts them into reasoned responses
/// instead of propagating them.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The extractor binary could not be launched
    #[error("failed to launch {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The extractor ran past its deadline
    #[error("extractor timed out after {0}s")]
    Timeout(u64),

    /// The extractor exited with an error; carries its stderr
    #[error("extractor failed: {stderr}")]
    Failed { stderr: String },

    /// The extractor exited cleanly but produced nothing
    #[error("extractor produced no output")]
    Empty,

    /// The extractor's output was not valid JSON
    #[error("failed to parse extractor output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The one operation the core needs from the outside world.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolves a URL into its raw item/collection tree without
    /// fetching any media. `cookies`, when given, authenticates the
    /// extractor for restricted content.
    async fn resolve(&self, url: &str, cookies: Option<&Path>) -> Result<RawInfo, ResolveError>;
}

#[async_trait]
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    async fn resolve(&self, url: &str, cookies: Option<&Path>) -> Result<RawInfo, ResolveError> {
        (**self).resolve(url, cookies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_url_prefers_webpage_url() {
        let info = RawInfo {
            id: Some("abc123".to_string()),
            webpage_url: Some("https://example.com/watch/abc123".to_string()),
            url: Some("https://example.com/alt".to_string()),
            ..Default::default()
        };
        assert_eq!(info.member_url().as_deref(), Some("https://example.com/watch/abc123"));
    }

    #[test]
    fn test_member_url_from_bare_id() {
        let info = RawInfo {
            id: Some("abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(
            info.member_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_member_url_absent() {
        assert!(RawInfo::default().member_url().is_none());
    }

    #[test]
    fn test_raw_info_tolerates_null_entries() {
        let json = r#"{
            "title": "Mix",
            "entries": [null, {"id": "a", "title": "First"}, null]
        }"#;
        let info: RawInfo = serde_json::from_str(json).unwrap();
        let entries = info.entries.unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_none());
        assert_eq!(entries[1].as_ref().unwrap().id.as_deref(), Some("a"));
    }
}
