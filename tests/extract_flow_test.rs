//! Integration tests for the extraction orchestrator
//!
//! Drives the full extract flow against a synthetic in-memory resolver,
//! so no network and no yt-dlp binary are involved.
//!
//! Run with: cargo test --test extract_flow_test

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use vidgate::core::AppError;
use vidgate::extract::{CandidateFormat, Extraction, Orchestrator, RawInfo, Resolve, ResolveError};

// ============================================================================
// Synthetic resolver
// ============================================================================

#[derive(Default)]
struct MockResolver {
    /// URL -> successful resolution
    responses: HashMap<String, RawInfo>,
    /// URL -> stderr of a failed resolution
    failures: HashMap<String, String>,
    /// Every (url, cookies) pair seen, in call order
    calls: Mutex<Vec<(String, Option<PathBuf>)>>,
}

impl MockResolver {
    fn with_response(mut self, url: &str, info: RawInfo) -> Self {
        self.responses.insert(url.to_string(), info);
        self
    }

    fn with_failure(mut self, url: &str, stderr: &str) -> Self {
        self.failures.insert(url.to_string(), stderr.to_string());
        self
    }

    fn calls(&self) -> Vec<(String, Option<PathBuf>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolve for MockResolver {
    async fn resolve(&self, url: &str, cookies: Option<&Path>) -> Result<RawInfo, ResolveError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), cookies.map(Path::to_path_buf)));

        if let Some(stderr) = self.failures.get(url) {
            return Err(ResolveError::Failed {
                stderr: stderr.clone(),
            });
        }
        self.responses.get(url).cloned().ok_or(ResolveError::Empty)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn progressive(url: &str, height: u32, tbr: f64) -> CandidateFormat {
    CandidateFormat {
        url: Some(url.to_string()),
        protocol: Some("https".to_string()),
        acodec: Some("mp4a.40.2".to_string()),
        vcodec: Some("avc1.64001F".to_string()),
        height: Some(f64::from(height)),
        tbr: Some(tbr),
        ext: Some("mp4".to_string()),
        ..Default::default()
    }
}

fn manifest_only(url: &str) -> CandidateFormat {
    CandidateFormat {
        url: Some(url.to_string()),
        protocol: Some("m3u8_native".to_string()),
        acodec: Some("mp4a.40.2".to_string()),
        vcodec: Some("avc1.64001F".to_string()),
        height: Some(1080.0),
        ..Default::default()
    }
}

fn item(id: &str, title: &str, formats: Vec<CandidateFormat>) -> RawInfo {
    RawInfo {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        webpage_url: Some(format!("https://example.com/watch/{}", id)),
        formats,
        ..Default::default()
    }
}

/// Flat collection listing: members carry no formats, as real playlist
/// dumps tend to.
fn flat_member(id: &str, title: &str) -> RawInfo {
    RawInfo {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        webpage_url: Some(format!("https://example.com/watch/{}", id)),
        ..Default::default()
    }
}

fn collection(title: &str, members: Vec<Option<RawInfo>>) -> RawInfo {
    RawInfo {
        title: Some(title.to_string()),
        entries: Some(members),
        ..Default::default()
    }
}

fn orchestrator(resolver: MockResolver) -> Orchestrator<MockResolver> {
    Orchestrator::new(resolver, None)
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_empty_url_is_a_validation_error() {
    let orch = orchestrator(MockResolver::default());
    assert!(matches!(orch.extract("").await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_non_http_url_is_a_validation_error() {
    let orch = orchestrator(MockResolver::default());
    assert!(matches!(
        orch.extract("ftp://example.com/video").await,
        Err(AppError::Validation(_))
    ));
}

// ============================================================================
// Single item
// ============================================================================

#[tokio::test]
async fn test_single_item_picks_best_progressive_file() {
    let resolver = MockResolver::default().with_response(
        "https://example.com/v",
        item(
            "v1",
            "A Video",
            vec![
                progressive("https://cdn.example.com/720.mp4", 720, 2000.0),
                progressive("https://cdn.example.com/1080.mp4", 1080, 1500.0),
                manifest_only("https://cdn.example.com/master.m3u8"),
            ],
        ),
    );

    let result = orchestrator(resolver).extract("https://example.com/v").await.unwrap();

    match result {
        Extraction::Single { title, file, reason } => {
            assert_eq!(title.as_deref(), Some("A Video"));
            assert!(reason.is_none());
            let file = file.expect("best file should be selected");
            assert_eq!(file.url, "https://cdn.example.com/1080.mp4");
            assert_eq!(file.ext, "mp4");
        }
        other => panic!("expected single, got {:?}", other),
    }
}

#[tokio::test]
async fn test_single_item_without_downloadable_formats_gets_reason() {
    let resolver = MockResolver::default().with_response(
        "https://example.com/v",
        item("v1", "Streams Only", vec![manifest_only("https://cdn.example.com/m.m3u8")]),
    );

    let result = orchestrator(resolver).extract("https://example.com/v").await.unwrap();

    match result {
        Extraction::Single { file, reason, .. } => {
            assert!(file.is_none());
            assert!(reason.unwrap().contains("No directly downloadable file"));
        }
        other => panic!("expected single, got {:?}", other),
    }
}

// ============================================================================
// Resolution failure -> reasoned response, not an error
// ============================================================================

#[tokio::test]
async fn test_sign_in_challenge_yields_reason_not_error() {
    let resolver = MockResolver::default().with_failure(
        "https://example.com/v",
        "ERROR: [youtube] v: Sign in to confirm you're not a bot. Use --cookies for authentication",
    );

    let result = orchestrator(resolver).extract("https://example.com/v").await.unwrap();

    match result {
        Extraction::Single { file, reason, .. } => {
            assert!(file.is_none());
            let reason = reason.unwrap().to_lowercase();
            assert!(reason.contains("sign"), "reason should mention sign-in: {}", reason);
            assert!(reason.contains("cookies"), "reason should mention cookies: {}", reason);
        }
        other => panic!("expected single, got {:?}", other),
    }
}

// ============================================================================
// Collections
// ============================================================================

#[tokio::test]
async fn test_collection_members_resolved_individually_in_order() {
    let resolver = MockResolver::default()
        .with_response(
            "https://example.com/playlist",
            collection(
                "My Mix",
                vec![
                    Some(flat_member("a", "First")),
                    Some(flat_member("b", "Second")),
                    Some(flat_member("c", "Third")),
                ],
            ),
        )
        .with_response(
            "https://example.com/watch/a",
            item("a", "First", vec![progressive("https://cdn.example.com/a.mp4", 720, 1000.0)]),
        )
        .with_failure("https://example.com/watch/b", "ERROR: Private video")
        .with_response(
            "https://example.com/watch/c",
            item("c", "Third", vec![progressive("https://cdn.example.com/c.mp4", 360, 500.0)]),
        );

    let result = orchestrator(resolver)
        .extract("https://example.com/playlist")
        .await
        .unwrap();

    match result {
        Extraction::Playlist { title, entries, .. } => {
            assert_eq!(title, "My Mix");
            assert_eq!(entries.len(), 3);

            // Output order matches input order regardless of resolution order
            assert_eq!(entries[0].id.as_deref(), Some("a"));
            assert_eq!(entries[1].id.as_deref(), Some("b"));
            assert_eq!(entries[2].id.as_deref(), Some("c"));

            assert!(entries[0].file.is_some());
            assert!(entries[2].file.is_some());

            // The broken member is isolated, siblings unaffected
            assert!(entries[1].file.is_none());
            assert!(entries[1].reason.as_deref().unwrap().contains("Skipped"));
        }
        other => panic!("expected playlist, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_placeholders_are_dropped() {
    let resolver = MockResolver::default()
        .with_response(
            "https://example.com/playlist",
            collection(
                "Sparse",
                vec![
                    None,
                    Some(flat_member("a", "Only One")),
                    None,
                ],
            ),
        )
        .with_response(
            "https://example.com/watch/a",
            item("a", "Only One", vec![progressive("https://cdn.example.com/a.mp4", 720, 1000.0)]),
        );

    let result = orchestrator(resolver)
        .extract("https://example.com/playlist")
        .await
        .unwrap();

    // One resolvable member left -> reported as a single item
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["mode"], "single");
    assert_eq!(json["title"], "Only One");
    assert_eq!(json["file"]["url"], "https://cdn.example.com/a.mp4");
}

#[tokio::test]
async fn test_collection_with_no_usable_members_is_an_empty_playlist() {
    let resolver = MockResolver::default().with_response(
        "https://example.com/playlist",
        collection("Gone", vec![None, None]),
    );

    let result = orchestrator(resolver)
        .extract("https://example.com/playlist")
        .await
        .unwrap();

    match result {
        Extraction::Playlist { title, entries, reason } => {
            assert_eq!(title, "Gone");
            assert!(entries.is_empty());
            assert!(reason.unwrap().contains("unavailable"));
        }
        other => panic!("expected playlist, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bare_id_member_gets_canonical_watch_url() {
    let bare = RawInfo {
        id: Some("xyz".to_string()),
        title: Some("Bare".to_string()),
        ..Default::default()
    };
    let resolver = MockResolver::default()
        .with_response(
            "https://example.com/playlist",
            collection("Ids Only", vec![Some(bare.clone()), Some(flat_member("a", "A"))]),
        )
        .with_response(
            "https://www.youtube.com/watch?v=xyz",
            item("xyz", "Bare", vec![progressive("https://cdn.example.com/xyz.mp4", 480, 700.0)]),
        )
        .with_response(
            "https://example.com/watch/a",
            item("a", "A", vec![progressive("https://cdn.example.com/a.mp4", 480, 700.0)]),
        );

    let orch = orchestrator(resolver);
    let result = orch.extract("https://example.com/playlist").await.unwrap();

    match result {
        Extraction::Playlist { entries, .. } => {
            assert_eq!(entries.len(), 2);
            assert!(entries[0].file.is_some(), "bare-id member should resolve via watch URL");
        }
        other => panic!("expected playlist, got {:?}", other),
    }
}

// ============================================================================
// Cookies pass-through
// ============================================================================

#[tokio::test]
async fn test_cookies_passed_only_when_file_exists() {
    let cookies = tempfile::NamedTempFile::new().unwrap();
    let cookies_path = cookies.path().to_path_buf();

    let resolver = Arc::new(MockResolver::default().with_response(
        "https://example.com/v",
        item("v1", "A Video", vec![progressive("https://cdn.example.com/v.mp4", 720, 1000.0)]),
    ));
    let orch = Orchestrator::new(Arc::clone(&resolver), Some(cookies_path.clone()));
    orch.extract("https://example.com/v").await.unwrap();

    let calls = resolver.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.as_deref(), Some(cookies_path.as_path()));

    // A configured-but-missing file must not be passed through
    let resolver = Arc::new(MockResolver::default().with_response(
        "https://example.com/v",
        item("v1", "A Video", vec![progressive("https://cdn.example.com/v.mp4", 720, 1000.0)]),
    ));
    let orch = Orchestrator::new(
        Arc::clone(&resolver),
        Some(PathBuf::from("definitely-not-here.txt")),
    );
    orch.extract("https://example.com/v").await.unwrap();

    let calls = resolver.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, None);
}
