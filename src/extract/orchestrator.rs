//! Extraction orchestration.
//!
//! One resolver call per top-level URL, then shape detection: a plain
//! item goes straight through selection, a collection gets each member
//! re-resolved individually (collection listings rarely carry full
//! format catalogues). Resolution failures never propagate as errors;
//! they become reasoned, renderable responses. The only hard error out
//! of [`Orchestrator::extract`] is input validation.

use futures_util::future::join_all;
use std::path::{Path, PathBuf};

use crate::core::error::{AppError, AppResult};
use crate::core::validation::validate_media_url;
use crate::extract::normalize::{Entry, Extraction, FileOutcome};
use crate::extract::resolver::{RawInfo, Resolve};
use crate::extract::ytdlp_errors::unavailable_reason;

/// Reason attached to collection members whose individual resolution failed
const MEMBER_SKIP_REASON: &str = "Skipped: sign-in required or unavailable";

/// Drives the extract flow against any [`Resolve`] implementation.
///
/// Stateless per call; the cookies path is injected at construction and
/// its existence re-checked on every call, so an upload takes effect
/// without a restart.
pub struct Orchestrator<R> {
    resolver: R,
    cookies_path: Option<PathBuf>,
}

impl<R: Resolve> Orchestrator<R> {
    pub fn new(resolver: R, cookies_path: Option<PathBuf>) -> Self {
        Self { resolver, cookies_path }
    }

    fn cookies(&self) -> Option<&Path> {
        self.cookies_path.as_deref().filter(|p| p.exists())
    }

    /// Resolves a URL into the uniform response shape.
    ///
    /// # Errors
    /// Only [`AppError::Validation`] for a missing/malformed URL; every
    /// downstream failure is folded into the returned [`Extraction`] as
    /// a reason.
    pub async fn extract(&self, url: &str) -> AppResult<Extraction> {
        validate_media_url(url).map_err(|e| AppError::Validation(e.to_string()))?;
        let url = url.trim();

        let info = match self.resolver.resolve(url, self.cookies()).await {
            Ok(info) => info,
            Err(err) => {
                log::warn!("Extraction failed for {}: {}", url, err);
                return Ok(Extraction::unavailable(unavailable_reason(&err)));
            }
        };

        // Collection shape: a non-empty entries list, possibly holding
        // null placeholders for members the extractor skipped.
        let has_entries = info.entries.as_ref().is_some_and(|e| !e.is_empty());
        if has_entries {
            let collection_title = info.title.clone().unwrap_or_else(|| "Playlist".to_string());
            let members: Vec<RawInfo> = info.entries.unwrap_or_default().into_iter().flatten().collect();

            return Ok(match members.len() {
                0 => Extraction::Playlist {
                    title: collection_title,
                    entries: Vec::new(),
                    reason: Some("All items are unavailable or deleted".to_string()),
                },
                1 => {
                    let member = members.into_iter().next().unwrap_or_default();
                    self.single_member(member).await
                }
                _ => {
                    log::info!("Resolving {} collection members for {}", members.len(), url);
                    let entries = join_all(members.into_iter().map(|m| self.resolve_entry(m))).await;
                    Extraction::Playlist {
                        title: collection_title,
                        entries,
                        reason: None,
                    }
                }
            });
        }

        Ok(single_from(info))
    }

    /// A collection that collapsed to one member is reported as a
    /// single item. Flat listings omit format catalogues, so the member
    /// is re-resolved individually when it arrived without formats.
    async fn single_member(&self, member: RawInfo) -> Extraction {
        if !member.formats.is_empty() {
            return single_from(member);
        }

        let Some(url) = member.member_url() else {
            return Extraction::Single {
                title: member.title,
                file: None,
                reason: Some(MEMBER_SKIP_REASON.to_string()),
            };
        };

        match self.resolver.resolve(&url, self.cookies()).await {
            Ok(full) => single_from(full),
            Err(err) => {
                log::warn!("Member resolution failed for {}: {}", url, err);
                Extraction::Single {
                    title: member.title,
                    file: None,
                    reason: Some(unavailable_reason(&err)),
                }
            }
        }
    }

    /// Resolves one collection member into its output entry.
    ///
    /// Failures are isolated: a broken member yields a skip reason and
    /// its siblings are unaffected.
    async fn resolve_entry(&self, member: RawInfo) -> Entry {
        let id = member.id.clone();
        let title = member.title.clone();

        let Some(url) = member.member_url() else {
            return Entry {
                id,
                title,
                file: None,
                reason: Some(MEMBER_SKIP_REASON.to_string()),
            };
        };

        match self.resolver.resolve(&url, self.cookies()).await {
            Ok(full) => {
                let (file, reason) = FileOutcome::from_formats(&full.formats).into_parts();
                Entry {
                    id: full.id.or(id),
                    title: full.title.or(title),
                    file,
                    reason,
                }
            }
            Err(err) => {
                log::warn!("Member resolution failed for {}: {}", url, err);
                Entry {
                    id,
                    title,
                    file: None,
                    reason: Some(MEMBER_SKIP_REASON.to_string()),
                }
            }
        }
    }
}

/// Runs selection over a fully-resolved item.
fn single_from(info: RawInfo) -> Extraction {
    let (file, reason) = FileOutcome::from_formats(&info.formats).into_parts();
    Extraction::Single {
        title: info.title,
        file,
        reason,
    }
}
