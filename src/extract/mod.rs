//! Extraction pipeline: format filtering and selection, response
//! normalization, and orchestration over the resolver seam.

pub mod format;
pub mod normalize;
pub mod orchestrator;
pub mod resolver;
pub mod ytdlp;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use format::{is_downloadable, select_best, CandidateFormat};
pub use normalize::{human_size, Entry, Extraction, SelectedFile};
pub use orchestrator::Orchestrator;
pub use resolver::{RawInfo, Resolve, ResolveError};
pub use ytdlp::YtdlpResolver;
