//! Vidgate - web gateway that resolves video/playlist URLs to their best
//! progressive (audio+video, HTTP-delivered) file and proxies the
//! download to the browser.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, validation, process helpers
//! - `extract`: format filtering/selection, normalization, orchestration
//! - `server`: axum routes and the streaming download relay

pub mod cli;
pub mod core;
pub mod extract;
pub mod server;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use extract::{Extraction, Orchestrator, YtdlpResolver};
pub use server::run_server;
