//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced at the per-document processing boundary.
///
/// None of these abort a batch: callers log the error together with the
/// offending document path and degrade to a partial result (a metadata
/// field left absent, or an article keeping its pre-merge content).
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Front matter block missing or malformed.
    #[error("metadata parse error in `{0}`: {1}")]
    MetadataParse(PathBuf, String),

    /// `date` field has an unsupported shape.
    #[error("invalid date `{0}`")]
    InvalidDate(String),

    /// Renderer exited nonzero, or failed to launch at all.
    #[error("quarto render failed for `{path}`: {message}")]
    Render { path: PathBuf, message: String },

    /// Fragment extraction or merging gave up on malformed HTML.
    #[error("content merge failed for `{path}`: {message}")]
    Merge { path: PathBuf, message: String },
}
