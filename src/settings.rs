//! Host settings view.
//!
//! The host generator owns its settings store; this crate only consumes the
//! subset below. `Deserialize` is derived so hosts that keep settings in a
//! serialized document can hand them over directly, and every field falls
//! back to its default when absent.

use serde::Deserialize;
use std::path::PathBuf;

/// The slice of host settings the pipeline reads.
///
/// `path` and `output_path` correspond to the host's `PATH` and
/// `OUTPUT_PATH` settings; the `summary_*` options control derived-summary
/// generation in the reader.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Content root directory.
    pub path: PathBuf,
    /// Site output root, resolved relative to the content root's parent
    /// when not absolute.
    pub output_path: PathBuf,
    /// Keep at most this many leading paragraphs in derived summaries.
    pub summary_max_paragraphs: Option<usize>,
    /// Truncate derived summaries to this many words.
    pub summary_max_length: Option<usize>,
    /// Suffix appended when a summary is word-truncated.
    pub summary_end_suffix: String,
    /// Renderer invocation, e.g. `["quarto"]`. Extra elements become
    /// leading arguments, so wrappers like `["xvfb-run", "quarto"]` work.
    pub quarto_command: Vec<String>,
    /// Pass `--no-cache` to the renderer. Stale renderer caches produce
    /// HTML referencing assets from earlier runs, so this defaults to on.
    pub no_cache: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("content"),
            output_path: PathBuf::from("output"),
            summary_max_paragraphs: None,
            summary_max_length: None,
            summary_end_suffix: "...".to_string(),
            quarto_command: vec!["quarto".to_string()],
            no_cache: true,
        }
    }
}

impl Settings {
    /// Settings view for a content root and output root, with everything
    /// else at its default.
    pub fn from_paths(path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.path, PathBuf::from("content"));
        assert_eq!(settings.output_path, PathBuf::from("output"));
        assert_eq!(settings.summary_max_paragraphs, None);
        assert_eq!(settings.summary_max_length, None);
        assert_eq!(settings.summary_end_suffix, "...");
        assert_eq!(settings.quarto_command, vec!["quarto".to_string()]);
        assert!(settings.no_cache);
    }

    #[test]
    fn test_from_paths() {
        let settings = Settings::from_paths("site/content", "public");
        assert_eq!(settings.path, PathBuf::from("site/content"));
        assert_eq!(settings.output_path, PathBuf::from("public"));
        assert_eq!(settings.summary_end_suffix, "...");
    }
}
