//! Host-side value types.
//!
//! The host generator's article and taxonomy objects are modeled as plain
//! data: the pipeline never inherits from host classes or reaches into host
//! internals beyond the article content string it is asked to replace.

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Category taxonomy value, wrapped for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(pub String);

/// Author taxonomy value, wrapped for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(pub String);

/// One generated article, as handed back by the host after generation.
#[derive(Debug, Clone)]
pub struct Article {
    /// Path of the source document this article was generated from.
    pub source_path: PathBuf,
    /// Article content. Replaced by the merge step for `.qmd` sources;
    /// left at its pre-merge value when processing fails.
    pub content: String,
}

impl Article {
    pub fn new(source_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            content: content.into(),
        }
    }
}

/// Typed front matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    /// Always carries an offset; date-only inputs normalize to UTC midnight.
    Date(DateTime<FixedOffset>),
    Category(Category),
    Author(Author),
    Tags(Vec<String>),
}

impl MetadataValue {
    /// Text content, for `Text` values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The normalized date, for `Date` values.
    pub const fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }
}

/// Normalized front matter mapping, keyed by lowercase field name.
pub type Metadata = BTreeMap<String, MetadataValue>;
