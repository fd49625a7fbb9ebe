//! `.qmd` front matter and body reader.
//!
//! The host calls the reader during content discovery, before any renderer
//! runs: it splits the YAML front matter from the Markdown body, converts
//! the front matter into typed metadata, renders the body to HTML, and
//! derives a plain-text summary when the front matter does not carry one.

use crate::error::PluginError;
use crate::host::{Author, Category, Metadata, MetadataValue};
use crate::log::Logger;
use crate::settings::Settings;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use pulldown_cmark::{Parser, html};
use regex::Regex;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Front matter fence, on a line of its own.
static FRONT_MATTER_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---\s*$").unwrap());
/// Fenced code blocks, excluded from derived summaries.
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Reads one `.qmd` source into rendered content plus metadata.
pub struct QmdReader<'a> {
    settings: &'a Settings,
    log: Logger,
}

impl<'a> QmdReader<'a> {
    pub fn new(settings: &'a Settings, log: Logger) -> Self {
        Self { settings, log }
    }

    /// Read a document from disk.
    pub fn read(&self, path: &Path) -> Result<(String, Metadata), PluginError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| PluginError::Io(path.to_path_buf(), err))?;
        self.read_str(path, &raw)
    }

    /// Read a document from an already-loaded string.
    ///
    /// The returned content is the Markdown body rendered to HTML. It is a
    /// placeholder the merge step later replaces with real renderer output;
    /// the host needs it up front for summaries and feed generation.
    pub fn read_str(&self, path: &Path, raw: &str) -> Result<(String, Metadata), PluginError> {
        let parts: Vec<&str> = FRONT_MATTER_DELIMITER.splitn(raw, 3).collect();
        let [_, front_matter, body] = parts.as_slice() else {
            return Err(PluginError::MetadataParse(
                path.to_path_buf(),
                "missing `---` front matter delimiters".to_string(),
            ));
        };

        let mapping: serde_yaml::Mapping = serde_yaml::from_str(front_matter)
            .map_err(|err| PluginError::MetadataParse(path.to_path_buf(), err.to_string()))?;

        let mut metadata = Metadata::new();
        for (key, value) in &mapping {
            let Some(key) = key.as_str() else {
                return Err(PluginError::MetadataParse(
                    path.to_path_buf(),
                    format!("non-string front matter key: {key:?}"),
                ));
            };
            let key = key.to_lowercase();
            if let Some(converted) = self.convert_field(&key, value) {
                metadata.insert(key, converted);
            }
        }

        let content = render_markdown(body);

        let has_summary = metadata
            .get("summary")
            .and_then(MetadataValue::as_text)
            .is_some_and(|text| !text.is_empty());
        if !has_summary {
            metadata.insert(
                "summary".to_string(),
                MetadataValue::Text(self.derive_summary(body)),
            );
        }

        Ok((content, metadata))
    }

    /// Convert one front matter field into its typed value.
    ///
    /// An unparseable date is logged and dropped rather than failing the
    /// whole document.
    fn convert_field(&self, key: &str, value: &serde_yaml::Value) -> Option<MetadataValue> {
        match key {
            "date" => {
                let text = scalar_text(value)?;
                match parse_date(&text) {
                    Ok(date) => Some(MetadataValue::Date(date)),
                    Err(err) => {
                        self.log.error(&format!("{err}"));
                        None
                    }
                }
            }
            "category" => Some(MetadataValue::Category(Category(scalar_text(value)?))),
            "author" => Some(MetadataValue::Author(Author(scalar_text(value)?))),
            "tags" => Some(MetadataValue::Tags(sequence_text(value))),
            _ => match value {
                serde_yaml::Value::Sequence(_) => Some(MetadataValue::Tags(sequence_text(value))),
                _ => Some(MetadataValue::Text(scalar_text(value)?)),
            },
        }
    }

    /// Derive a plain-text summary from the Markdown body.
    ///
    /// Fenced code blocks are dropped first so a post that opens with a
    /// listing does not get code as its summary. The remaining Markdown is
    /// rendered, optionally limited to the leading paragraphs, flattened to
    /// text, and word-truncated.
    fn derive_summary(&self, body: &str) -> String {
        let without_code = FENCED_CODE.replace_all(body, "");
        let mut rendered = render_markdown(&without_code);

        if let Some(max_paragraphs) = self.settings.summary_max_paragraphs {
            let fragment = Html::parse_fragment(&rendered);
            rendered = fragment
                .select(&PARAGRAPH)
                .take(max_paragraphs)
                .map(|p| p.html())
                .collect();
        }

        let fragment = Html::parse_fragment(&rendered);
        let mut text: String = fragment.root_element().text().collect();
        text = text.trim().to_string();

        if let Some(max_length) = self.settings.summary_max_length {
            let words: Vec<&str> = text.split_whitespace().collect();
            if words.len() > max_length {
                text = words[..max_length].join(" ") + &self.settings.summary_end_suffix;
            }
        }
        text
    }
}

/// Render Markdown to HTML.
fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Parse a front matter date into an offset-carrying timestamp.
///
/// Accepted forms, tried in order: RFC 3339 (offset preserved), naive
/// datetime with `T` or space separator (taken as UTC), bare date (UTC
/// midnight).
fn parse_date(text: &str) -> Result<DateTime<FixedOffset>, PluginError> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    Err(PluginError::InvalidDate(text.to_string()))
}

/// Scalar YAML value as text, `None` for mappings and sequences.
fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sequence YAML value as a list of scalar texts.
fn sequence_text(value: &serde_yaml::Value) -> Vec<String> {
    match value {
        serde_yaml::Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        _ => scalar_text(value).into_iter().collect(),
    }
}
