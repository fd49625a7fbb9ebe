//! Rendered-document decomposition.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static HEAD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("head").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static SCRIPTS_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script, link").unwrap());
static STYLES: LazyLock<Selector> = LazyLock::new(|| Selector::parse("style").unwrap());

/// Named fragments of one rendered Quarto document.
///
/// Recomputed on every render: renderer output is not assumed stable across
/// invocations with differing working directories, so nothing here is
/// cached.
#[derive(Debug, Clone, Default)]
pub struct QuartoHtml {
    /// Serialized `<head>` element, empty when absent.
    pub head: String,
    /// Serialized `<body>` element, empty when absent.
    pub body: String,
    /// `<script>` and `<link>` elements found under head, in document order.
    pub head_scripts_links: Vec<String>,
    /// `<style>` elements found under head, in document order.
    pub head_styles: Vec<String>,
}

impl QuartoHtml {
    /// Decompose a complete HTML document string.
    ///
    /// Parsing is lenient: malformed or partial input never fails, it just
    /// leaves the corresponding fragments empty.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let head = document.select(&HEAD).next();
        let body = document.select(&BODY).next();

        Self {
            head: head.map(|el| el.html()).unwrap_or_default(),
            body: body.map(|el| el.html()).unwrap_or_default(),
            head_scripts_links: head
                .map(|el| el.select(&SCRIPTS_LINKS).map(|e| e.html()).collect())
                .unwrap_or_default(),
            head_styles: head
                .map(|el| el.select(&STYLES).map(|e| e.html()).collect())
                .unwrap_or_default(),
        }
    }
}
