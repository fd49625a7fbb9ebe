//! Content merging.

use super::serialize::{SerializeOptions, serialize_children};
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Quarto marks its generated title block with this header id.
static TITLE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("header#title-block-header").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Merge the rendered body with the extracted head fragments into one
/// content string.
///
/// The renderer's generated title block duplicates metadata the host
/// already knows, so it is removed (its absence is not an error). The
/// remaining body children are concatenated in original order, then the
/// script/link fragments, then the style fragments. Scripts and links must
/// precede styles so cascade order matches the renderer's original head
/// once the host re-embeds this string into a full page.
pub fn merge_article_content(body: &str, scripts_links: &[String], styles: &[String]) -> String {
    let document = Html::parse_document(body);
    let title_block = document.select(&TITLE_BLOCK).next().map(|el| el.id());

    let opts = SerializeOptions {
        skip: title_block,
        ..Default::default()
    };

    let mut merged = String::new();
    match document.select(&BODY).next() {
        Some(body_el) => serialize_children(*body_el, &opts, &mut merged),
        // Nothing recognizable as a body survived parsing; emit whatever did.
        None => serialize_children(document.tree.root(), &opts, &mut merged),
    }

    for fragment in scripts_links.iter().chain(styles) {
        merged.push_str(fragment);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_title_block_header() {
        let body = "<body>\
            <header id=\"title-block-header\"><h1>Title</h1></header>\
            <p>one</p><p>two</p></body>";
        let merged = merge_article_content(body, &[], &[]);
        assert_eq!(merged, "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_missing_title_block_is_not_an_error() {
        let merged = merge_article_content("<body><p>only</p></body>", &[], &[]);
        assert_eq!(merged, "<p>only</p>");
    }

    #[test]
    fn test_preserves_sibling_order_around_removed_header() {
        let body = "<body><div id=\"a\">a</div>\
            <header id=\"title-block-header\">chrome</header>\
            <div id=\"b\">b</div><div id=\"c\">c</div></body>";
        let merged = merge_article_content(body, &[], &[]);
        assert_eq!(
            merged,
            "<div id=\"a\">a</div><div id=\"b\">b</div><div id=\"c\">c</div>"
        );
    }

    #[test]
    fn test_only_header_with_marker_id_is_removed() {
        let body = "<body><header id=\"site-header\">keep</header><p>x</p></body>";
        let merged = merge_article_content(body, &[], &[]);
        assert!(merged.contains("site-header"));
    }

    #[test]
    fn test_appends_scripts_then_styles() {
        let scripts = vec!["<script src=\"a.js\"></script>".to_string()];
        let styles = vec!["<style>p{}</style>".to_string()];
        let merged = merge_article_content("<body><p>x</p></body>", &scripts, &styles);
        assert_eq!(
            merged,
            "<p>x</p><script src=\"a.js\"></script><style>p{}</style>"
        );

        let script_pos = merged.find("a.js").unwrap();
        let style_pos = merged.find("<style>").unwrap();
        assert!(script_pos < style_pos);
    }

    #[test]
    fn test_nested_title_block_is_still_removed() {
        let body = "<body><main>\
            <header id=\"title-block-header\">chrome</header>\
            <p>content</p></main></body>";
        let merged = merge_article_content(body, &[], &[]);
        assert_eq!(merged, "<main><p>content</p></main>");
    }
}
