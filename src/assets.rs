//! Image asset path rewriting.
//!
//! Quarto emits image references relative to its own output layout: a
//! document `post.qmd` gets an asset directory `post_files/` next to the
//! rendered page. Once the merged article is relocated into the host's
//! output tree those references are only valid if re-anchored under the
//! document's actual position in the content tree, e.g.
//! `post_files/fig.png` becomes `blog/post_files/fig.png` for a document
//! at `content/blog/post.qmd`.

use crate::html::serialize::{SerializeOptions, serialize_children};
use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use std::path::Path;
use std::sync::LazyLock;

static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Re-anchor `<img src>` values of the form `<stem>_files/<rest>` under the
/// document's directory relative to the content root.
///
/// Non-matching sources are untouched. When no image needs rewriting the
/// input is returned byte-identical, never re-serialized, so repeated runs
/// cannot introduce whitespace or attribute drift. The rewrite is
/// idempotent: re-anchored prefixes no longer match the pattern.
pub fn rewrite_image_sources(content_dir: &Path, source: &Path, html: &str) -> Result<String> {
    let Some(stem) = source.file_stem().and_then(|s| s.to_str()) else {
        return Ok(html.to_owned());
    };
    let prefix = format!("{stem}_files/");

    let relative = source.strip_prefix(content_dir).map_err(|_| {
        anyhow!(
            "document `{}` is not under content root `{}`",
            source.display(),
            content_dir.display()
        )
    })?;
    let rel_dir = relative
        .parent()
        .unwrap_or(Path::new(""))
        .to_string_lossy()
        .replace('\\', "/");

    let document = Html::parse_document(html);
    let needs_rewrite = document.select(&IMG).any(|img| {
        img.value()
            .attr("src")
            .is_some_and(|src| src.starts_with(&prefix))
    });
    if !needs_rewrite {
        return Ok(html.to_owned());
    }

    let rewrite = |src: &str| {
        let rest = src.strip_prefix(&prefix)?;
        if rel_dir.is_empty() {
            // Document sits at the content root; the flat reference is
            // already correct.
            Some(format!("{stem}_files/{rest}"))
        } else {
            Some(format!("{rel_dir}/{stem}_files/{rest}"))
        }
    };
    let opts = SerializeOptions {
        skip: None,
        rewrite_img_src: Some(&rewrite),
    };

    let mut out = String::new();
    serialize_children(document.tree.root(), &opts, &mut out);
    Ok(out)
}
