//! Host integration hooks.
//!
//! Three entry points mirror the stages of the host's build: project setup
//! once content discovery starts, reader registration for the `.qmd`
//! extension, and content injection after all articles are generated. A
//! failure on one document is logged against its source path and leaves
//! that article's existing content in place; it never aborts the build or
//! affects other documents.

use crate::QUARTO_EXTENSION;
use crate::adapter::Quarto;
use crate::error::PluginError;
use crate::host::Article;
use crate::html::fragments::QuartoHtml;
use crate::html::merge::merge_article_content;
use crate::log::Logger;
use crate::reader::QmdReader;
use crate::settings::Settings;
use anyhow::Result;
use std::ffi::OsStr;
use std::panic;
use std::path::Path;
use walkdir::WalkDir;

/// Provision the renderer project, if the content tree needs one.
///
/// A content tree with no `.qmd` files gets no `_quarto.yml`; sites that
/// never use the renderer keep a pristine content directory.
pub fn setup_quarto_project(settings: &Settings, log: Logger) -> Result<()> {
    if !content_has_qmd(&settings.path) {
        return Ok(());
    }

    let quarto = Quarto::new(settings, log);
    if !quarto.is_available() {
        log.error(&format!(
            "`{}` not found on PATH, .qmd documents will fail to render",
            quarto.binary_name()
        ));
    }
    quarto.ensure_project()
}

/// True if the content tree contains at least one `.qmd` file.
pub fn content_has_qmd(content_dir: &Path) -> bool {
    WalkDir::new(content_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_type().is_file() && has_qmd_extension(entry.path()))
}

/// The reader registration pair: extension handled, reader to handle it.
pub fn register_reader<'a>(settings: &'a Settings, log: Logger) -> (&'static str, QmdReader<'a>) {
    (QUARTO_EXTENSION, QmdReader::new(settings, log))
}

/// Replace the content of every `.qmd`-sourced article with merged
/// renderer output. Other articles are not touched.
pub fn inject_quarto_content(articles: &mut [Article], settings: &Settings, log: Logger) {
    let quarto = Quarto::new(settings, log);
    for article in articles {
        if !has_qmd_extension(&article.source_path) {
            continue;
        }
        match process_article(&quarto, &article.source_path) {
            Ok(content) => article.content = content,
            Err(err) => log.error(&format!(
                "error processing Quarto content for {}: {err}",
                article.source_path.display()
            )),
        }
    }
}

fn has_qmd_extension(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str) == Some(QUARTO_EXTENSION)
}

/// Render one source document and merge its fragments into a content
/// string.
fn process_article(quarto: &Quarto, source: &Path) -> Result<String, PluginError> {
    let html = quarto.render(source)?;

    // Parsing and merging are infallible by construction; a panic here
    // would be a bug in the HTML walkers, and it must stay confined to
    // this document.
    panic::catch_unwind(|| {
        let fragments = QuartoHtml::parse(&html);
        merge_article_content(
            &fragments.body,
            &fragments.head_scripts_links,
            &fragments.head_styles,
        )
    })
    .map_err(|payload| PluginError::Merge {
        path: source.to_path_buf(),
        message: panic_message(payload),
    })
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_content_has_qmd_finds_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog/2024")).unwrap();
        fs::write(dir.path().join("blog/2024/post.qmd"), "x").unwrap();
        assert!(content_has_qmd(dir.path()));
    }

    #[test]
    fn test_content_without_qmd() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("post.md"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        assert!(!content_has_qmd(dir.path()));
    }

    #[test]
    fn test_setup_skips_content_without_qmd() {
        let dir = TempDir::new().unwrap();
        let content_dir = dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(content_dir.join("post.md"), "x").unwrap();

        let settings = Settings::from_paths(&content_dir, "output");
        setup_quarto_project(&settings, Logger::new("quarto")).unwrap();
        assert!(!content_dir.join("_quarto.yml").exists());
    }

    #[test]
    fn test_setup_provisions_project_when_qmd_present() {
        let dir = TempDir::new().unwrap();
        let content_dir = dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(content_dir.join("post.qmd"), "---\ntitle: x\n---\nBody.\n").unwrap();

        let settings = Settings::from_paths(&content_dir, "output");
        setup_quarto_project(&settings, Logger::new("quarto")).unwrap();
        assert!(content_dir.join("_quarto.yml").exists());
    }

    #[test]
    fn test_register_reader_handles_qmd_extension() {
        let settings = Settings::default();
        let (extension, _reader) = register_reader(&settings, Logger::new("reader"));
        assert_eq!(extension, "qmd");
    }

    #[test]
    fn test_inject_skips_non_qmd_articles() {
        let settings = Settings::from_paths("content", "output");
        let mut articles = vec![Article::new("content/post.md", "<p>original</p>")];
        inject_quarto_content(&mut articles, &settings, Logger::new("quarto"));
        assert_eq!(articles[0].content, "<p>original</p>");
    }

    #[test]
    fn test_render_failure_leaves_article_content_untouched() {
        let dir = TempDir::new().unwrap();
        let content_dir = dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();

        let mut settings = Settings::from_paths(&content_dir, "output");
        settings.quarto_command = vec!["quarto-binary-that-does-not-exist".to_string()];

        let source = content_dir.join("post.qmd");
        let mut articles = vec![Article::new(&source, "<p>placeholder</p>")];
        inject_quarto_content(&mut articles, &settings, Logger::new("quarto"));
        assert_eq!(articles[0].content, "<p>placeholder</p>");
    }
}
