//! Embed Quarto documents into a static-site content pipeline.
//!
//! The host generator is treated as a black box: it hands this crate a
//! document path and a settings view, and reads back a content string and a
//! metadata mapping. Everything renderer-specific lives here:
//!
//! - [`Quarto`] provisions a renderer project and invokes `quarto render`
//! - [`QuartoHtml`] decomposes rendered HTML into named fragments
//! - [`merge_article_content`](html::merge::merge_article_content) strips
//!   the renderer's title-block chrome and recombines the fragments
//! - [`QmdReader`] parses front matter and renders the Markdown body
//! - [`pipeline`] exposes the three hooks the host wires into its build

pub mod adapter;
pub mod assets;
pub mod error;
pub mod host;
pub mod html;
pub mod log;
pub mod pipeline;
pub mod reader;
pub mod settings;

pub use adapter::Quarto;
pub use error::PluginError;
pub use host::{Article, Author, Category, Metadata, MetadataValue};
pub use html::fragments::QuartoHtml;
pub use log::Logger;
pub use pipeline::{inject_quarto_content, register_reader, setup_quarto_project};
pub use reader::QmdReader;
pub use settings::Settings;

/// File extension handled by this pipeline.
pub const QUARTO_EXTENSION: &str = "qmd";
