//! Quarto project adapter.
//!
//! Provisions a renderer project configuration for a content tree and
//! invokes the external `quarto` binary as a blocking subprocess. The
//! working directory convention is the content root itself; `_quarto.yml`
//! lives there with its output directory resolved against the content
//! root's parent.

use crate::assets::rewrite_image_sources;
use crate::error::PluginError;
use crate::log::Logger;
use crate::settings::Settings;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the renderer's project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "_quarto.yml";

/// Serialized shape of the generated `_quarto.yml`.
#[derive(Serialize)]
struct ProjectConfig {
    project: ProjectSection,
    format: FormatSection,
}

#[derive(Serialize)]
struct ProjectSection {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "output-dir")]
    output_dir: PathBuf,
}

#[derive(Serialize)]
struct FormatSection {
    html: HtmlFormat,
}

#[derive(Serialize)]
struct HtmlFormat {
    theme: &'static str,
}

/// Adapter for establishing and running the external renderer.
pub struct Quarto {
    content_dir: PathBuf,
    output_dir: PathBuf,
    command: Vec<String>,
    no_cache: bool,
    log: Logger,
}

impl Quarto {
    pub fn new(settings: &Settings, log: Logger) -> Self {
        let content_dir = settings.path.clone();
        let output_dir = if settings.output_path.is_absolute() {
            settings.output_path.clone()
        } else {
            content_dir
                .parent()
                .unwrap_or(Path::new(""))
                .join(&settings.output_path)
        };
        let command = if settings.quarto_command.is_empty() {
            vec!["quarto".to_string()]
        } else {
            settings.quarto_command.clone()
        };

        Self {
            content_dir,
            output_dir,
            command,
            no_cache: settings.no_cache,
            log,
        }
    }

    /// Write `_quarto.yml` unless one already exists.
    ///
    /// An existing file is user-owned configuration and is never touched;
    /// in that case the call only guarantees the content directory exists.
    pub fn ensure_project(&self) -> Result<()> {
        fs::create_dir_all(&self.content_dir).with_context(|| {
            format!(
                "failed to create content directory `{}`",
                self.content_dir.display()
            )
        })?;

        let config_path = self.content_dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            self.log.info(&format!(
                "{PROJECT_CONFIG_FILE} already exists at {}, skipping setup",
                config_path.display()
            ));
            return Ok(());
        }

        let config = ProjectConfig {
            project: ProjectSection {
                kind: "website",
                output_dir: self.output_dir.clone(),
            },
            format: FormatSection {
                html: HtmlFormat { theme: "none" },
            },
        };
        let yaml = serde_yaml::to_string(&config).context("failed to serialize project config")?;
        fs::write(&config_path, yaml)
            .with_context(|| format!("failed to write `{}`", config_path.display()))?;

        self.log.info(&format!(
            "{PROJECT_CONFIG_FILE} created at {}",
            config_path.display()
        ));
        Ok(())
    }

    /// Render one document to HTML via the external renderer.
    ///
    /// The caller receives either usable HTML (stdout, with image paths
    /// re-anchored) or an explicit render failure, never a partial string
    /// and never a panic into the host.
    pub fn render(&self, source: &Path) -> Result<String, PluginError> {
        let output = self
            .render_command(source)
            .output()
            .map_err(|err| PluginError::Render {
                path: source.to_path_buf(),
                message: format!("failed to launch `{}`: {err}", self.binary_name()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PluginError::Render {
                path: source.to_path_buf(),
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        self.log.info("quarto render completed");
        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        rewrite_image_sources(&self.content_dir, source, &html).map_err(|err| {
            PluginError::Render {
                path: source.to_path_buf(),
                message: err.to_string(),
            }
        })
    }

    /// Build `quarto render <source> --output - [--no-cache]`.
    fn render_command(&self, source: &Path) -> Command {
        let mut command = Command::new(&self.command[0]);
        command
            .args(&self.command[1..])
            .arg("render")
            .arg(source)
            .args(["--output", "-"]);
        if self.no_cache {
            command.arg("--no-cache");
        }
        command.current_dir(&self.content_dir);
        command
    }

    /// The renderer executable name.
    pub fn binary_name(&self) -> &str {
        &self.command[0]
    }

    /// True if the renderer binary resolves on `PATH`.
    pub fn is_available(&self) -> bool {
        which::which(self.binary_name()).is_ok()
    }
}
