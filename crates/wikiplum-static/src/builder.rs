//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;
use walkdir::WalkDir;

use wikiplum_md::{extract_frontmatter, render_markdown};

use crate::assets::{copy_static, CopyError};
use crate::paths::{html_path, is_markdown, path_to_root};
use crate::sidebar::{SidebarError, SidebarIndex};
use crate::templates::{Page, TemplateEngine, TemplateError};

/// Configuration for building a site.
///
/// Every field has a default matching the conventional project layout, so an
/// empty `[site]` table builds `content/` into `build/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Markdown source directory (default `content`)
    pub content_dir: PathBuf,

    /// Output directory (default `build`)
    pub build_dir: PathBuf,

    /// Directory holding the templates (default `templates`)
    pub templates_dir: PathBuf,

    /// Base template file name (default `base.html`)
    pub base_template: String,

    /// Page template file name (default `page.html`)
    pub page_template: String,

    /// Name of the root page, kept out of every sidebar (default `index`)
    pub root_page: String,

    /// Static assets directory (default `static`)
    pub static_dir: PathBuf,

    /// Subdirectory of the output that receives static assets (default `static`)
    pub static_output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            build_dir: PathBuf::from("build"),
            templates_dir: PathBuf::from("templates"),
            base_template: "base.html".to_string(),
            page_template: "page.html".to_string(),
            root_page: "index".to_string(),
            static_dir: PathBuf::from("static"),
            static_output: PathBuf::from("static"),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of static files copied
    pub static_files: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error(transparent)]
    Sidebar(#[from] SidebarError),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error(transparent)]
    Copy(#[from] CopyError),
}

/// Static site builder.
///
/// Pages are processed one at a time in directory-walk order; the first
/// failure stops the build.
pub struct SiteBuilder {
    config: SiteConfig,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a builder, loading the base and page templates.
    pub fn new(config: SiteConfig) -> Result<Self, BuildError> {
        let templates = TemplateEngine::load(
            &config.templates_dir,
            &config.base_template,
            &config.page_template,
        )?;

        Ok(Self::with_templates(config, templates))
    }

    /// Create a builder around an already loaded template engine.
    pub fn with_templates(config: SiteConfig, templates: TemplateEngine) -> Self {
        Self { config, templates }
    }

    /// Build every page, then copy static assets.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let pages = self.build_pages()?;
        let static_files = self.copy_static()?;

        Ok(BuildResult {
            pages,
            static_files,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.build_dir.clone(),
        })
    }

    /// Render every markdown file under the content directory.
    ///
    /// Returns the number of pages written.
    pub fn build_pages(&self) -> Result<usize, BuildError> {
        let content_dir = &self.config.content_dir;

        if !content_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Content directory not found: {}",
                content_dir.display()
            )));
        }

        let sidebar = SidebarIndex::scan(content_dir, &self.config.root_page)?;
        tracing::debug!("Sidebar has {} entries", sidebar.pages().len());

        let mut pages = 0;

        for entry in WalkDir::new(content_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;

            if entry.file_type().is_dir() || !is_markdown(entry.path()) {
                continue;
            }

            let output_path = self.build_page(entry.path(), &sidebar)?;
            tracing::debug!(
                "Built {} -> {}",
                entry.path().display(),
                output_path.display()
            );

            pages += 1;
        }

        Ok(pages)
    }

    /// Copy the static directory into the output tree.
    pub fn copy_static(&self) -> Result<usize, BuildError> {
        let dst = self.config.build_dir.join(&self.config.static_output);
        let copied = copy_static(&self.config.static_dir, &dst)?;

        tracing::debug!("Copied {} static files to {}", copied, dst.display());

        Ok(copied)
    }

    /// Output path for a source path relative to the content directory.
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        self.config.build_dir.join(html_path(relative))
    }

    /// Build a single page and return the path it was written to.
    fn build_page(&self, source_path: &Path, sidebar: &SidebarIndex) -> Result<PathBuf, BuildError> {
        let relative = source_path
            .strip_prefix(&self.config.content_dir)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", source_path.display(), e)))?;

        let output_path = self.output_path(relative);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        let source = fs::read(source_path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", source_path.display(), e)))?;

        let page_dir = relative.parent().unwrap_or(Path::new(""));

        let page = Page {
            title: page_title(relative),
            html: render_markdown(&source),
            sidebar: sidebar.for_page(relative),
            rel: path_to_root(page_dir),
            meta: extract_frontmatter(&source).unwrap_or_default(),
        };

        let rendered = self.templates.render_page(&page)?;

        fs::write(&output_path, rendered).map_err(|e| {
            BuildError::WriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(output_path)
    }
}

/// Page title: the source file name without its extension.
fn page_title(relative: &Path) -> String {
    relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
