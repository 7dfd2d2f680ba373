//! Template engine for rendering wiki pages.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use minijinja::{
    context, escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, Value,
};
use wikiplum_md::Frontmatter;

/// A navigation item.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// Link relative to the current page's directory
    pub link: String,
}

/// A page ready to be rendered.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Page {
    /// Page title (source file name without extension)
    pub title: String,
    /// Rendered content HTML
    pub html: String,
    /// Navigation sidebar
    pub sidebar: Vec<NavItem>,
    /// Path from the page's directory back to the site root
    pub rel: String,
    /// Page frontmatter (empty when the page has none)
    pub meta: Frontmatter,
}

/// Errors that can occur when loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid template {name}: {message}")]
    Syntax { name: String, message: String },

    #[error("Failed to render template: {0}")]
    Render(#[from] minijinja::Error),
}

/// Template engine using minijinja.
///
/// Holds a base template and a page template. Pages are rendered through the
/// page template, which usually `{% extends %}` the base one.
pub struct TemplateEngine {
    env: Environment<'static>,
    page_template: String,
}

impl TemplateEngine {
    /// Load the base and page templates from a directory.
    ///
    /// Both files must exist and parse, otherwise loading fails.
    pub fn load(dir: &Path, base: &str, page: &str) -> Result<Self, TemplateError> {
        let base_source = read_template(&dir.join(base))?;
        let page_source = read_template(&dir.join(page))?;

        Self::from_sources(base, base_source, page, page_source)
    }

    /// Build an engine from in-memory template sources.
    pub fn from_sources(
        base_name: &str,
        base_source: String,
        page_name: &str,
        page_source: String,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);

        for (name, source) in [(base_name, base_source), (page_name, page_source)] {
            env.add_template_owned(name.to_string(), source)
                .map_err(|e| TemplateError::Syntax {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self {
            env,
            page_template: page_name.to_string(),
        })
    }

    /// Render a page with the page template.
    ///
    /// The page HTML is passed through unescaped; every other field is
    /// escaped by the template.
    pub fn render_page(&self, page: &Page) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(&self.page_template)?;

        let html = tmpl.render(context! {
            title => &page.title,
            html => Value::from_safe_string(page.html.clone()),
            sidebar => &page.sidebar,
            rel => &page.rel,
            meta => &page.meta,
        })?;

        Ok(html)
    }
}

/// HTML-escape interpolated strings, leaving `/` as is so links and paths
/// stay readable. Everything else goes through minijinja's default formatter.
fn html_formatter(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> Result<(), minijinja::Error> {
    match value.as_str() {
        Some(s) if !value.is_safe() && matches!(state.auto_escape(), AutoEscape::Html) => {
            out.write_str(&html_escape::encode_quoted_attribute(s))
                .map_err(|e| minijinja::Error::new(ErrorKind::WriteFailure, e.to_string()))
        }
        _ => escape_formatter(out, state, value),
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|e| TemplateError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
