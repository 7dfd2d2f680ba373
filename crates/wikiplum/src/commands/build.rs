//! Static site build command.

use std::path::Path;

use anyhow::{Context, Result};
use wikiplum_static::{BuildError, SiteBuilder};

use crate::config::load_config;

/// Run the build command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?.site;

    tracing::info!(
        "Building {} into {}...",
        config.content_dir.display(),
        config.build_dir.display()
    );

    let builder = SiteBuilder::new(config).context("error loading templates")?;

    let result = builder.build().map_err(|e| {
        let phase = match e {
            BuildError::Copy(_) => "error copying static files",
            _ => "error building site",
        };
        anyhow::Error::new(e).context(phase)
    })?;

    tracing::info!(
        "Built {} pages and copied {} static files in {}ms",
        result.pages,
        result.static_files,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    /// A project with one page, templates and a static directory, plus a
    /// config file pointing at all of it.
    fn project() -> (TempDir, PathBuf) {
        let temp = tempdir().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("content")).unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("static")).unwrap();
        fs::write(root.join("content/index.md"), "# Home").unwrap();
        fs::write(root.join("templates/base.html"), "{% block content %}{% endblock %}").unwrap();
        fs::write(
            root.join("templates/page.html"),
            r#"{% extends "base.html" %}{% block content %}{{ html }}{% endblock %}"#,
        )
        .unwrap();
        fs::write(root.join("static/style.css"), "body {}").unwrap();

        let config = format!(
            "[site]\ncontent_dir = '{}'\nbuild_dir = '{}'\ntemplates_dir = '{}'\nstatic_dir = '{}'\n",
            root.join("content").display(),
            root.join("build").display(),
            root.join("templates").display(),
            root.join("static").display(),
        );
        let config_path = root.join("wikiplum.toml");
        fs::write(&config_path, config).unwrap();

        (temp, config_path)
    }

    #[test]
    fn builds_project() {
        let (temp, config_path) = project();

        run(&config_path).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("build/index.html")).unwrap(),
            "<h1>Home</h1>\n"
        );
        assert!(temp.path().join("build/static/style.css").is_file());
    }

    #[test]
    fn reports_template_failure() {
        let (temp, config_path) = project();
        fs::remove_file(temp.path().join("templates/page.html")).unwrap();

        let err = run(&config_path).unwrap_err();

        assert_eq!(err.to_string(), "error loading templates");
    }

    #[test]
    fn reports_page_failure() {
        let (temp, config_path) = project();
        fs::remove_dir_all(temp.path().join("content")).unwrap();

        let err = run(&config_path).unwrap_err();

        assert_eq!(err.to_string(), "error building site");
    }

    #[test]
    fn reports_static_copy_failure() {
        let (temp, config_path) = project();
        fs::remove_dir_all(temp.path().join("static")).unwrap();

        let err = run(&config_path).unwrap_err();

        assert_eq!(err.to_string(), "error copying static files");
        assert!(temp.path().join("build/index.html").is_file());
    }
}
