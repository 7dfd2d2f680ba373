//! Frontmatter API server command.

use std::path::Path;

use anyhow::Result;
use wikiplum_server::{ApiConfig, ApiServer, LocalSource, PageSource, RemoteSource};

use crate::config::load_config;

/// Command line overrides for the serve command.
pub struct ServeOptions {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub remote: bool,
    pub site: bool,
}

/// Run the serve command.
pub async fn run(config_path: &Path, options: ServeOptions) -> Result<()> {
    let file_config = load_config(config_path)?;
    let api = file_config.api;

    let source: PageSource = if options.remote || api.remote {
        tracing::info!(
            "Fetching pages from {} (default branch {})",
            api.repo_url,
            api.default_branch
        );
        RemoteSource::new(&api.repo_url, &api.user_agent, &api.default_branch)?.into()
    } else {
        tracing::info!(
            "Reading pages from {}",
            file_config.site.content_dir.display()
        );
        LocalSource::new(&file_config.site.content_dir).into()
    };

    let static_dir = if options.site {
        let dir = file_config.site.build_dir;
        if !dir.exists() {
            anyhow::bail!(
                "Directory not found: {}. Run 'wikiplum build' first.",
                dir.display()
            );
        }
        Some(dir)
    } else {
        None
    };

    let config = ApiConfig {
        host: options.host.unwrap_or(api.host),
        port: options.port.unwrap_or(api.port),
        static_dir,
    };

    ApiServer::new(config, source).start().await?;

    Ok(())
}
