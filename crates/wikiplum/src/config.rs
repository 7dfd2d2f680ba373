//! Configuration file (wikiplum.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use wikiplum_server::source::{DEFAULT_BRANCH, DEFAULT_REPO_URL, DEFAULT_USER_AGENT};
use wikiplum_static::SiteConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    /// Fetch pages from the remote repository
    pub remote: bool,
    /// Raw-content URL with `{branch}` and `{path}` placeholders
    pub repo_url: String,
    pub user_agent: String,
    pub default_branch: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            remote: false,
            repo_url: DEFAULT_REPO_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}
