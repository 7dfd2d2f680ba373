//! Where the API loads markdown pages from.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use reqwest::StatusCode;

/// Raw-content URL of the public repository, with `{branch}` and `{path}`
/// placeholders.
pub const DEFAULT_REPO_URL: &str =
    "https://raw.githubusercontent.com/starillume/wikiplum/refs/heads/{branch}/content/{path}";

/// User agent sent with every remote request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:109.0) Gecko/20100101 Firefox/111.0";

/// Branch used when a request does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Errors that can occur when loading a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("file not found")]
    NotFound,

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// A source of markdown pages, addressed by path without the `.md` suffix.
#[derive(Debug, Clone)]
pub enum PageSource {
    Local(LocalSource),
    Remote(RemoteSource),
}

impl PageSource {
    /// Load the raw bytes of `<path>.md`.
    ///
    /// `branch` only matters for the remote source.
    pub async fn fetch(&self, path: &str, branch: Option<&str>) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Local(source) => source.fetch(path).await,
            Self::Remote(source) => source.fetch(path, branch).await,
        }
    }
}

impl From<LocalSource> for PageSource {
    fn from(source: LocalSource) -> Self {
        Self::Local(source)
    }
}

impl From<RemoteSource> for PageSource {
    fn from(source: RemoteSource) -> Self {
        Self::Remote(source)
    }
}

/// Pages read from a content directory on disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    content_dir: PathBuf,
}

impl LocalSource {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Read `<content_dir>/<path>.md`.
    ///
    /// Paths that climb out of the content directory are reported as missing.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let relative = PathBuf::from(format!("{}.md", path));
        if !stays_inside(&relative) {
            return Err(FetchError::NotFound);
        }

        let file = self.content_dir.join(relative);

        tokio::fs::read(&file).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound,
            _ => FetchError::Read {
                path: file.display().to_string(),
                message: e.to_string(),
            },
        })
    }
}

fn stays_inside(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Pages fetched from a branch of the remote repository.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    url_template: String,
    default_branch: String,
}

impl RemoteSource {
    /// Create a remote source.
    ///
    /// `url_template` must contain `{branch}` and `{path}` placeholders.
    pub fn new(
        url_template: impl Into<String>,
        user_agent: &str,
        default_branch: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url_template: url_template.into(),
            default_branch: default_branch.into(),
        })
    }

    /// Raw-content URL of `<path>.md` on `branch`, or the default branch.
    pub fn url(&self, path: &str, branch: Option<&str>) -> String {
        let branch = branch.unwrap_or(&self.default_branch);

        self.url_template
            .replace("{branch}", branch)
            .replace("{path}", &format!("{}.md", path))
    }

    /// Fetch `<path>.md` from the remote repository.
    ///
    /// A 404 from upstream is [`FetchError::NotFound`]; any other non-success
    /// status is a request failure.
    pub async fn fetch(&self, path: &str, branch: Option<&str>) -> Result<Vec<u8>, FetchError> {
        let url = self.url(path, branch);
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(request_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }

        let body = response
            .error_for_status()
            .map_err(request_error)?
            .bytes()
            .await
            .map_err(request_error)?;

        Ok(body.to_vec())
    }
}
