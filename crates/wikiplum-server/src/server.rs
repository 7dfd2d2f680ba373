//! Frontmatter API server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use wikiplum_md::extract_frontmatter;

use crate::source::{FetchError, PageSource};

/// Body of the 404 returned for an empty page path.
pub const NOT_FOUND_MESSAGE: &str = "not found";

/// Body of the 404 returned when the page does not exist.
pub const FILE_NOT_FOUND_MESSAGE: &str = "file not found";

/// Body of every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Built site to serve next to the API, if any
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),
}

/// Frontmatter API server.
pub struct ApiServer {
    config: ApiConfig,
    source: PageSource,
}

impl ApiServer {
    /// Create a new API server.
    pub fn new(config: ApiConfig, source: PageSource) -> Self {
        Self { config, source }
    }

    /// Start serving until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let host_port = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = host_port
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::InvalidAddress(host_port.clone(), e.to_string())
            })?;

        let mut app = router(self.source);

        if let Some(dir) = &self.config.static_dir {
            tracing::info!("Serving site from {}", dir.display());
            app = app.fallback_service(ServeDir::new(dir));
        }

        let app = app.layer(TraceLayer::new_for_http());

        tracing::info!("Starting API server at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the API router for a page source.
pub fn router(source: PageSource) -> Router {
    Router::new()
        .route("/api", get(empty_path_handler))
        .route("/api/", get(empty_path_handler))
        .route("/api/{*path}", get(frontmatter_handler))
        .with_state(Arc::new(source))
}

/// Handler for `/api/` with no page path.
async fn empty_path_handler() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
}

/// Handler returning a page's frontmatter as JSON.
async fn frontmatter_handler(
    State(source): State<Arc<PageSource>>,
    Path(path): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    if path.is_empty() {
        return (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response();
    }

    // First `branch` wins when repeated; an empty one means the default.
    let branch = query
        .iter()
        .find(|(key, _)| key == "branch")
        .map(|(_, value)| value.as_str())
        .filter(|b| !b.is_empty());

    match source.fetch(&path, branch).await {
        Ok(content) => {
            let frontmatter = extract_frontmatter(&content).unwrap_or_default();
            Json(frontmatter).into_response()
        }
        Err(FetchError::NotFound) => {
            (StatusCode::NOT_FOUND, FILE_NOT_FOUND_MESSAGE).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load page {}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LocalSource, RemoteSource, DEFAULT_BRANCH, DEFAULT_USER_AGENT};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Request};
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    async fn get_page(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    fn local_app() -> (TempDir, Router) {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(content.join("guide")).unwrap();
        fs::write(content.join("plum.md"), "---\ntitle: Plum\nauthor: ume\n---\n# Plum").unwrap();
        fs::write(content.join("guide/setup.md"), "---\ntitle: Setup\n---\n").unwrap();
        fs::write(content.join("plain.md"), "# No metadata").unwrap();
        fs::write(content.join("broken.md"), "---\nbroken: [unclosed\n---\nBody").unwrap();
        fs::create_dir_all(content.join("folder.md")).unwrap();

        let app = router(LocalSource::new(content).into());
        (temp, app)
    }

    #[tokio::test]
    async fn returns_frontmatter_json() {
        let (_temp, app) = local_app();

        let (status, content_type, body) = get_page(app, "/api/plum").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({ "title": "Plum", "author": "ume" })
        );
    }

    #[tokio::test]
    async fn resolves_nested_paths() {
        let (_temp, app) = local_app();

        let (status, _, body) = get_page(app, "/api/guide/setup").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"title":"Setup"}"#);
    }

    #[tokio::test]
    async fn pages_without_frontmatter_return_empty_object() {
        let (_temp, app) = local_app();

        let (status, _, body) = get_page(app.clone(), "/api/plain").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");

        let (status, _, body) = get_page(app, "/api/broken").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn empty_path_is_not_found() {
        let (_temp, app) = local_app();

        let (status, _, body) = get_page(app, "/api/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn missing_page_is_file_not_found() {
        let (_temp, app) = local_app();

        let (status, _, body) = get_page(app, "/api/missing-page").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, FILE_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn read_failures_are_internal_errors() {
        let (_temp, app) = local_app();

        let (status, _, body) = get_page(app, "/api/folder").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, INTERNAL_ERROR_MESSAGE);
    }

    /// Serve `<branch>/content/<path>` from a fixed set of pages, checking
    /// the user agent on every request.
    async fn spawn_upstream() -> String {
        async fn raw(
            Path((branch, path)): Path<(String, String)>,
            headers: HeaderMap,
        ) -> Response {
            let agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());
            if agent != Some(DEFAULT_USER_AGENT) {
                return StatusCode::FORBIDDEN.into_response();
            }

            match (branch.as_str(), path.as_str()) {
                ("main", "plum.md") => "---\ntitle: Plum\n---\n".into_response(),
                ("dev", "plum.md") => "---\ntitle: Plum (dev)\n---\n".into_response(),
                ("main", "flaky.md") => StatusCode::BAD_GATEWAY.into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }

        let app = Router::new().route("/{branch}/content/{*path}", get(raw));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/{{branch}}/content/{{path}}", addr)
    }

    async fn remote_app() -> Router {
        let template = spawn_upstream().await;
        let source = RemoteSource::new(template, DEFAULT_USER_AGENT, DEFAULT_BRANCH).unwrap();
        router(source.into())
    }

    #[tokio::test]
    async fn fetches_remote_default_branch() {
        let app = remote_app().await;

        let (status, _, body) = get_page(app.clone(), "/api/plum").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"title":"Plum"}"#);

        let (status, _, body) = get_page(app, "/api/plum?branch=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"title":"Plum"}"#);
    }

    #[tokio::test]
    async fn fetches_remote_named_branch() {
        let app = remote_app().await;

        let (status, _, body) = get_page(app, "/api/plum?branch=dev").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"title":"Plum (dev)"}"#);
    }

    #[tokio::test]
    async fn repeated_branch_uses_first() {
        let app = remote_app().await;

        let (status, _, body) = get_page(app.clone(), "/api/plum?branch=dev&branch=main").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"title":"Plum (dev)"}"#);

        let (status, _, body) = get_page(app, "/api/plum?other=1&branch=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"title":"Plum"}"#);
    }

    #[tokio::test]
    async fn remote_missing_page_is_file_not_found() {
        let app = remote_app().await;

        let (status, _, body) = get_page(app, "/api/missing-page").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, FILE_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn remote_failures_are_internal_errors() {
        let app = remote_app().await;

        let (status, _, body) = get_page(app, "/api/flaky").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = ApiServer::new(ApiConfig::default(), LocalSource::new("content").into());
        assert_eq!(server.config.port, 8080);
    }
}
