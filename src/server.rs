//! Static host for the web build
//!
//! Serves the built game (index.html, wasm, JS glue) from a directory and
//! answers a liveness probe. The game itself never talks to this server.

use std::net::SocketAddr;
use std::path::Path;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

/// Port used when `PORT` is unset or malformed
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Routes: `/health`, `/` (index.html) and every other path as a file
/// under `root`
pub fn router(root: impl AsRef<Path>) -> Router {
    let root = root.as_ref();
    Router::new()
        .route("/health", get(health))
        .route_service("/", ServeFile::new(root.join("index.html")))
        .fallback_service(ServeDir::new(root))
}

/// Parse a `PORT` value, falling back to the default
pub fn parse_port(value: Option<&str>) -> u16 {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed PORT {:?}, using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}

/// Bind on all interfaces and serve until the process is stopped
pub async fn serve(root: impl AsRef<Path>, port: u16) -> std::io::Result<()> {
    let root = root.as_ref();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    log::info!("Serving {} on http://{}", root.display(), addr);
    axum::serve(listener, router(root)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn web_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "flappy-serve-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<canvas id=\"canvas\"></canvas>").unwrap();
        std::fs::write(dir.join("flappy.js"), "export default 1;").unwrap();
        dir
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(web_root("health"));
        let (status, body) = get_body(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let app = router(web_root("index"));
        let (status, body) = get_body(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&body).contains("canvas"));
    }

    #[tokio::test]
    async fn test_serves_files_by_path() {
        let app = router(web_root("files"));
        let (status, body) = get_body(app, "/flappy.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"export default 1;");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let app = router(web_root("missing"));
        let (status, _) = get_body(app, "/nope.wasm").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("9000")), 9000);
        assert_eq!(parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("70000")), DEFAULT_PORT);
    }
}
