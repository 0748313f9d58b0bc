use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Built frontend bundle served for every non-API path.
#[derive(Clone)]
pub(crate) struct StaticAssets {
    root: Arc<PathBuf>,
}

impl StaticAssets {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Maps a request path onto the bundle, refusing anything that would
    /// escape the root directory.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = Path::new(request_path.trim_start_matches('/'));
        let mut resolved = self.root.as_ref().clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }

    fn index(&self) -> PathBuf {
        self.root.join("index.html")
    }
}

pub(crate) async fn static_fallback(
    Extension(assets): Extension<StaticAssets>,
    uri: Uri,
) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        let payload = json!({ "message": format!("No API route for {path}") });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    }

    if let Some(file) = assets.resolve(path) {
        if is_file(&file).await {
            return serve_file(&file).await;
        }
    }

    let index = assets.index();
    if is_file(&index).await {
        return serve_file(&index).await;
    }

    warn!(
        root = %assets.root.display(),
        "index.html not found; build the frontend into the public directory"
    );
    let payload = json!({ "message": "Frontend application not found." });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read static asset");
            let payload = json!({ "error": "static asset unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
