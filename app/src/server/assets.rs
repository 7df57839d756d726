//! Static file serving for the page (frontend/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "../frontend/"]
struct FrontendAssets;

/// Serve the page for bare `/` requests.
pub async fn index() -> Response {
    serve_embedded::<FrontendAssets>("index.html")
}

/// Fallback handler: serve assets for unmatched paths, JSON 404 under `/api`.
/// Uses `Uri` instead of `Path` because fallback has no capture parameter.
pub async fn fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded::<FrontendAssets>(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    const API_PREFIXES: [&str; 2] = ["/api", "/status"];

    API_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    let (path, asset) = match E::get(path) {
        Some(asset) => (path, Some(asset)),
        None => ("index.html", E::get("index.html")),
    };

    match asset {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
