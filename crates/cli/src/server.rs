//! Read-only HTTP API over an indexed archive: a paginated timeline
//! and single-photo byte serving. Nothing here writes to the store.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use shoebox_core::domain::PhotoRecord;
use shoebox_core::error::Error;
use shoebox_core::Archive;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

type SharedArchive = Arc<Mutex<Archive>>;

pub async fn serve(archive: Archive, port: u16) -> Result<()> {
    let state: SharedArchive = Arc::new(Mutex::new(archive));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/timeline", get(timeline))
        .route("/photo/:id/serve", get(serve_photo))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://localhost:{port}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "Shoebox API is running."
}

#[derive(Deserialize)]
struct TimelineParams {
    page: Option<u32>,
    limit: Option<u32>,
}

/// Missing or zero paging values fall back to the first page of ten.
fn page_params(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    (page.unwrap_or(1).max(1), limit.unwrap_or(10).max(1))
}

async fn timeline(
    State(state): State<SharedArchive>,
    Query(params): Query<TimelineParams>,
) -> std::result::Result<Json<Vec<PhotoRecord>>, (StatusCode, String)> {
    let (page, limit) = page_params(params.page, params.limit);

    let photos = {
        let archive = state.lock().map_err(|_| internal("archive lock poisoned"))?;
        archive
            .timeline(page, limit)
            .map_err(|err| internal(&err.to_string()))?
    };

    Ok(Json(photos))
}

async fn serve_photo(
    State(state): State<SharedArchive>,
    Path(id): Path<i64>,
) -> std::result::Result<Response, (StatusCode, String)> {
    let (file_dir, name) = {
        let archive = state.lock().map_err(|_| internal("archive lock poisoned"))?;
        archive.photo_location(id).map_err(|err| match err {
            Error::PhotoNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            _ => internal(&err.to_string()),
        })?
    };

    let path = std::path::Path::new(&file_dir).join(&name);
    let bytes = tokio::fs::read(&path).await.map_err(|err| {
        (
            StatusCode::NOT_FOUND,
            format!("failed to read {}: {err}", path.display()),
        )
    })?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        bytes,
    )
        .into_response())
}

fn internal(message: &str) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        assert_eq!(page_params(None, None), (1, 10));
    }

    #[test]
    fn test_page_params_passthrough() {
        assert_eq!(page_params(Some(3), Some(25)), (3, 25));
    }

    #[test]
    fn test_page_params_clamps_zero() {
        assert_eq!(page_params(Some(0), Some(0)), (1, 1));
    }
}
