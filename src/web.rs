//! HTTP surface: the home page, article pages and media files.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::site::{Site, SiteError, StoreError};

/// Build the router for a site.
///
/// - `GET /` lists articles
/// - `GET /<article-route>/{slug}` renders one article
/// - `GET /<media-route>/{file}` serves images
pub fn router(site: Arc<Site>) -> Router {
    let article_path = format!("/{}/{{slug}}", site.routes().article);
    let media_path = format!("/{}", site.routes().media);
    let media = ServeDir::new(site.images().images_dir());

    Router::new()
        .route("/", get(index_handler))
        .route(&article_path, get(article_handler))
        .nest_service(&media_path, media)
        .with_state(site)
        .layer(TraceLayer::new_for_http())
}

async fn index_handler(State(site): State<Arc<Site>>) -> Result<Html<String>, PageError> {
    let html = tokio::task::spawn_blocking(move || site.index_page()).await??;
    Ok(Html(html))
}

async fn article_handler(
    State(site): State<Arc<Site>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let html = tokio::task::spawn_blocking(move || site.article_page(&slug)).await??;
    Ok(Html(html))
}

/// Failures converted to a response at the request boundary.
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Site(#[from] SiteError),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            PageError::Site(SiteError::Store(StoreError::NotFound(slug))) => {
                tracing::debug!(%slug, "article not found");
                (StatusCode::NOT_FOUND, "Article not found".to_string())
            }
            PageError::Site(SiteError::Store(
                e @ (StoreError::DirectoryMissing(_) | StoreError::ReadDir { .. }),
            )) => {
                tracing::error!(error = %e, "failed to list articles");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load articles. Check that the articles directory exists. Error: {e}"),
                )
            }
            e => {
                tracing::error!(error = %e, "failed to render page");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to read the article: {e}"),
                )
            }
        };

        (status, body).into_response()
    }
}
