//! HTTP server implementation with range request support

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Form, Json, Router,
};
use library::MediaRoot;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::pages;
use crate::state::ServerState;
use crate::stream::{open_stream, MediaStream};

/// File server API for managing the HTTP server
#[derive(Clone)]
pub struct FileServerApi {
    state: ServerState,
}

/// Search text submitted from the listing page or the query string
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// JSON listing returned by `/api/media`
#[derive(Debug, Serialize)]
pub struct MediaListing {
    pub query: Option<String>,
    pub count: usize,
    pub files: Vec<String>,
}

impl FileServerApi {
    /// Create a new file server API
    ///
    /// # Arguments
    /// * `root` - Media root every listing and stream is confined to
    pub fn new(root: MediaRoot) -> Self {
        Self {
            state: ServerState::new(root),
        }
    }

    /// Create the axum router with all routes configured
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index).post(search))
            .route("/watch/*filename", get(watch))
            .route("/stream/*filename", get(stream_file))
            .route("/api/media", get(api_media))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Start the file server and run until Ctrl-C
    ///
    /// # Arguments
    /// * `host` - Host to bind to (e.g., "0.0.0.0")
    /// * `port` - Port to bind to (e.g., 8000)
    pub async fn serve(self, host: &str, port: u16) -> crate::Result<()> {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!(
            "File server listening on {} (root: {})",
            listener.local_addr()?,
            self.state.root_path().display()
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("File server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

/// Health check endpoint
async fn health_check(State(state): State<ServerState>) -> Result<impl IntoResponse, AppError> {
    let media_count = state.list_media(None).await?.len();
    Ok((
        StatusCode::OK,
        format!("File server running. Media files: {}", media_count),
    ))
}

/// Library listing, filtered by `?search=`
async fn index(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    render_listing(&state, params.search).await
}

/// Library listing, filtered by the submitted search form
async fn search(
    State(state): State<ServerState>,
    Form(params): Form<SearchParams>,
) -> Result<Html<String>, AppError> {
    render_listing(&state, params.search).await
}

async fn render_listing(
    state: &ServerState,
    query: Option<String>,
) -> Result<Html<String>, AppError> {
    let entries = state.list_media(query.clone()).await?;
    Ok(Html(pages::render_index(
        &entries,
        query.as_deref().unwrap_or_default(),
    )))
}

/// Player page for one file
async fn watch(Path(filename): Path<String>) -> Html<String> {
    Html(pages::render_player(&filename))
}

/// Stream file handler with range request support
async fn stream_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<MediaStream, AppError> {
    // A non-ASCII value cannot be a byte range, let the parser reject it
    let range = headers
        .get(header::RANGE)
        .map(|value| value.to_str().unwrap_or_default());

    open_stream(state.shared_root(), &filename, range).await
}

/// JSON listing for scripted clients
async fn api_media(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MediaListing>, AppError> {
    let files = state.list_media(params.search.clone()).await?;
    Ok(Json(MediaListing {
        query: params.search,
        count: files.len(),
        files,
    }))
}
