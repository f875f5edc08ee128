//! Video notes companion server.
//!
//! Serves the note store to the browser side and renders the notes and
//! dashboard pages. The application is organized into the following modules:
//!
//! - `identity`: page URL → stable video key
//! - `store`: note collections on top of the key-value backend
//! - `dashboard`: per-video summaries across the whole store
//! - `session`: view state and command dispatch
//! - `handlers`: HTTP route handlers

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use video_notes::{handlers, AppState, Config};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("video_notes=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    let bind_addr = config.bind_addr;
    let oembed = config.oembed;
    let state = Arc::new(AppState::new(config).expect("Failed to open database"));

    let app = Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/video/{key}", get(handlers::view_video))
        // Page identity
        .route("/api/page-info", post(handlers::page_info))
        // Notes
        .route(
            "/api/notes/{key}",
            get(handlers::list_notes).post(handlers::add_note),
        )
        .route(
            "/api/notes/{key}/{id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        // Dashboard and commands
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/commands", post(handlers::command))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind address");

    info!("Video notes server running at http://{}", bind_addr);
    if oembed {
        info!("Title lookups: oEmbed ENABLED");
    } else {
        info!("Title lookups: oEmbed disabled (set VIDEO_NOTES_OEMBED=1 to enable)");
    }

    axum::serve(listener, app).await.expect("Server error");
}
