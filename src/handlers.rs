//! HTTP route handlers.
//!
//! JSON routes under `/api` mirror the core operations one to one; the two
//! HTML routes render the notes page of one video and the dashboard.

use crate::error::Error;
use crate::format::format_duration;
use crate::identity;
use crate::messages::Command;
use crate::models::{Note, NoteCollection, NoteMeta, PageContext, PageInfo, PageKey, VideoSummary};
use crate::page_info::PageInfoSource;
use crate::session::Outcome;
use crate::templates::{render_dashboard_page, render_notes_page};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

type ApiResult<T> = Result<Json<T>, Error>;

// ============================================================================
// Error Mapping
// ============================================================================

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Request(_) => StatusCode::BAD_GATEWAY,
            Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(status = %status, error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}

// ============================================================================
// Page Info
// ============================================================================

/// POST /api/page-info - answer `getPageInfo` and remember the page as live.
pub async fn page_info(
    State(state): State<Arc<AppState>>,
    Json(context): Json<PageContext>,
) -> Json<PageInfo> {
    let info = identity::page_info(&context);
    state.live_page.report(context.clone()).await;
    state.session.lock().await.set_page(context);
    Json(info)
}

// ============================================================================
// Notes API
// ============================================================================

#[derive(Serialize)]
pub struct NoteView {
    #[serde(flatten)]
    pub note: Note,
    /// `timestamp` as shown to the user
    pub formatted: String,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            formatted: format_duration(note.timestamp),
            note,
        }
    }
}

#[derive(Deserialize)]
pub struct AddNoteRequest {
    pub timestamp: u64,
    #[serde(flatten)]
    pub meta: NoteMeta,
}

#[derive(Deserialize)]
pub struct UpdateNoteRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct UpdateNoteResponse {
    pub updated: bool,
}

/// GET /api/notes/{key}
pub async fn list_notes(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<NoteView>> {
    let notes = state.store.list(&PageKey::from(key)).await?;
    Ok(Json(notes.into_vec().into_iter().map(NoteView::from).collect()))
}

/// POST /api/notes/{key}
pub async fn add_note(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddNoteRequest>,
) -> ApiResult<Note> {
    let note = state
        .store
        .append(&PageKey::from(key), req.timestamp, req.meta)
        .await?;
    Ok(Json(note))
}

/// GET /api/notes/{key}/{id}
pub async fn get_note(
    Path((key, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.store.get(&PageKey::from(key), &id).await {
        Ok(Some(note)) => Json(note).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Note not found").into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /api/notes/{key}/{id}
pub async fn update_note(
    Path((key, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<UpdateNoteResponse> {
    let updated = state
        .store
        .update(&PageKey::from(key), &id, &req.text)
        .await?;
    Ok(Json(UpdateNoteResponse { updated }))
}

/// DELETE /api/notes/{key}/{id}
pub async fn delete_note(
    Path((key, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<NoteCollection> {
    let remaining = state.store.remove(&PageKey::from(key), &id).await?;
    Ok(Json(remaining))
}

// ============================================================================
// Dashboard and Commands
// ============================================================================

/// GET /api/dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Vec<VideoSummary>> {
    Ok(Json(state.dashboard.build_summaries().await?))
}

/// POST /api/commands
pub async fn command(
    State(state): State<Arc<AppState>>,
    Json(command): Json<Command>,
) -> ApiResult<Outcome> {
    let outcome = state.session.lock().await.dispatch(command).await?;
    Ok(Json(outcome))
}

// ============================================================================
// HTML Pages
// ============================================================================

/// GET / - dashboard of every video with notes
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, Error> {
    let videos = state.dashboard.build_summaries().await?;
    let current = state.live_page.current_key().await;
    Ok(Html(render_dashboard_page(
        &videos,
        current.as_ref().map(|k| k.as_str()),
    )))
}

/// GET /video/{key} - notes of one video
pub async fn view_video(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, Error> {
    let key = PageKey::from(key);
    let notes = state.store.list(&key).await?;
    let url = notes.first_url().unwrap_or_default().to_string();

    let title = match notes.first_title() {
        Some(t) => t.to_string(),
        None => state
            .live_page
            .title_for(&key, Some(&url))
            .await
            .unwrap_or_else(|| identity::PLACEHOLDER_TITLE.to_string()),
    };

    Ok(Html(render_notes_page(&key, &title, &url, &notes)))
}
