use axum::extract::State;
use axum::Json;

use super::FlushResponse;
use crate::app::AppState;

/// `POST /v1/flush` — compact everything buffered into digests.
///
/// Always replies 200: per-project write failures keep their events buffered
/// and simply leave the project out of the response list.
pub async fn post_flush(State(state): State<AppState>) -> Json<FlushResponse> {
    let flushed_projects = state.flusher.flush().await;

    tracing::info!(projects = flushed_projects.len(), "flush complete");

    Json(FlushResponse { flushed_projects })
}
