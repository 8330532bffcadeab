use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use metrics::counter;

use super::AckResponse;
use crate::app::AppState;
use crate::error::AppError;
use crate::event::{ProcessingContext, RawEvent};

/// `POST /v1/events` — direct ingestion of an already-canonical event.
///
/// The only enrichment here is defaulting: a missing timestamp gets the
/// ingestion wall-clock, missing project/user fall back so no buffered event
/// is ever without them.
pub async fn post_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AckResponse>), AppError> {
    let raw: RawEvent = serde_json::from_slice(&body).map_err(AppError::InvalidJson)?;

    let context = ProcessingContext {
        now: state.timesource.now_millis(),
        default_project: &state.default_webhook_project,
        default_user: "anonymous",
    };
    let event = raw.finalize(&context);

    tracing::debug!(
        source = %event.source,
        event_type = %event.event_type,
        project_id = %event.project_id,
        "buffered event"
    );
    counter!("capture_events_received_total").increment(1);
    state.buffer.append(event);

    Ok((StatusCode::ACCEPTED, Json(AckResponse { ok: true })))
}
