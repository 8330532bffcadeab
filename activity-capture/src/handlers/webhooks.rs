use axum::extract::{Path, State};
use axum::Json;
use bytes::Bytes;
use metrics::counter;
use serde_json::Value;

use super::AckResponse;
use crate::app::AppState;
use crate::error::AppError;
use crate::event::ProcessingContext;

/// Events produced by webhooks carry this sentinel instead of a real user.
const WEBHOOK_USER: &str = "webhook";

/// `POST /v1/webhooks/{source}` — normalize an external payload through the
/// adapter registered for `source`.
///
/// An adapter declining the payload is a success with nothing buffered; the
/// sender cannot (and should not) tell the difference.
pub async fn post_webhook(
    State(state): State<AppState>,
    Path(source): Path<String>,
    body: Bytes,
) -> Result<Json<AckResponse>, AppError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(AppError::InvalidWebhookPayload)?;

    let normalized = state.adapters.normalize(&source, &payload).map_err(|err| {
        counter!("capture_webhooks_unknown_source_total").increment(1);
        err
    })?;

    let Some(raw) = normalized else {
        tracing::debug!(source = %source, "webhook payload ignored by adapter");
        counter!("capture_webhooks_ignored_total").increment(1);
        return Ok(Json(AckResponse { ok: true }));
    };

    let context = ProcessingContext {
        now: state.timesource.now_millis(),
        default_project: &state.default_webhook_project,
        default_user: WEBHOOK_USER,
    };
    let event = raw.finalize(&context);

    tracing::debug!(
        source = %event.source,
        event_type = %event.event_type,
        project_id = %event.project_id,
        "buffered webhook event"
    );
    counter!("capture_webhooks_received_total").increment(1);
    state.buffer.append(event);

    Ok(Json(AckResponse { ok: true }))
}
