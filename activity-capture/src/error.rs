use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to parse event body")]
    InvalidJson(serde_json::Error),

    #[error("failed to parse webhook body")]
    InvalidWebhookPayload(serde_json::Error),

    #[error("no adapter registered for source: {0}")]
    UnknownSource(String),

    #[error("asset not found")]
    AssetNotFound,

    #[error("failed to read asset")]
    AssetRead(std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Wire bodies are a fixed contract with the clients; detail stays in
        // the logs.
        let (status, message) = match &self {
            AppError::InvalidJson(_) => (StatusCode::BAD_REQUEST, "Invalid JSON"),
            AppError::InvalidWebhookPayload(_) => {
                (StatusCode::BAD_REQUEST, "Invalid Webhook Payload")
            }
            AppError::UnknownSource(_) => (StatusCode::BAD_REQUEST, "Unknown source"),
            AppError::AssetNotFound => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::AssetRead(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };

        tracing::debug!(error = ?self, status = %status, "request rejected");

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;

    #[test]
    fn unknown_source_maps_to_bad_request() {
        let response = AppError::UnknownSource("jira".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn asset_errors_map_to_404_and_500() {
        assert_eq!(
            AppError::AssetNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        let io = std::io::Error::other("boom");
        assert_eq!(
            AppError::AssetRead(io).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
