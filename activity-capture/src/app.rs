use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::adapters::AdapterRegistry;
use crate::buffer::EventBuffer;
use crate::flush::FlushEngine;
use crate::handlers;
use crate::time::TimeSource;

#[derive(Clone)]
pub struct AppState {
    pub buffer: Arc<EventBuffer>,
    pub adapters: Arc<AdapterRegistry>,
    pub flusher: Arc<FlushEngine>,
    pub timesource: Arc<dyn TimeSource + Send + Sync>,
    pub default_webhook_project: String,
    pub static_root: PathBuf,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", post(handlers::post_event))
        .route("/v1/webhooks/:source", post(handlers::post_webhook))
        .route("/v1/flush", post(handlers::post_flush))
        .route("/_liveness", get(liveness))
        // Everything else is the dashboard: static assets by path.
        .fallback(handlers::serve_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "ok"
}
