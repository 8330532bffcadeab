mod events;
mod flush;
mod static_assets;
mod webhooks;

pub use events::post_event;
pub use flush::post_flush;
pub use static_assets::serve_asset;
pub use webhooks::post_webhook;

use serde::{Deserialize, Serialize};

/// Acknowledgement body for both ingestion endpoints.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AckResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlushResponse {
    pub flushed_projects: Vec<String>,
}
