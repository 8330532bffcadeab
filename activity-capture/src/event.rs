use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical activity event. Immutable once built: every field is filled in
/// at the ingestion boundary, so the buffer and the flush engine never have
/// to reason about missing data.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub source: String,
    pub event_type: String,
    pub project_id: String,
    pub user_id: String,
    /// Milliseconds since epoch. The sole ordering and dedup key.
    pub timestamp: i64,
    #[serde(default)]
    pub payload: HashMap<String, Value>,
}

/// Ingress shape of an event: everything optional. Clients send whatever
/// subset they have; adapters produce these with only `source`, `eventType`
/// and `payload` set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub source: Option<String>,
    pub event_type: Option<String>,
    pub project_id: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub payload: HashMap<String, Value>,
}

/// Defaults applied when finalizing a `RawEvent`. The webhook path and the
/// direct-ingest path differ only in the user sentinel they carry.
#[derive(Debug)]
pub struct ProcessingContext<'a> {
    pub now: i64,
    pub default_project: &'a str,
    pub default_user: &'a str,
}

impl RawEvent {
    /// Fill in whatever the client left out. Client-supplied timestamps are
    /// trusted as-is; only absent ones get the ingestion wall-clock.
    pub fn finalize(self, context: &ProcessingContext) -> Event {
        Event {
            source: self.source.unwrap_or_else(|| String::from("unknown")),
            event_type: self.event_type.unwrap_or_else(|| String::from("unknown")),
            project_id: self
                .project_id
                .unwrap_or_else(|| context.default_project.to_string()),
            user_id: self
                .user_id
                .unwrap_or_else(|| context.default_user.to_string()),
            timestamp: self.timestamp.unwrap_or(context.now),
            payload: self.payload,
        }
    }
}
