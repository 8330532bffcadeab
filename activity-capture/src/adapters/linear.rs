//! Linear issue-tracker webhooks. Only `Issue` events are recorded: creation
//! always, updates only when the status changed. Everything else is noise for
//! a project digest and maps to `None`.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::event::RawEvent;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinearWebhook {
    action: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    data: Option<LinearIssue>,
    updated_from: Option<UpdatedFrom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinearIssue {
    id: Option<String>,
    identifier: String,
    title: String,
    url: String,
    description: Option<String>,
    state: Option<LinearState>,
}

#[derive(Debug, Deserialize)]
struct LinearState {
    name: String,
}

/// Linear includes the previous values of changed fields here; a present
/// `stateId` is what distinguishes a status transition from any other edit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedFrom {
    state_id: Option<Value>,
}

pub(super) fn normalize(payload: &Value) -> Option<RawEvent> {
    let webhook: LinearWebhook = serde_json::from_value(payload.clone()).ok()?;

    if webhook.kind.as_deref() != Some("Issue") {
        return None;
    }
    let issue = webhook.data?;

    match webhook.action.as_deref() {
        Some("create") => {
            let mut text = format!(
                "Issue Created: [{}] {}\n{}",
                issue.identifier, issue.title, issue.url
            );
            if let Some(description) = issue.description.as_deref() {
                if !description.is_empty() {
                    text.push_str("\n\n");
                    text.push_str(description);
                }
            }
            Some(plan_event("plan-create", text, issue))
        }
        Some("update") => {
            let state_changed = webhook
                .updated_from
                .is_some_and(|from| from.state_id.is_some());
            if !state_changed {
                return None;
            }
            let state_name = issue
                .state
                .as_ref()
                .map_or("unknown", |state| state.name.as_str());
            let text = format!(
                "Issue Status Updated: [{}] {} -> {}\n{}",
                issue.identifier, issue.title, state_name, issue.url
            );
            Some(plan_event("plan-update", text, issue))
        }
        _ => None,
    }
}

fn plan_event(event_type: &str, text: String, issue: LinearIssue) -> RawEvent {
    let mut payload = HashMap::new();
    payload.insert("text".to_string(), Value::String(text));
    payload.insert("title".to_string(), Value::String(issue.title));
    payload.insert("url".to_string(), Value::String(issue.url));
    if let Some(id) = issue.id {
        payload.insert("rawId".to_string(), Value::String(id));
    }

    RawEvent {
        source: Some("linear".to_string()),
        event_type: Some(event_type.to_string()),
        payload,
        ..Default::default()
    }
}
