//! Source adapters normalize heterogeneous webhook payloads into `RawEvent`s.
//!
//! Each adapter is a pure function over the parsed payload: it either
//! produces an event worth recording or `None` for payloads that are
//! recognized but intentionally ignored. Ignoring is not an error; the
//! webhook endpoint acknowledges either way.

mod linear;

use std::collections::HashMap;

use serde_json::Value;

use crate::error::AppError;
use crate::event::RawEvent;

/// One variant per external source. Dispatch is a plain match, so adding a
/// source means adding a variant and registering it in `default()`.
#[derive(Clone, Copy, Debug)]
pub enum SourceAdapter {
    Linear,
}

impl SourceAdapter {
    pub fn normalize(&self, payload: &Value) -> Option<RawEvent> {
        match self {
            SourceAdapter::Linear => linear::normalize(payload),
        }
    }
}

/// Name-keyed adapter lookup, populated once at startup.
pub struct AdapterRegistry {
    adapters: HashMap<String, SourceAdapter>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    pub fn register(&mut self, source: impl Into<String>, adapter: SourceAdapter) {
        self.adapters.insert(source.into(), adapter);
    }

    /// `Err` only for unregistered sources; `Ok(None)` is an adapter
    /// declining the payload.
    pub fn normalize(&self, source: &str, payload: &Value) -> Result<Option<RawEvent>, AppError> {
        match self.adapters.get(source) {
            Some(adapter) => Ok(adapter.normalize(payload)),
            None => Err(AppError::UnknownSource(source.to_string())),
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("linear", SourceAdapter::Linear);
        registry
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AdapterRegistry;
    use crate::error::AppError;

    #[test]
    fn unknown_source_is_a_distinct_error() {
        let registry = AdapterRegistry::default();
        let result = registry.normalize("jira", &json!({}));
        assert!(matches!(result, Err(AppError::UnknownSource(source)) if source == "jira"));
    }

    #[test]
    fn default_registry_knows_linear() {
        let registry = AdapterRegistry::default();
        assert!(registry.normalize("linear", &json!({})).is_ok());
    }
}
