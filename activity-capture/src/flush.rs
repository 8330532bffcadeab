//! Turns buffered events into durable per-project digests.
//!
//! A flush snapshots the buffer, groups by project, filters each group
//! against the project's watermark, appends a digest for what survives and
//! advances the watermark. Failures are per-project: a project whose digest
//! or watermark cannot be written keeps its events buffered for the next
//! attempt while every other project proceeds.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use metrics::counter;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::buffer::EventBuffer;
use crate::event::Event;
use crate::time::{utc_date, TimeSource};
use crate::watermark::WatermarkStore;

/// Append-only writer for `<root>/<project>/<YYYY-MM-DD>.md`. Digest files
/// are never rewritten or reread.
pub struct DigestWriter {
    root: PathBuf,
}

impl DigestWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub async fn append(&self, project_id: &str, date: &str, summary: &str) -> std::io::Result<()> {
        let dir = self.root.join(project_id);
        tokio::fs::create_dir_all(&dir).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{date}.md")))
            .await?;
        file.write_all(summary.as_bytes()).await?;
        Ok(())
    }
}

pub struct FlushEngine {
    buffer: Arc<EventBuffer>,
    watermarks: WatermarkStore,
    digests: DigestWriter,
    timesource: Arc<dyn TimeSource + Send + Sync>,
    // At most one flush runs at a time; appends only contend with the brief
    // buffer critical sections, never with flush I/O.
    flush_lock: tokio::sync::Mutex<()>,
}

impl FlushEngine {
    pub fn new(
        buffer: Arc<EventBuffer>,
        output_root: PathBuf,
        timesource: Arc<dyn TimeSource + Send + Sync>,
    ) -> Self {
        Self {
            buffer,
            watermarks: WatermarkStore::new(output_root.clone()),
            digests: DigestWriter::new(output_root),
            timesource,
            flush_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one flush pass and return the ids of the projects whose digests
    /// were written, in no particular order.
    pub async fn flush(&self) -> Vec<String> {
        let _guard = self.flush_lock.lock().await;

        // Snapshot: take everything that is buffered right now. Events
        // appended while digests are being written land in the live buffer
        // and belong to the next flush.
        let pending = self.buffer.drain_matching(|_| true);
        let mut groups: HashMap<String, Vec<Event>> = HashMap::new();
        for event in pending {
            groups.entry(event.project_id.clone()).or_default().push(event);
        }

        let date = utc_date(self.timesource.now_millis());
        let mut flushed = Vec::new();
        for (project_id, events) in groups {
            if self.flush_project(&project_id, &date, events).await {
                counter!("capture_flushed_projects_total").increment(1);
                flushed.push(project_id);
            }
        }
        flushed
    }

    /// Returns true when a digest was written and the watermark advanced.
    /// In every other case the group is handed back to the buffer unchanged;
    /// events already behind the watermark stay buffered until their project
    /// produces something new.
    async fn flush_project(&self, project_id: &str, date: &str, events: Vec<Event>) -> bool {
        let watermark = self.watermarks.load(project_id).await.millis();

        let mut batch: Vec<Event> = events
            .iter()
            .filter(|event| event.timestamp > watermark)
            .cloned()
            .collect();
        if batch.is_empty() {
            self.buffer.extend(events);
            return false;
        }
        // Stable sort: equal timestamps keep their buffer order, so a flush
        // of the same batch always renders the same digest.
        batch.sort_by_key(|event| event.timestamp);

        let summary = summarize(&batch);
        if let Err(error) = self.digests.append(project_id, date, &summary).await {
            tracing::error!(project_id, %error, "failed to write digest, keeping events buffered");
            counter!("capture_flush_failures_total").increment(1);
            self.buffer.extend(events);
            return false;
        }

        let high = batch.last().map_or(watermark, |event| event.timestamp);
        if let Err(error) = self.watermarks.save(project_id, high).await {
            tracing::error!(project_id, %error, "failed to save watermark, keeping events buffered");
            counter!("capture_flush_failures_total").increment(1);
            self.buffer.extend(events);
            return false;
        }

        counter!("capture_flushed_events_total").increment(batch.len() as u64);
        tracing::info!(project_id, events = batch.len(), date, "flushed digest");
        true
    }
}

/// One markdown line per event: `- <eventType>: <file, title>`, the suffix
/// dropped when the payload carries neither field.
fn summarize(events: &[Event]) -> String {
    let mut summary = String::new();
    for event in events {
        let mut details: Vec<&str> = Vec::new();
        for key in ["file", "title"] {
            if let Some(value) = event.payload.get(key).and_then(Value::as_str) {
                if !value.is_empty() {
                    details.push(value);
                }
            }
        }
        summary.push_str("- ");
        summary.push_str(&event.event_type);
        if !details.is_empty() {
            summary.push_str(": ");
            summary.push_str(&details.join(", "));
        }
        summary.push('\n');
    }
    summary
}
