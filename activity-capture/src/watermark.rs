use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const WATERMARK_FILE: &str = "watermark.json";

/// On-disk shape: `{"lastFlushed": <ms>}` in the project's output directory.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct WatermarkRecord {
    last_flushed: i64,
}

/// Result of a watermark read. A missing or unreadable record is not an
/// error: it means the project has never been flushed, and the flush engine
/// starts over from zero. Corruption is deliberately folded into
/// `NeverFlushed` rather than surfaced — the digest is append-only, so the
/// worst outcome is a re-written line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watermark {
    Recorded(i64),
    NeverFlushed,
}

impl Watermark {
    pub fn millis(self) -> i64 {
        match self {
            Watermark::Recorded(millis) => millis,
            Watermark::NeverFlushed => 0,
        }
    }
}

/// Durable per-project cursor over the last flushed timestamp.
pub struct WatermarkStore {
    root: PathBuf,
}

impl WatermarkStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path(&self, project_id: &str) -> PathBuf {
        self.root.join(project_id).join(WATERMARK_FILE)
    }

    pub async fn load(&self, project_id: &str) -> Watermark {
        let path = self.path(project_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(_) => return Watermark::NeverFlushed,
        };
        match serde_json::from_slice::<WatermarkRecord>(&bytes) {
            Ok(record) => Watermark::Recorded(record.last_flushed),
            Err(error) => {
                tracing::warn!(
                    project_id = project_id,
                    error = %error,
                    "corrupt watermark treated as never flushed"
                );
                Watermark::NeverFlushed
            }
        }
    }

    /// Overwrites unconditionally. The flush engine only calls this with
    /// non-decreasing values per project.
    pub async fn save(&self, project_id: &str, timestamp: i64) -> std::io::Result<()> {
        let dir = self.root.join(project_id);
        tokio::fs::create_dir_all(&dir).await?;
        let record = WatermarkRecord {
            last_flushed: timestamp,
        };
        let body = serde_json::to_vec(&record).map_err(std::io::Error::other)?;
        tokio::fs::write(dir.join(WATERMARK_FILE), body).await
    }
}
