use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use activity_capture::adapters::AdapterRegistry;
use activity_capture::app::{create_router, AppState};
use activity_capture::buffer::EventBuffer;
use activity_capture::flush::FlushEngine;
use activity_capture::time::TimeSource;

/// 2023-11-14T22:13:20Z
pub const NOW: i64 = 1_700_000_000_000;
pub const TODAY: &str = "2023-11-14";

pub struct FixedTime {
    millis: AtomicI64,
}

impl FixedTime {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::Relaxed);
    }
}

impl TimeSource for FixedTime {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::Relaxed)
    }
}

pub struct TestHarness {
    app: Router,
    pub buffer: Arc<EventBuffer>,
    pub clock: Arc<FixedTime>,
    pub output: TempDir,
    pub static_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        let output = TempDir::new().unwrap();
        let static_dir = TempDir::new().unwrap();
        std::fs::write(
            static_dir.path().join("index.html"),
            "<html><body>dashboard</body></html>",
        )
        .unwrap();
        std::fs::write(static_dir.path().join("app.js"), "console.log('hi');").unwrap();

        let buffer = Arc::new(EventBuffer::new());
        let clock = Arc::new(FixedTime::new(NOW));
        let flusher = Arc::new(FlushEngine::new(
            buffer.clone(),
            output.path().to_path_buf(),
            clock.clone(),
        ));

        let state = AppState {
            buffer: buffer.clone(),
            adapters: Arc::new(AdapterRegistry::default()),
            flusher,
            timesource: clock.clone(),
            default_webhook_project: "linear-import".to_string(),
            static_root: static_dir.path().to_path_buf(),
        };

        TestHarness {
            app: create_router(state),
            buffer,
            clock,
            output,
            static_dir,
        }
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.post_raw(uri, serde_json::to_string(&body).unwrap())
            .await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    pub fn digest_path(&self, project_id: &str) -> PathBuf {
        self.output
            .path()
            .join(project_id)
            .join(format!("{TODAY}.md"))
    }

    pub fn read_digest(&self, project_id: &str) -> String {
        std::fs::read_to_string(self.digest_path(project_id)).unwrap()
    }
}
