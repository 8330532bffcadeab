use std::path::PathBuf;
use std::sync::Arc;

use envconfig::Envconfig;
use tokio::signal;

use activity_capture::adapters::AdapterRegistry;
use activity_capture::app::{create_router, AppState};
use activity_capture::buffer::EventBuffer;
use activity_capture::config::Config;
use activity_capture::flush::FlushEngine;
use activity_capture::metrics::setup_metrics_routes;
use activity_capture::time::{SystemTime, TimeSource};

async fn shutdown() {
    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())
        .expect("failed to register SIGTERM handler");

    let mut interrupt = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .expect("failed to register SIGINT handler");

    tokio::select! {
        _ = term.recv() => {},
        _ = interrupt.recv() => {},
    };

    tracing::info!("shutting down gracefully...");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::init_from_env().expect("failed to load configuration from env");

    let output_root = PathBuf::from(&config.output_dir);
    tokio::fs::create_dir_all(&output_root)
        .await
        .expect("failed to create output directory");

    let buffer = Arc::new(EventBuffer::new());
    let timesource: Arc<dyn TimeSource + Send + Sync> = Arc::new(SystemTime {});
    let flusher = Arc::new(FlushEngine::new(
        buffer.clone(),
        output_root,
        timesource.clone(),
    ));

    let state = AppState {
        buffer,
        adapters: Arc::new(AdapterRegistry::default()),
        flusher,
        timesource,
        default_webhook_project: config.default_webhook_project.clone(),
        static_root: PathBuf::from(&config.static_dir),
    };

    let app = create_router(state);
    let app = if config.export_prometheus {
        setup_metrics_routes(app)
    } else {
        app
    };

    let listener = tokio::net::TcpListener::bind(config.bind())
        .await
        .expect("failed to bind listen address");
    tracing::info!("listening on {}", config.bind());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .expect("server error");
}
