pub mod adapters;
pub mod app;
pub mod buffer;
pub mod config;
pub mod error;
pub mod event;
pub mod flush;
pub mod handlers;
pub mod metrics;
pub mod time;
pub mod watermark;

pub use app::{create_router, AppState};
pub use config::Config;
pub use error::AppError;
