use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;

use axum::extract::State;
use axum::http::header;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};

use crate::app::AppState;
use crate::error::AppError;

/// Router fallback: serve the dashboard files. `/` maps to `index.html`;
/// anything that is not a known asset type is served as html.
pub async fn serve_asset(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let relative = uri.path().trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };
    if relative.split('/').any(|segment| segment == "..") {
        return Err(AppError::AssetNotFound);
    }

    let path = state.static_root.join(relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let headers = [(header::CONTENT_TYPE, content_type_for(relative))];
            Ok((headers, bytes).into_response())
        }
        Err(error) if error.kind() == ErrorKind::NotFound => Err(AppError::AssetNotFound),
        Err(error) => Err(AppError::AssetRead(error)),
    }
}

fn content_type_for(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(OsStr::to_str) {
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        _ => "text/html",
    }
}

#[cfg(test)]
mod tests {
    use super::content_type_for;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("app.js"), "text/javascript");
        assert_eq!(content_type_for("style.css"), "text/css");
        assert_eq!(content_type_for("data.json"), "application/json");
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("no-extension"), "text/html");
    }
}
