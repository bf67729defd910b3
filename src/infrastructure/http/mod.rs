// HTTP adapters for the annotation backend
// Implement the domain port traits on top of reqwest

pub mod annotate;
pub mod health;

pub use annotate::{AnnotateEndpoint, HttpAnnotationTransport};
pub use health::HttpHealthProbe;

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::domain::errors::{AnnotationError, AnnotationResult};

/// Default base URL of the dashboard backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default timeout for a single exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn build_client(timeout: Duration) -> AnnotationResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AnnotationError::Config(format!("Failed to build HTTP client: {e}")))
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn validate_base_url(base_url: &str) -> AnnotationResult<()> {
    let parsed = reqwest::Url::parse(base_url)
        .map_err(|e| AnnotationError::Config(format!("Invalid base URL {base_url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AnnotationError::Config(format!(
            "Unsupported URL scheme: {other}"
        ))),
    }
}

fn transport_error(err: reqwest::Error) -> AnnotationError {
    if err.is_timeout() {
        AnnotationError::Transport("request timed out".to_string())
    } else if err.is_connect() {
        AnnotationError::Transport(format!("could not connect: {err}"))
    } else {
        AnnotationError::Transport(format!("request failed: {err}"))
    }
}

/// Builds the error for a non-success response
///
/// The body is only used when it is JSON with an `error` or `message`
/// string field; otherwise the status reason phrase is used.
fn remote_error(status: StatusCode, body: &str) -> AnnotationError {
    let server_message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["error", "message"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    let message = server_message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    AnnotationError::Remote {
        status: status.as_u16(),
        message,
    }
}
