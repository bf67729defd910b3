use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{
    build_client, join_url, remote_error, transport_error, validate_base_url, DEFAULT_TIMEOUT,
};
use crate::domain::errors::{AnnotationError, AnnotationResult};
use crate::domain::health::HealthStatus;
use crate::domain::ports::HealthProbe;

/// Default path of the health endpoint
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Health probe that issues `GET <base><path>`
pub struct HttpHealthProbe {
    base_url: String,
    path: String,
    http_client: reqwest::Client,
}

impl HttpHealthProbe {
    /// Creates a probe for `<base_url>/health`
    pub fn new(base_url: impl Into<String>) -> AnnotationResult<Self> {
        Self::with_path(base_url, DEFAULT_HEALTH_PATH, DEFAULT_TIMEOUT)
    }

    /// Creates a probe for a custom path and timeout
    pub fn with_path(
        base_url: impl Into<String>,
        path: impl Into<String>,
        timeout: Duration,
    ) -> AnnotationResult<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        Ok(Self {
            base_url,
            path: path.into(),
            http_client: build_client(timeout)?,
        })
    }

    /// Full URL the probe requests
    pub fn url(&self) -> String {
        join_url(&self.base_url, &self.path)
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check(&self) -> AnnotationResult<HealthStatus> {
        let url = self.url();
        debug!(%url, "Checking backend health");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(remote_error(status, &body_text));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice::<HealthStatus>(&bytes).map_err(|e| {
            AnnotationError::InvalidResponse(format!(
                "health response is not JSON, likely an HTML error page: {e}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_probe_targets_health() {
        let probe = HttpHealthProbe::new("http://localhost:5000").unwrap();
        assert_eq!(probe.url(), "http://localhost:5000/health");
    }

    #[test]
    fn custom_path_is_used() {
        let probe = HttpHealthProbe::with_path(
            "http://localhost:5000",
            "/api/health",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(probe.url(), "http://localhost:5000/api/health");
    }
}
