use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{
    build_client, join_url, remote_error, transport_error, validate_base_url, DEFAULT_TIMEOUT,
};
use crate::domain::annotation::{AnnotationRequest, AnnotationResponse};
use crate::domain::errors::{AnnotationError, AnnotationResult};
use crate::domain::ports::AnnotationTransport;

/// Annotation endpoint variants exposed by the dashboard backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotateEndpoint {
    /// `POST /annotate`
    Root,
    /// `POST /api/annotate`
    #[default]
    Api,
    /// `POST /api/annotate-simple`
    Simple,
}

impl AnnotateEndpoint {
    /// Returns the request path for this endpoint
    pub fn path(&self) -> &'static str {
        match self {
            AnnotateEndpoint::Root => "/annotate",
            AnnotateEndpoint::Api => "/api/annotate",
            AnnotateEndpoint::Simple => "/api/annotate-simple",
        }
    }
}

impl FromStr for AnnotateEndpoint {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" | "annotate" => Ok(AnnotateEndpoint::Root),
            "api" => Ok(AnnotateEndpoint::Api),
            "simple" | "annotate-simple" => Ok(AnnotateEndpoint::Simple),
            other => Err(AnnotationError::Config(format!(
                "Unknown annotate endpoint: {other} (expected root, api or simple)"
            ))),
        }
    }
}

impl std::fmt::Display for AnnotateEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Annotation transport that talks to the backend over HTTP
pub struct HttpAnnotationTransport {
    base_url: String,
    endpoint: AnnotateEndpoint,
    http_client: reqwest::Client,
}

impl HttpAnnotationTransport {
    /// Creates a transport with the default request timeout
    pub fn new(base_url: impl Into<String>, endpoint: AnnotateEndpoint) -> AnnotationResult<Self> {
        Self::with_timeout(base_url, endpoint, DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        endpoint: AnnotateEndpoint,
        timeout: Duration,
    ) -> AnnotationResult<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        Ok(Self {
            base_url,
            endpoint,
            http_client: build_client(timeout)?,
        })
    }

    /// Full URL requests are sent to
    pub fn url(&self) -> String {
        join_url(&self.base_url, self.endpoint.path())
    }
}

#[async_trait]
impl AnnotationTransport for HttpAnnotationTransport {
    async fn annotate(&self, text: &str) -> AnnotationResult<AnnotationResponse> {
        let url = self.url();
        let body = AnnotationRequest {
            text: text.to_string(),
        };
        debug!(%url, "Sending annotation request");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Annotation endpoint returned an error");
            return Err(remote_error(status, &body_text));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice::<AnnotationResponse>(&bytes).map_err(|e| {
            AnnotationError::InvalidResponse(format!(
                "expected {{\"annotations\": [...]}} JSON: {e}"
            ))
        })
    }
}
