use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend reachability report returned by the health endpoint
///
/// Only `status` and `timestamp` are guaranteed; the dashboard backend also
/// reports `service` and `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Returns true if the backend reports itself as healthy
    pub fn is_healthy(&self) -> bool {
        matches!(
            self.status.trim().to_ascii_lowercase().as_str(),
            "healthy" | "ok"
        )
    }

    /// Parses the timestamp as RFC 3339, if it is one
    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}
