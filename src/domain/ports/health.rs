use async_trait::async_trait;

use crate::domain::errors::AnnotationResult;
use crate::domain::health::HealthStatus;

/// Port for checking whether the backend is reachable
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Fetch the current health report
    async fn check(&self) -> AnnotationResult<HealthStatus>;
}
