use tracing::info;

use super::controller::AnnotationController;
use crate::domain::annotation::RequestStatus;
use crate::domain::errors::{AnnotationError, AnnotationResult};
use crate::domain::health::HealthStatus;
use crate::domain::ports::HealthProbe;

/// Outcome of a passing smoke run
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub health: HealthStatus,
    pub annotations: Vec<String>,
}

/// Checks backend health, then runs one annotation through the controller
///
/// # Errors
/// * Any error from the health probe
/// * `AnnotationError::SmokeCheck` - If the backend is not healthy, the
///   annotation request failed, or it returned no annotations
pub async fn run_smoke(
    probe: &dyn HealthProbe,
    controller: &AnnotationController,
    text: &str,
) -> AnnotationResult<SmokeReport> {
    let health = probe.check().await?;
    if !health.is_healthy() {
        return Err(AnnotationError::SmokeCheck(format!(
            "health check returned unexpected status: {}",
            health.status
        )));
    }
    info!(status = %health.status, "Health check passed");

    let state = controller.annotate(text).await?;
    let status = state.status();
    if !status.is_settled() {
        return Err(AnnotationError::SmokeCheck(format!(
            "annotation request did not settle (status: {status})"
        )));
    }
    if status == RequestStatus::Failure {
        let message = state
            .error()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(AnnotationError::SmokeCheck(format!(
            "annotation endpoint failed: {message}"
        )));
    }

    let annotations = state.result().map(<[String]>::to_vec).unwrap_or_default();
    if annotations.is_empty() {
        return Err(AnnotationError::SmokeCheck(
            "annotation endpoint returned empty annotations array".to_string(),
        ));
    }
    info!(count = annotations.len(), "Annotation check passed");

    Ok(SmokeReport {
        health,
        annotations,
    })
}
