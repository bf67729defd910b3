use async_trait::async_trait;

use crate::domain::annotation::AnnotationResponse;
use crate::domain::errors::AnnotationResult;

/// Port for the external annotation service
///
/// One call performs exactly one network exchange. Implementations must not
/// retry or cache, and must not mutate any local state.
#[async_trait]
pub trait AnnotationTransport: Send + Sync {
    /// Send `text` for annotation
    ///
    /// # Errors
    /// * `AnnotationError::Transport` - The exchange did not complete
    /// * `AnnotationError::Remote` - The service answered with a non-success status
    /// * `AnnotationError::InvalidResponse` - A success answer was not the expected JSON
    async fn annotate(&self, text: &str) -> AnnotationResult<AnnotationResponse>;
}
