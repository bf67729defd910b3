use serde::{Deserialize, Serialize};

/// JSON body sent to the annotation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationRequest {
    pub text: String,
}

/// JSON body returned by the annotation endpoint on success
///
/// The list is in presentation order. It may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResponse {
    pub annotations: Vec<String>,
}
