use thiserror::Error;

/// Errors that can occur while collecting, sending or applying an annotation request
///
/// `EmptyInput`, `InputTooLong` and `RequestInFlight` are local rejections:
/// they never reach a transport and are never stored in `RequestState`.
/// Every other variant originates at or beyond the transport and is surfaced
/// to the renderer through `RequestState::error`.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Input is too long: {len} characters (max {max})")]
    InputTooLong { len: usize, max: usize },

    #[error("An annotation request is already pending")]
    RequestInFlight,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Annotation task failed: {0}")]
    Task(String),

    #[error("Smoke check failed: {0}")]
    SmokeCheck(String),
}

impl AnnotationError {
    /// Returns true for errors raised before anything was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AnnotationError::EmptyInput | AnnotationError::InputTooLong { .. }
        )
    }

    /// Returns the HTTP status code when the remote side produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AnnotationError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type AnnotationResult<T> = Result<T, AnnotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_contains_status() {
        let err = AnnotationError::Remote {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn validation_errors_are_flagged() {
        assert!(AnnotationError::EmptyInput.is_validation());
        assert!(AnnotationError::InputTooLong { len: 10, max: 5 }.is_validation());
        assert!(!AnnotationError::RequestInFlight.is_validation());
        assert!(!AnnotationError::Transport("down".to_string()).is_validation());
    }

    #[test]
    fn transport_error_has_no_status() {
        assert_eq!(
            AnnotationError::Transport("connection refused".to_string()).status_code(),
            None
        );
    }
}
