use serde::{Deserialize, Serialize};

use crate::domain::errors::AnnotationError;

/// Represents the lifecycle status of an annotation request
///
/// # Status Transitions
/// ```text
/// Idle -> Pending -> Success
///            |  ^        |
///            |  +--------+
///            +-> Failure -+
/// ```
/// `Idle` is only the initial status and is never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing has been submitted yet
    Idle,
    /// A submission is in flight
    Pending,
    /// The latest submission resolved with annotations
    Success,
    /// The latest submission was rejected by the transport
    Failure,
}

impl RequestStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - Idle -> Pending
    /// - Pending -> Pending (a newer submission supersedes the in-flight one)
    /// - Pending -> Success
    /// - Pending -> Failure
    /// - Success -> Pending
    /// - Failure -> Pending
    ///
    /// # Example
    /// ```
    /// use fanno_annotator::domain::annotation::RequestStatus;
    ///
    /// assert!(RequestStatus::Idle.can_transition_to(RequestStatus::Pending));
    /// assert!(!RequestStatus::Idle.can_transition_to(RequestStatus::Success));
    /// ```
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Idle, Pending)
                | (Pending, Pending)
                | (Pending, Success)
                | (Pending, Failure)
                | (Success, Pending)
                | (Failure, Pending)
        )
    }

    /// Returns true once the latest submission has resolved either way
    pub fn is_settled(&self) -> bool {
        matches!(self, RequestStatus::Success | RequestStatus::Failure)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Success => write!(f, "success"),
            RequestStatus::Failure => write!(f, "failure"),
        }
    }
}

/// User-facing error stored in `RequestState` when a submission fails
///
/// Unlike `AnnotationError` this is a plain value: clonable, comparable and
/// serializable so renderers can hold on to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestError {
    pub message: String,
    pub status: Option<u16>,
}

impl RequestError {
    /// Creates a new request error
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl From<&AnnotationError> for RequestError {
    fn from(err: &AnnotationError) -> Self {
        Self::new(err.to_string(), err.status_code())
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
