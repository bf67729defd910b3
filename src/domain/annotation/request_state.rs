use chrono::{DateTime, Utc};
use serde::Serialize;

use super::events::RequestEvent;
use super::value_objects::{RequestError, RequestStatus};
use crate::domain::errors::{AnnotationError, AnnotationResult};

/// Lifecycle state of the annotation request owned by one widget
///
/// # Invariants
/// - `result` is set only when status is Success
/// - `error` is set only when status is Failure, so both are never set together
/// - `input` is non-blank whenever status is Pending
/// - `request_id` only grows; a settlement is applied only when it carries the
///   latest issued id
///
/// # Example
/// ```
/// use fanno_annotator::domain::annotation::{RequestState, RequestStatus};
///
/// let mut state = RequestState::new();
/// let submitted = state.begin("Hello world").expect("non-blank input");
///
/// state.succeed(submitted.request_id(), vec!["a1".to_string()]);
/// assert_eq!(state.status(), RequestStatus::Success);
/// assert_eq!(state.result(), Some(&["a1".to_string()][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestState {
    status: RequestStatus,
    input: String,
    result: Option<Vec<String>>,
    error: Option<RequestError>,
    request_id: u64,
    submitted_at: Option<DateTime<Utc>>,
    settled_at: Option<DateTime<Utc>>,
}

impl RequestState {
    /// Creates the initial Idle state with empty input
    pub fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            input: String::new(),
            result: None,
            error: None,
            request_id: 0,
            submitted_at: None,
            settled_at: None,
        }
    }

    /// Starts a new submission (transitions to Pending)
    ///
    /// # Returns
    /// * `Ok(RequestEvent::Submitted)` - With the newly issued request id
    /// * `Err(AnnotationError::EmptyInput)` - If the input is blank; state is unchanged
    ///
    /// # Business Rules
    /// - Every status may move to Pending; an in-flight submission is superseded
    /// - Clears the previous result and error
    pub fn begin(&mut self, input: impl Into<String>) -> AnnotationResult<RequestEvent> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(AnnotationError::EmptyInput);
        }
        debug_assert!(self.status.can_transition_to(RequestStatus::Pending));

        self.request_id += 1;
        self.status = RequestStatus::Pending;
        self.input = input;
        self.result = None;
        self.error = None;
        self.submitted_at = Some(Utc::now());
        self.settled_at = None;

        Ok(RequestEvent::Submitted {
            request_id: self.request_id,
            input: self.input.clone(),
        })
    }

    /// Applies a successful transport resolution
    ///
    /// Returns `StaleDiscarded` and leaves the state untouched when
    /// `request_id` is not the latest pending submission.
    pub fn succeed(&mut self, request_id: u64, annotations: Vec<String>) -> RequestEvent {
        if !self.accepts(request_id, RequestStatus::Success) {
            return self.stale(request_id);
        }

        let count = annotations.len();
        self.status = RequestStatus::Success;
        self.result = Some(annotations);
        self.error = None;
        self.settled_at = Some(Utc::now());

        RequestEvent::Succeeded { request_id, count }
    }

    /// Applies a transport rejection
    ///
    /// Returns `StaleDiscarded` and leaves the state untouched when
    /// `request_id` is not the latest pending submission.
    pub fn fail(&mut self, request_id: u64, error: RequestError) -> RequestEvent {
        if !self.accepts(request_id, RequestStatus::Failure) {
            return self.stale(request_id);
        }

        let message = error.message.clone();
        self.status = RequestStatus::Failure;
        self.result = None;
        self.error = Some(error);
        self.settled_at = Some(Utc::now());

        RequestEvent::Failed {
            request_id,
            message,
        }
    }

    /// Applies whichever outcome the transport produced
    pub fn settle(
        &mut self,
        request_id: u64,
        outcome: Result<Vec<String>, RequestError>,
    ) -> RequestEvent {
        match outcome {
            Ok(annotations) => self.succeed(request_id, annotations),
            Err(error) => self.fail(request_id, error),
        }
    }

    fn accepts(&self, request_id: u64, next: RequestStatus) -> bool {
        request_id == self.request_id && self.status.can_transition_to(next)
    }

    fn stale(&self, request_id: u64) -> RequestEvent {
        RequestEvent::StaleDiscarded {
            request_id,
            latest: self.request_id,
        }
    }

    // ===== Getters =====

    /// Returns the current status
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns the last submitted input
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the annotations when status is Success
    pub fn result(&self) -> Option<&[String]> {
        self.result.as_deref()
    }

    /// Returns the stored error when status is Failure
    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    /// Returns the latest issued request id (0 before the first submission)
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Returns when the latest submission was made
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns when the latest submission settled
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Returns true while a submission is in flight
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

impl Default for RequestState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotations(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_state_is_idle() {
        let state = RequestState::new();
        assert_eq!(state.status(), RequestStatus::Idle);
        assert_eq!(state.input(), "");
        assert_eq!(state.request_id(), 0);
        assert!(state.result().is_none());
        assert!(state.error().is_none());
        assert!(state.submitted_at().is_none());
    }

    #[test]
    fn begin_moves_to_pending_and_issues_id() {
        let mut state = RequestState::new();
        let event = state.begin("Hello world").unwrap();

        assert_eq!(
            event,
            RequestEvent::Submitted {
                request_id: 1,
                input: "Hello world".to_string()
            }
        );
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.input(), "Hello world");
        assert!(state.submitted_at().is_some());
        assert!(state.settled_at().is_none());
    }

    #[test]
    fn begin_rejects_blank_input_without_changes() {
        let mut state = RequestState::new();
        let before = state.clone();

        assert!(matches!(state.begin("   "), Err(AnnotationError::EmptyInput)));
        assert_eq!(state, before);
    }

    #[test]
    fn succeed_sets_result_only() {
        let mut state = RequestState::new();
        let id = state.begin("Hello world").unwrap().request_id();

        let event = state.succeed(id, annotations(&["a1", "a2"]));

        assert_eq!(event, RequestEvent::Succeeded { request_id: id, count: 2 });
        assert_eq!(state.status(), RequestStatus::Success);
        assert_eq!(state.result(), Some(&annotations(&["a1", "a2"])[..]));
        assert!(state.error().is_none());
        assert!(state.settled_at().is_some());
    }

    #[test]
    fn succeed_accepts_empty_annotations() {
        let mut state = RequestState::new();
        let id = state.begin("text").unwrap().request_id();

        state.succeed(id, Vec::new());

        assert_eq!(state.status(), RequestStatus::Success);
        assert_eq!(state.result(), Some(&[][..]));
    }

    #[test]
    fn fail_sets_error_only() {
        let mut state = RequestState::new();
        let id = state.begin("test").unwrap().request_id();

        state.fail(id, RequestError::new("HTTP 500: Internal Server Error", Some(500)));

        assert_eq!(state.status(), RequestStatus::Failure);
        assert!(state.result().is_none());
        let error = state.error().unwrap();
        assert!(error.message.contains("500"));
        assert_eq!(error.status, Some(500));
    }

    #[test]
    fn resubmission_clears_previous_outcome() {
        let mut state = RequestState::new();
        let id = state.begin("first").unwrap().request_id();
        state.fail(id, RequestError::new("boom", None));

        state.begin("second").unwrap();

        assert_eq!(state.status(), RequestStatus::Pending);
        assert!(state.error().is_none());
        assert!(state.result().is_none());
        assert!(state.settled_at().is_none());
        assert_eq!(state.request_id(), 2);
    }

    #[test]
    fn superseded_settlement_is_discarded() {
        let mut state = RequestState::new();
        let first = state.begin("first").unwrap().request_id();
        let second = state.begin("second").unwrap().request_id();

        let event = state.succeed(first, annotations(&["old"]));

        assert_eq!(
            event,
            RequestEvent::StaleDiscarded {
                request_id: first,
                latest: second
            }
        );
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.input(), "second");
        assert!(state.result().is_none());
    }

    #[test]
    fn superseded_failure_is_discarded_after_latest_settles() {
        let mut state = RequestState::new();
        let first = state.begin("first").unwrap().request_id();
        let second = state.begin("second").unwrap().request_id();
        state.succeed(second, annotations(&["new"]));

        let event = state.settle(first, Err(RequestError::new("late", None)));

        assert!(event.is_stale());
        assert_eq!(state.status(), RequestStatus::Success);
        assert_eq!(state.result(), Some(&annotations(&["new"])[..]));
        assert!(state.error().is_none());
    }

    #[test]
    fn duplicate_settlement_is_discarded() {
        let mut state = RequestState::new();
        let id = state.begin("text").unwrap().request_id();
        state.succeed(id, annotations(&["a1"]));

        let event = state.fail(id, RequestError::new("late", None));

        assert!(event.is_stale());
        assert_eq!(state.status(), RequestStatus::Success);
    }

    #[test]
    fn settlement_before_any_submission_is_discarded() {
        let mut state = RequestState::new();
        let event = state.succeed(1, annotations(&["a1"]));

        assert!(event.is_stale());
        assert_eq!(state.status(), RequestStatus::Idle);
    }
}
