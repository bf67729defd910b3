/// Events produced by the annotation request state machine
///
/// Every call that touches `RequestState` yields exactly one event, including
/// calls that leave the state untouched (`StaleDiscarded`). They are used for:
/// - Structured logging of transitions
/// - Letting callers observe how a spawned request ended
///
/// # Example
/// ```
/// use fanno_annotator::domain::annotation::RequestEvent;
///
/// let event = RequestEvent::StaleDiscarded { request_id: 1, latest: 2 };
/// assert!(event.is_stale());
/// assert_eq!(event.request_id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    /// A submission moved the state to Pending
    Submitted {
        /// ID assigned to the submission
        request_id: u64,
        /// The submitted text
        input: String,
    },
    /// The transport resolved the latest submission
    Succeeded {
        /// ID of the resolved submission
        request_id: u64,
        /// Number of annotations received
        count: usize,
    },
    /// The transport rejected the latest submission
    Failed {
        /// ID of the rejected submission
        request_id: u64,
        /// Message stored in the state
        message: String,
    },
    /// A superseded submission settled and was ignored
    StaleDiscarded {
        /// ID of the superseded submission
        request_id: u64,
        /// ID of the latest submission at the time of arrival
        latest: u64,
    },
}

impl RequestEvent {
    /// Returns the request_id this event refers to
    pub fn request_id(&self) -> u64 {
        match self {
            RequestEvent::Submitted { request_id, .. } => *request_id,
            RequestEvent::Succeeded { request_id, .. } => *request_id,
            RequestEvent::Failed { request_id, .. } => *request_id,
            RequestEvent::StaleDiscarded { request_id, .. } => *request_id,
        }
    }

    /// Returns true if the event left the state untouched
    pub fn is_stale(&self) -> bool {
        matches!(self, RequestEvent::StaleDiscarded { .. })
    }
}
