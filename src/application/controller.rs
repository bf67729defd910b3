use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::annotation::{InputCollector, RequestError, RequestEvent, RequestState};
use crate::domain::errors::{AnnotationError, AnnotationResult};
use crate::domain::ports::AnnotationTransport;

/// What `submit` does when a request is already pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// A new submission issues a new request id and the in-flight one is
    /// ignored when it settles. The last submission always wins.
    #[default]
    Supersede,
    /// A new submission is rejected with `RequestInFlight` until the
    /// in-flight one settles.
    Block,
}

impl FromStr for SubmitPolicy {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supersede" => Ok(SubmitPolicy::Supersede),
            "block" => Ok(SubmitPolicy::Block),
            other => Err(AnnotationError::Config(format!(
                "Unknown submit policy: {other} (expected supersede or block)"
            ))),
        }
    }
}

impl std::fmt::Display for SubmitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitPolicy::Supersede => write!(f, "supersede"),
            SubmitPolicy::Block => write!(f, "block"),
        }
    }
}

/// An accepted submission whose transport call runs in the background
#[derive(Debug)]
pub struct Submission {
    pub request_id: u64,
    handle: JoinHandle<RequestEvent>,
}

impl Submission {
    /// Waits for the transport call to settle
    ///
    /// # Returns
    /// * `Ok(RequestEvent)` - `Succeeded`/`Failed` if it was applied,
    ///   `StaleDiscarded` if a newer submission superseded it
    /// * `Err(AnnotationError::Task)` - If the settlement task itself was aborted;
    ///   a panicking transport settles as `Failed` instead
    pub async fn settled(self) -> AnnotationResult<RequestEvent> {
        self.handle
            .await
            .map_err(|e| AnnotationError::Task(e.to_string()))
    }
}

/// Async Request Controller for annotation widgets
///
/// Owns the `RequestState` of one widget, guards submissions with an
/// `InputCollector` and dispatches them through an injected transport.
/// Renderers read the state through `state()` or follow it with `subscribe()`.
///
/// Transport calls are spawned on the current tokio runtime, so `submit`
/// must be called from within one.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use fanno_annotator::application::{AnnotationController, SubmitPolicy};
/// use fanno_annotator::domain::annotation::InputCollector;
/// use fanno_annotator::infrastructure::http::{AnnotateEndpoint, HttpAnnotationTransport};
///
/// # async fn run() -> fanno_annotator::domain::errors::AnnotationResult<()> {
/// let transport = HttpAnnotationTransport::new("http://localhost:5000", AnnotateEndpoint::Api)?;
/// let controller = AnnotationController::new(
///     Arc::new(transport),
///     InputCollector::default(),
///     SubmitPolicy::Supersede,
/// );
///
/// let state = controller.annotate("Hello world").await?;
/// println!("{:?}", state.result());
/// # Ok(())
/// # }
/// ```
pub struct AnnotationController {
    transport: Arc<dyn AnnotationTransport>,
    collector: Mutex<InputCollector>,
    policy: SubmitPolicy,
    state: Arc<watch::Sender<RequestState>>,
}

impl AnnotationController {
    /// Creates a controller in the Idle state
    pub fn new(
        transport: Arc<dyn AnnotationTransport>,
        collector: InputCollector,
        policy: SubmitPolicy,
    ) -> Self {
        let (state, _) = watch::channel(RequestState::new());
        Self {
            transport,
            collector: Mutex::new(collector),
            policy,
            state: Arc::new(state),
        }
    }

    /// Returns the submission policy
    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    /// Replaces the draft held by the input collector
    pub fn set_draft(&self, text: impl Into<String>) {
        self.collector().set_draft(text);
    }

    /// Returns a copy of the current draft
    pub fn draft(&self) -> String {
        self.collector().draft().to_string()
    }

    /// Returns true if the current draft may be submitted right now
    pub fn can_submit(&self) -> bool {
        let collector = self.collector();
        collector.can_submit(collector.draft()) && !self.is_blocked()
    }

    /// Submits the current draft
    pub fn submit_draft(&self) -> AnnotationResult<Submission> {
        let draft = self.draft();
        self.submit(&draft)
    }

    /// Submits `text` for annotation
    ///
    /// On acceptance the state moves to Pending with a new request id and the
    /// transport call is spawned. On rejection the state is left untouched.
    ///
    /// # Errors
    /// * `AnnotationError::EmptyInput` / `InputTooLong` - The input collector refused the text
    /// * `AnnotationError::RequestInFlight` - Block policy and a request is pending
    pub fn submit(&self, text: &str) -> AnnotationResult<Submission> {
        if let Err(err) = self.collector().validate(text) {
            debug!(
                error = %err,
                validation = err.is_validation(),
                "Annotation submission rejected by input collector"
            );
            return Err(err);
        }

        let blocking = self.policy == SubmitPolicy::Block;
        let mut outcome = Err(AnnotationError::RequestInFlight);
        self.state.send_if_modified(|state| {
            if blocking && state.is_pending() {
                return false;
            }
            outcome = state.begin(text);
            outcome.is_ok()
        });

        let event = match outcome {
            Ok(event) => event,
            Err(err) => {
                debug!(error = %err, "Annotation submission rejected");
                return Err(err);
            }
        };

        let request_id = event.request_id();
        info!(
            request_id,
            chars = text.chars().count(),
            "Annotation request submitted"
        );

        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let text = text.to_string();
        let handle = tokio::spawn(async move {
            // Inner task so a panicking transport still settles this request id
            let call = tokio::spawn(async move { transport.annotate(&text).await });
            let outcome = match call.await {
                Ok(result) => result
                    .map(|response| response.annotations)
                    .map_err(|err| RequestError::from(&err)),
                Err(join_err) => {
                    Err(RequestError::from(&AnnotationError::Task(join_err.to_string())))
                }
            };
            apply_settlement(&state, request_id, outcome)
        });

        Ok(Submission { request_id, handle })
    }

    /// Submits `text` and waits for it to settle
    ///
    /// Returns the state snapshot after settlement. If a newer submission
    /// superseded this one meanwhile, the snapshot reflects the newer one.
    pub async fn annotate(&self, text: &str) -> AnnotationResult<RequestState> {
        self.submit(text)?.settled().await?;
        Ok(self.state())
    }

    /// Returns a snapshot of the current state
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    fn is_blocked(&self) -> bool {
        self.policy == SubmitPolicy::Block && self.state.borrow().is_pending()
    }

    fn collector(&self) -> MutexGuard<'_, InputCollector> {
        self.collector.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply_settlement(
    state: &watch::Sender<RequestState>,
    request_id: u64,
    outcome: Result<Vec<String>, RequestError>,
) -> RequestEvent {
    let mut event = RequestEvent::StaleDiscarded {
        request_id,
        latest: request_id,
    };
    state.send_if_modified(|current| {
        event = current.settle(request_id, outcome);
        !event.is_stale()
    });

    match &event {
        RequestEvent::Succeeded { request_id, count } => {
            info!(request_id, count, "Annotation request succeeded");
        }
        RequestEvent::Failed {
            request_id,
            message,
        } => {
            warn!(request_id, error = %message, "Annotation request failed");
        }
        RequestEvent::StaleDiscarded { request_id, latest } => {
            debug!(request_id, latest, "Discarded stale annotation response");
        }
        RequestEvent::Submitted { .. } => {}
    }

    event
}
