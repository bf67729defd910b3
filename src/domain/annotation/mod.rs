// Annotation domain module
// Contains the input collector, request state aggregate, value objects and events

pub mod draft;
pub mod events;
pub mod request_state;
pub mod types;
pub mod value_objects;

// Re-export main types for convenience
pub use draft::{InputCollector, MAX_INPUT_CHARS};
pub use events::RequestEvent;
pub use request_state::RequestState;
pub use types::{AnnotationRequest, AnnotationResponse};
pub use value_objects::{RequestError, RequestStatus};
