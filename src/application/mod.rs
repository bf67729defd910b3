// Application layer module
// Orchestrates domain objects through the port traits

pub mod controller;
pub mod smoke;

pub use controller::{AnnotationController, SubmitPolicy, Submission};
pub use smoke::{run_smoke, SmokeReport};
