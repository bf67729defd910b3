// Port traits for external collaborators
// Infrastructure adapters implement these; the application layer depends only on them

pub mod health;
pub mod transport;

pub use health::HealthProbe;
pub use transport::AnnotationTransport;
