// Infrastructure layer module
// Contains adapters for the external annotation backend
// Follows Hexagonal Architecture

pub mod http;
