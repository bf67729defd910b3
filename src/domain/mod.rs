// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod annotation;
pub mod errors;
pub mod health;
pub mod ports;
