//! Fanno Annotator Library
//!
//! This library provides the text-annotation request cycle used by the
//! Fanno dashboard: input validation, an injectable HTTP transport, and an
//! async request controller that tracks idle/pending/success/failure state
//! and discards stale responses.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
