//! The shared library for sessionq, a read-only query service over conference session metadata.
//!
//! This library provides the pieces shared between the backend and any client of its
//! HTTP API, including the wire data structures, error handling and logging setup.

pub mod data;
pub mod errors;
pub mod log;

pub use serde;
pub use serde_json;
pub use tracing;
