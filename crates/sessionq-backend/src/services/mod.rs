//! Backend services for querying the session catalog.
//!
//! This module provides the [`SessionService`] abstraction, its SQLite-backed
//! implementation, and the typed filter builder that renders query predicates.

pub mod filter;
pub mod sessions;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use sessions::*;
