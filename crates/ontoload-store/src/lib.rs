//! Ontoload Store - Document store persistence
//!
//! Provides the SurrealDB implementation of the [`DocumentStore`] capability
//! and the [`Loader`] that persists extracted class and relation collections.
//!
//! [`DocumentStore`]: ontoload_core::DocumentStore
//! [`Loader`]: loader::Loader

pub mod loader;
pub mod surreal;

pub use loader::{LoadSummary, Loader};
pub use surreal::SurrealStore;
