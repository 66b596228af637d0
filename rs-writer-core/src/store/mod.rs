//! Durable word-transition storage.
//!
//! The store mirrors the model's transition rows into a SQLite database
//! so learned counts accumulate across sessions. It owns the connection
//! handle and its lifecycle; the model never touches storage.

/// Error taxonomy for store operations.
pub mod error;

/// The SQLite-backed word store.
pub mod word_store;

/// Versioned schema initialization.
///
/// Not exposed
mod schema;
