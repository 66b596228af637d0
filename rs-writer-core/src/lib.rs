//! Markov next-word prediction library.
//!
//! This crate provides the core of a predictive writer:
//! - Word tokenization over a fixed punctuation set
//! - A first-order word transition model with weighted random sampling
//! - A SQLite-backed word store so learned transitions survive restarts
//!
//! The model and the store never talk to each other directly. The host
//! process decides when typed text becomes an observation, when to ask
//! for a prediction, and when to mirror rows to storage (see the
//! `rs-writer-exemple` crate for the intended wiring).

/// In-memory prediction model: tokenizer, transition rows, and the
/// frequency model that owns the word-to-word transition table.
pub mod model;

/// Durable word storage with a managed connection lifecycle.
pub mod store;
