//! Top-level module for the Markov model.
//!
//! - Per-window character distributions (`WindowTable`, `CharRecord`)
//! - The order-k model that trains and samples them (`MarkovModel`)

/// Order-k character model.
///
/// Handles corpus ingestion, probability finalization,
/// seeded generation, merging and inspection dumps.
pub mod markov_model;

/// Distribution of the next character for a single window.
///
/// Tracks occurrence counts in newest-first order and supports
/// inverse-CDF sampling.
pub mod window_table;
