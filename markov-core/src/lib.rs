//! Character-level Markov text generation library.
//!
//! This crate provides an order-k Markov model over characters:
//! - Corpus ingestion into per-window character frequency tables
//! - Probability and cumulative distribution derivation
//! - Seeded, reproducible text generation by inverse-CDF sampling
//!
//! File reading helpers live in [`io`]; everything else is pure computation.

/// Window tables and the Markov model built on top of them.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Corpus loading helpers.
pub mod io;

pub use error::{MarkovError, Result};
pub use model::markov_model::MarkovModel;
pub use model::window_table::{CharRecord, WindowTable};
