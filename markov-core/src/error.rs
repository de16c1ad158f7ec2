use thiserror::Error;

/// Failures surfaced by the modelling core.
///
/// Statistical edge cases (a seed shorter than the window, a window never
/// seen during training) are not errors: `generate` returns them as
/// ordinary values.
#[derive(Error, Debug)]
pub enum MarkovError {
	#[error("Corpus too short: need at least {needed} characters, got {found}")]
	InsufficientCorpus { needed: usize, found: usize },

	#[error("Window length must be >= 1")]
	InvalidWindowLength,

	#[error("Index {index} out of range for table of {len} records")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("Window mismatch: expected {expected:?}, got {found:?}")]
	WindowMismatch { expected: String, found: String },

	#[error("Window length mismatch: expected {expected}, got {found}")]
	WindowLengthMismatch { expected: usize, found: usize },

	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
