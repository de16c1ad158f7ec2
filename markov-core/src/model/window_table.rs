use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{MarkovError, Result};

/// Statistics of one character observed after a given window.
///
/// `probability` and `cumulative_probability` are only meaningful once the
/// owning table has been finalized.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharRecord {
	character: char,
	count: usize,
	probability: f64,
	cumulative_probability: f64,
}

impl CharRecord {
	fn new(character: char) -> Self {
		Self {
			character,
			count: 0,
			probability: 0.0,
			cumulative_probability: 0.0,
		}
	}

	pub fn character(&self) -> char {
		self.character
	}

	/// Number of times the character followed the window.
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn probability(&self) -> f64 {
		self.probability
	}

	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}
}

impl fmt::Display for CharRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({} {} {} {})",
			self.character, self.count, self.probability, self.cumulative_probability
		)
	}
}

/// Next-character distribution for a single window.
///
/// A `WindowTable` is a node of the Markov chain: `window` is the state and
/// each record is a weighted outgoing edge.
///
/// ## Ordering
/// Records are enumerated newest-first: a character seen for the first time
/// goes in front of every character already present. This enumeration order
/// drives the cumulative distribution and therefore the tie-break used by
/// [`WindowTable::sample`].
///
/// ## Invariants
/// - No two records share the same character
/// - Every record count is strictly positive
/// - Once finalized, probabilities sum to 1 and the last cumulative
///   probability is 1 (within floating-point tolerance)
#[derive(Clone, Debug)]
pub struct WindowTable {
	window: String,
	/// Stored oldest-first; table order is the reverse.
	records: Vec<CharRecord>,
	/// Character -> position in `records`.
	positions: HashMap<char, usize>,
}

impl WindowTable {
	/// Creates an empty table for `window`.
	pub fn new(window: &str) -> Self {
		Self {
			window: window.to_owned(),
			records: Vec::new(),
			positions: HashMap::new(),
		}
	}

	pub fn window(&self) -> &str {
		&self.window
	}

	/// Number of distinct characters observed after the window.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Sum of all record counts.
	pub fn total(&self) -> usize {
		self.records.iter().map(|record| record.count).sum()
	}

	/// Records one occurrence of `character` after the window.
	///
	/// - If the character is known, its count is increased.
	/// - Otherwise a record with a count of 1 is put at the front of the table.
	pub fn update(&mut self, character: char) {
		self.add(character, 1);
	}

	fn add(&mut self, character: char, count: usize) {
		let position = match self.positions.get(&character) {
			Some(&position) => position,
			None => {
				self.records.push(CharRecord::new(character));
				self.positions.insert(character, self.records.len() - 1);
				self.records.len() - 1
			}
		};
		self.records[position].count += count;
	}

	/// Derives `probability` and `cumulative_probability` of every record
	/// from the current counts.
	///
	/// Must run after the last `update` of the table. Running it again
	/// without intervening updates yields identical values.
	pub fn finalize_probabilities(&mut self) {
		let total = self.total();
		if total == 0 {
			return;
		}

		let mut cumulative = 0.0;
		for record in self.records.iter_mut().rev() {
			record.probability = record.count as f64 / total as f64;
			cumulative += record.probability;
			record.cumulative_probability = cumulative;
		}
	}

	/// Inverse-CDF sampling.
	///
	/// `draw` is expected to be uniform in `[0, 1)`. Returns the first
	/// character, in table order, whose cumulative probability exceeds
	/// `draw`. When rounding leaves no such record, the last record wins.
	///
	/// Returns `None` only for an empty table.
	pub fn sample(&self, draw: f64) -> Option<char> {
		let mut fallback = None;
		for record in self.iter() {
			if record.cumulative_probability > draw {
				return Some(record.character);
			}
			fallback = Some(record.character);
		}
		fallback
	}

	/// Position of `character` in table order.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.positions
			.get(&character)
			.map(|&position| self.records.len() - 1 - position)
	}

	/// Record at `index` in table order.
	///
	/// # Errors
	/// Returns `IndexOutOfRange` if `index >= len()`.
	pub fn get(&self, index: usize) -> Result<&CharRecord> {
		let len = self.records.len();
		if index >= len {
			return Err(MarkovError::IndexOutOfRange { index, len });
		}
		Ok(&self.records[len - 1 - index])
	}

	/// Iterates over the records in table order (newest first).
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CharRecord> + ExactSizeIterator {
		self.records.iter().rev()
	}

	/// Merges the counts of another table for the same window.
	///
	/// Characters unknown to `self` are inserted in the order `other` first
	/// saw them, so the newest-first ordering carries over.
	/// Probabilities must be finalized again afterwards.
	///
	/// # Errors
	/// Returns `WindowMismatch` if the windows differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.window != other.window {
			return Err(MarkovError::WindowMismatch {
				expected: self.window.clone(),
				found: other.window.clone(),
			});
		}

		for record in &other.records {
			self.add(record.character, record.count);
		}

		Ok(())
	}
}

impl fmt::Display for WindowTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, record) in self.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{record}")?;
		}
		write!(f, ")")
	}
}

impl Serialize for WindowTable {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_seq(self.iter())
	}
}
