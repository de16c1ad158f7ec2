use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};

use super::window_table::WindowTable;
use crate::error::{MarkovError, Result};

/// Character-level order-k Markov model.
///
/// Maps every window of `window_length` characters seen during training to
/// the distribution of the character that follows it, and generates text by
/// walking that chain from a caller-supplied starting window.
///
/// # Responsibilities
/// - Build the window tables from a corpus with a single sliding scan
/// - Finalize the probability distribution of every table
/// - Sample new text, one draw of the random source per generated character
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key of `tables` is exactly `window_length` characters long
/// - Windows are never removed once learned
///
/// # Determinism
/// The random source is owned by the model and consumed strictly in
/// sequence. Two models built with the same window length and seed, trained
/// on the same corpus, produce identical output for identical calls.
#[derive(Clone, Debug)]
pub struct MarkovModel<R: Rng = StdRng> {
	window_length: usize,
	/// Sorted so that the dump is deterministic.
	tables: BTreeMap<String, WindowTable>,
	rng: R,
}

impl MarkovModel<StdRng> {
	/// Creates an empty model backed by `StdRng`.
	///
	/// - `Some(seed)`: reproducible generation.
	/// - `None`: the generator is seeded from the operating system.
	///
	/// # Errors
	/// Returns `InvalidWindowLength` if `window_length == 0`.
	pub fn new(window_length: usize, seed: Option<u64>) -> Result<Self> {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self::with_rng(window_length, rng)
	}
}

impl<R: Rng> MarkovModel<R> {
	/// Creates an empty model drawing from the given random source.
	///
	/// # Errors
	/// Returns `InvalidWindowLength` if `window_length == 0`.
	pub fn with_rng(window_length: usize, rng: R) -> Result<Self> {
		if window_length == 0 {
			return Err(MarkovError::InvalidWindowLength);
		}
		Ok(Self {
			window_length,
			tables: BTreeMap::new(),
			rng,
		})
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows learned.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Returns the table learned for `window`, if any.
	pub fn table(&self, window: &str) -> Option<&WindowTable> {
		self.tables.get(window)
	}

	/// Iterates over all tables, sorted by window.
	pub fn tables(&self) -> impl Iterator<Item = &WindowTable> {
		self.tables.values()
	}

	/// Learns the corpus.
	///
	/// Slides a window of `window_length` characters over the corpus and, for
	/// each following character, records one occurrence in the window's table.
	/// Probabilities of every table are finalized once the scan is over.
	///
	/// Calling `train` again accumulates counts on top of the existing ones.
	///
	/// # Errors
	/// Returns `InsufficientCorpus` if the corpus holds fewer than
	/// `window_length + 1` characters.
	pub fn train(&mut self, corpus: &str) -> Result<()> {
		let chars: Vec<char> = corpus.chars().collect();
		if chars.len() <= self.window_length {
			return Err(MarkovError::InsufficientCorpus {
				needed: self.window_length + 1,
				found: chars.len(),
			});
		}

		let mut window: String = chars[..self.window_length].iter().collect();
		for &next_char in &chars[self.window_length..] {
			self.tables
				.entry(window.clone())
				.or_insert_with(|| WindowTable::new(&window))
				.update(next_char);

			window.remove(0);
			window.push(next_char);
		}

		self.finalize();

		debug!(
			"Trained on {} characters: {} windows of length {}",
			chars.len(),
			self.tables.len(),
			self.window_length
		);
		Ok(())
	}

	fn finalize(&mut self) {
		for table in self.tables.values_mut() {
			table.finalize_probabilities();
		}
	}

	/// Generates up to `target_length` characters following `seed`.
	///
	/// The first `window_length` characters of `seed` form the initial window.
	/// Each step samples the next character from the current window's table
	/// and slides the window by one.
	///
	/// # Returns
	/// - `seed` unchanged if it is shorter than the window
	/// - the generated continuation only, without the seed
	/// - a shorter text if a window never seen during training is reached
	pub fn generate(&mut self, seed: &str, target_length: usize) -> String {
		if seed.chars().count() < self.window_length {
			trace!("Seed {seed:?} shorter than window length {}", self.window_length);
			return seed.to_owned();
		}

		let mut window: String = seed.chars().take(self.window_length).collect();
		let mut generated = String::new();
		let mut generated_len = 0;

		while generated_len < target_length {
			let Some(table) = self.tables.get(&window) else {
				trace!("Unseen window {window:?} after {generated_len} characters");
				break;
			};

			let draw: f64 = self.rng.random();
			let Some(next_char) = table.sample(draw) else {
				break;
			};

			generated.push(next_char);
			generated_len += 1;

			window.remove(0);
			window.push(next_char);
		}

		generated
	}

	/// Returns a window picked uniformly among the learned ones.
	///
	/// Useful to start a generation when the caller has no seed text.
	/// Consumes the model's random source. Returns `None` for an empty model.
	pub fn random_window(&mut self) -> Option<String> {
		self.tables.keys().choose(&mut self.rng).cloned()
	}

	/// Merges the counts of another model into this one, then finalizes.
	///
	/// # Errors
	/// Returns `WindowLengthMismatch` if the window lengths differ.
	pub fn merge<R2: Rng>(&mut self, other: &MarkovModel<R2>) -> Result<()> {
		if self.window_length != other.window_length {
			return Err(MarkovError::WindowLengthMismatch {
				expected: self.window_length,
				found: other.window_length,
			});
		}

		for (window, table) in &other.tables {
			if let Some(existing) = self.tables.get_mut(window) {
				existing.merge(table)?;
			} else {
				self.tables.insert(window.clone(), table.clone());
			}
		}

		self.finalize();
		Ok(())
	}

	/// Renders every window and its table, one per line, sorted by window.
	pub fn dump(&self) -> String {
		self.to_string()
	}
}

impl<R: Rng> fmt::Display for MarkovModel<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (window, table) in &self.tables {
			writeln!(f, "{window} : {table}")?;
		}
		Ok(())
	}
}

impl<R: Rng> Serialize for MarkovModel<R> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_map(&self.tables)
	}
}
