use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Reads a whole text file as the training corpus.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a text file holding one sample per line and joins the lines
/// with `separator`.
///
/// - Splits on `\n` / `\r\n`
/// - Empty lines are skipped
pub fn read_corpus_lines<P: AsRef<Path>>(filename: P, separator: &str) -> Result<String> {
	let contents = read_corpus(filename)?;
	Ok(contents
		.lines()
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join(separator))
}
