use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads a text file and returns its non-empty lines, trimmed.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
///
/// # Errors
/// - `Error::Io` if the file cannot be read
/// - `Error::InvalidInput` if the content is not valid UTF-8
pub fn read_words<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let bytes = fs::read(path)?;
	let contents = String::from_utf8(bytes).map_err(|e| {
		Error::InvalidInput(format!("{} is not valid UTF-8 ({})", path.display(), e.utf8_error()))
	})?;

	let words: Vec<String> = contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect();

	log::debug!("read {} words from {}", words.len(), path.display());
	Ok(words)
}
