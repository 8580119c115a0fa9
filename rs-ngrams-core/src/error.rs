use std::io;

/// Errors raised by the n-gram and softmax utilities.
///
/// Generation itself never fails; errors only come from reading inputs,
/// parsing configuration, and matrix shape checks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	/// Input that is not valid text (ex. a file that is not UTF-8).
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("invalid configuration: {0}")]
	Config(#[from] serde_json::Error),

	/// `2^n` does not fit in a `u128`.
	#[error("node count overflows for an input of {0} characters")]
	NodeCountOverflow(usize),

	#[error("matrix has no columns")]
	EmptyMatrix,

	#[error("shape mismatch: {left:?} vs {right:?}")]
	ShapeMismatch { left: (usize, usize), right: (usize, usize) },
}

pub type Result<T> = std::result::Result<T, Error>;
