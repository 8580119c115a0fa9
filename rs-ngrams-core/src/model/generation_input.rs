use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default starting depth.
pub const DEFAULT_LEVEL: usize = 0;

/// Default starting accumulator.
pub const DEFAULT_Q: i64 = 1;

/// Parameters of one n-gram generation.
///
/// # Responsibilities
/// - Hold the starting state of the traversal (`level`, `q`)
/// - Toggle duplicate filtering of the yielded values
///
/// Every field has a default, so a JSON config only needs the fields it
/// overrides. Unknown fields are rejected.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationInput {
	/// Starting depth of the traversal.
	pub level: usize,

	/// Starting accumulator. Any signed value is accepted.
	pub q: i64,

	/// Skip values already yielded during the same run.
	pub distinct: bool,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self { level: DEFAULT_LEVEL, q: DEFAULT_Q, distinct: false }
	}
}

impl GenerationInput {
	/// Parses a JSON object such as `{"level": 0, "q": 1, "distinct": true}`.
	///
	/// # Errors
	/// Returns `Error::Config` on malformed JSON, wrong types or unknown fields.
	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Loads the configuration from a JSON file.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path)?;
		log::debug!("loading generation config from {}", path.display());
		Self::from_json_str(&contents)
	}
}
