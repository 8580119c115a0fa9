use std::collections::HashSet;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::model::frame::{Frame, Node};
use crate::model::generation_input::{GenerationInput, DEFAULT_LEVEL, DEFAULT_Q};

/// Lazy sequence of gated n-grams of a string.
///
/// Values are yielded depth-first, pre-order: a substring first, then
/// everything reachable by dropping its last character, then (if the
/// gate allows it) everything reachable by dropping its first character.
/// Substrings of 2 characters or less are not expanded.
///
/// The traversal runs on an explicit stack, so input length never
/// affects the call stack. Yielded values borrow from the input.
#[derive(Clone, Debug)]
pub struct Ngrams<'a> {
	text: &'a str,
	/// Byte offset of every character, plus `text.len()`.
	boundaries: Vec<usize>,
	stack: Vec<Frame>,
	/// Values already yielded, when duplicates are filtered.
	seen: Option<HashSet<&'a str>>,
}

impl<'a> Ngrams<'a> {
	fn new(text: &'a str, level: usize, q: i64) -> Self {
		let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
		boundaries.push(text.len());

		let root = Node::root(boundaries.len() - 1, level, q);
		Self { text, boundaries, stack: vec![Frame::Visit(root)], seen: None }
	}

	/// Skips values already yielded by this iterator.
	///
	/// The traversal is unchanged: children of a skipped value are still
	/// explored, and first occurrences keep their order.
	pub fn distinct(mut self) -> Self {
		self.seen = Some(HashSet::new());
		self
	}

	fn slice(&self, node: &Node) -> &'a str {
		let text: &'a str = self.text;
		&text[self.boundaries[node.start]..self.boundaries[node.end]]
	}
}

impl<'a> Iterator for Ngrams<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(frame) = self.stack.pop() {
			match frame {
				Frame::Visit(node) => {
					if !node.is_leaf() {
						// LIFO: the left subtree is drained before the right gate is evaluated
						self.stack.push(Frame::RightBranch(node));
						self.stack.push(Frame::Visit(node.left()));
					}

					let ngram = self.slice(&node);
					if let Some(seen) = &mut self.seen {
						if !seen.insert(ngram) {
							continue;
						}
					}
					return Some(ngram);
				}
				Frame::RightBranch(parent) => {
					let right = parent.right();
					log::trace!(
						"right node: {} q: {}, q+1: {}, lvl: {}",
						self.slice(&right),
						parent.q,
						parent.q.saturating_add(1),
						parent.level
					);
					if parent.right_allowed() {
						self.stack.push(Frame::Visit(right));
					}
				}
			}
		}
		None
	}
}

impl FusedIterator for Ngrams<'_> {}

/// Generates the n-grams of `text` from the default start state
/// (`level = 0`, `q = 1`).
pub fn generate(text: &str) -> Ngrams<'_> {
	Ngrams::new(text, DEFAULT_LEVEL, DEFAULT_Q)
}

/// Generates the n-grams of `text` from an explicit start state.
pub fn generate_with(text: &str, level: usize, q: i64) -> Ngrams<'_> {
	Ngrams::new(text, level, q)
}

/// Upper bound on the node count of the full, ungated recursion tree:
/// `2^n` for an input of `n` characters.
///
/// This is a complexity bound, not the number of values `generate` yields.
///
/// # Errors
/// Returns `Error::NodeCountOverflow` if the bound does not fit in a `u128`
/// (128 characters or more).
pub fn number_of_nodes(text: &str) -> Result<u128> {
	let n = text.chars().count();
	u32::try_from(n)
		.ok()
		.and_then(|exp| 2u128.checked_pow(exp))
		.ok_or(Error::NodeCountOverflow(n))
}

/// Owns an input string and its generation parameters.
///
/// # Responsibilities
/// - Replay the same sequence on every `iter()` call (no hidden state)
/// - Apply the `GenerationInput` start state and distinct filter
#[derive(Clone, Debug)]
pub struct NgramGenerator {
	text: String,
	input: GenerationInput,
}

impl NgramGenerator {
	pub fn new<S: Into<String>>(text: S, input: GenerationInput) -> Self {
		let text: String = text.into();
		log::debug!("generator for {:?} (level: {}, q: {}, distinct: {})", text, input.level, input.q, input.distinct);
		Self { text, input }
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn input(&self) -> &GenerationInput {
		&self.input
	}

	/// Returns a fresh iterator over the n-grams.
	pub fn iter(&self) -> Ngrams<'_> {
		let ngrams = Ngrams::new(&self.text, self.input.level, self.input.q);
		if self.input.distinct { ngrams.distinct() } else { ngrams }
	}

	/// Materializes the whole sequence.
	pub fn collect_all(&self) -> Vec<String> {
		self.iter().map(str::to_owned).collect()
	}

	/// See [`number_of_nodes`].
	pub fn node_bound(&self) -> Result<u128> {
		number_of_nodes(&self.text)
	}
}

impl<'a> IntoIterator for &'a NgramGenerator {
	type Item = &'a str;
	type IntoIter = Ngrams<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
