//! Gated substring ("n-gram") enumeration and a softmax reference check.
//!
//! This crate provides:
//! - A lazy, restartable generator of contiguous substrings, obtained by
//!   shrinking the input from both ends under a depth/accumulator gate
//! - Generation configuration loadable from JSON
//! - A hand-written row-wise softmax, with a stable reference to check it against
//! - Small I/O helpers to read input words from a file

/// N-gram generation (generator, configuration, traversal frames).
pub mod model;

/// Row-wise softmax over `ndarray` matrices and comparison helpers.
pub mod softmax;

/// Input file loading.
pub mod io;

/// Crate error type.
pub mod error;

pub use error::{Error, Result};
pub use model::generation_input::GenerationInput;
pub use model::generator::{generate, generate_with, number_of_nodes, NgramGenerator, Ngrams};
