//! Top-level module for gated n-gram generation.
//!
//! This module provides:
//! - A lazy, restartable substring generator (`NgramGenerator`, `Ngrams`)
//! - Generation configuration (`GenerationInput`)
//! - Internal traversal frames (`Node`, `Frame`)

/// High-level generation interface.
///
/// Exposes the `Ngrams` iterator, the owning `NgramGenerator`
/// and the `number_of_nodes` complexity bound.
pub mod generator;

/// Generation configuration (start level, start accumulator, distinct filter).
///
/// Deserializable from JSON, every field has a default.
pub mod generation_input;

/// Internal work-stack frames of the traversal.
///
/// Holds the gate rule deciding whether a right branch is explored.
/// This module is not exposed publicly.
mod frame;
