//! Row-wise softmax over real matrices.
//!
//! `apply_softmax` is the hand-written form: exponentiate every element,
//! then divide each row by its sum (the row sums are reshaped into a
//! column vector so the division broadcasts row by row):
//!
//! ```text
//! | e^a  e^b |      | e^a + e^b |      | e^a / (e^a + e^b)  e^b / (e^a + e^b) |
//! | e^c  e^d |  /   | e^c + e^d |  =>  | e^c / (e^c + e^d)  e^d / (e^c + e^d) |
//! ```
//!
//! `stable_softmax` subtracts each row maximum first and serves as the
//! trusted reference the hand-written form is checked against.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

fn ensure_columns(w: &Array2<f64>) -> Result<()> {
	if w.ncols() == 0 {
		return Err(Error::EmptyMatrix);
	}
	Ok(())
}

/// Hand-written row-wise softmax, without max subtraction.
///
/// Rows containing values above ~709 overflow to `inf` and produce `NaN`.
///
/// # Errors
/// Returns `Error::EmptyMatrix` if the matrix has no columns.
pub fn apply_softmax(w: &Array2<f64>) -> Result<Array2<f64>> {
	ensure_columns(w)?;

	let exp = w.mapv(f64::exp);
	let sums = exp.sum_axis(Axis(1)).insert_axis(Axis(1));
	Ok(&exp / &sums)
}

/// Numerically stable row-wise softmax (row maximum subtracted first).
///
/// # Errors
/// Returns `Error::EmptyMatrix` if the matrix has no columns.
pub fn stable_softmax(w: &Array2<f64>) -> Result<Array2<f64>> {
	ensure_columns(w)?;

	let max = w
		.fold_axis(Axis(1), f64::NEG_INFINITY, |&m, &x| m.max(x))
		.insert_axis(Axis(1));
	let exp = (w - &max).mapv(f64::exp);
	let sums = exp.sum_axis(Axis(1)).insert_axis(Axis(1));
	Ok(&exp / &sums)
}

/// Raw attention scores `x . x^T`.
pub fn attention_scores(x: &Array2<f64>) -> Array2<f64> {
	x.dot(&x.t())
}

pub fn row_sums(m: &Array2<f64>) -> Array1<f64> {
	m.sum_axis(Axis(1))
}

/// Checks that every row sums to 1 within `tolerance`.
pub fn rows_sum_to_one(m: &Array2<f64>, tolerance: f64) -> bool {
	row_sums(m).iter().all(|sum| (sum - 1.0).abs() <= tolerance)
}

/// Largest element-wise absolute difference between two matrices.
///
/// # Errors
/// Returns `Error::ShapeMismatch` if the shapes differ.
pub fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> Result<f64> {
	if a.dim() != b.dim() {
		return Err(Error::ShapeMismatch { left: a.dim(), right: b.dim() });
	}
	Ok((a - b).mapv(f64::abs).fold(0.0, |m, &x| m.max(x)))
}

/// Matrix of uniform `[0, 1)` values from a seeded RNG.
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
	let mut rng = StdRng::seed_from_u64(seed);
	Array2::from_shape_fn((rows, cols), |_| rng.random::<f64>())
}
