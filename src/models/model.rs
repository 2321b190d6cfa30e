//! Evaluation of the single-tone sine model.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given sample index and frequency (for least squares)
//! - predict `x[n]` given `[A, B, C]` and the frequency (for residuals/reports)

use crate::math::{PARAM_COUNT, cos_basis, phase_at, sin_basis};

/// Fill the design row `[cos((n+1)w), sin((n+1)w), 1]` for sample `n`.
pub fn fill_design_row(n: usize, w: f64, out: &mut [f64; PARAM_COUNT]) {
    out[0] = cos_basis(n, w);
    out[1] = sin_basis(n, w);
    out[2] = 1.0;
}

/// Predict sample `n` of `A·cos((n+1)w) + B·sin((n+1)w) + C`.
pub fn predict(n: usize, w: f64, params: &[f64; PARAM_COUNT]) -> f64 {
    let (s, c) = phase_at(n, w).sin_cos();
    params[0] * c + params[1] * s + params[2]
}

/// Predict the first `len` samples of the model.
pub fn predict_series(len: usize, w: f64, params: &[f64; PARAM_COUNT]) -> Vec<f64> {
    (0..len).map(|n| predict(n, w, params)).collect()
}
