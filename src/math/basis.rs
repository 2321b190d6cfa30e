//! Basis functions of the single-tone sine model.
//!
//! For sample index `n` (zero-based) and relative angular frequency `w` the
//! model is
//!
//! - `x[n] ≈ A·cos((n+1)·w) + B·sin((n+1)·w) + C`
//!
//! The phase origin sits one sample *before* the first sample, i.e. the first
//! row is evaluated at `w`, not at `0`. Estimated `A`/`B` depend on that
//! convention, so every helper in the crate uses [`phase_at`].

use nalgebra::DMatrix;

/// Number of linear parameters (`A`, `B`, `C`).
pub const PARAM_COUNT: usize = 3;

/// Phase `(n+1)·w` of sample `n`.
#[inline]
pub fn phase_at(n: usize, w: f64) -> f64 {
    (n as f64 + 1.0) * w
}

/// Cosine basis column value.
#[inline]
pub fn cos_basis(n: usize, w: f64) -> f64 {
    phase_at(n, w).cos()
}

/// Sine basis column value.
#[inline]
pub fn sin_basis(n: usize, w: f64) -> f64 {
    phase_at(n, w).sin()
}

/// Build the `len × 3` design matrix with rows `[cos((n+1)w), sin((n+1)w), 1]`.
pub fn design_matrix(len: usize, w: f64) -> DMatrix<f64> {
    let mut d = DMatrix::<f64>::zeros(len, PARAM_COUNT);
    let mut row = [0.0; PARAM_COUNT];
    for n in 0..len {
        crate::models::fill_design_row(n, w, &mut row);
        for (j, v) in row.iter().enumerate() {
            d[(n, j)] = *v;
        }
    }
    d
}
