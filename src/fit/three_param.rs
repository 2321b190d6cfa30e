//! Three-parameter least-squares sine fit at a fixed frequency.
//!
//! Given:
//! - samples `x[n]`, `n = 0..N`
//! - a candidate relative angular frequency `w`
//!
//! the model `A·cos((n+1)w) + B·sin((n+1)w) + C` is linear in `[A, B, C]`, so we
//! solve the normal equations
//!
//! ```text
//! (D'D) p = D'x
//! ```
//!
//! directly through the inverse of the 3×3 Gram matrix, and optionally report
//! the residual sum of squares `‖x − D·p‖²` (the cost used by the frequency
//! search).

use log::{debug, warn};
use nalgebra::{DMatrix, DVector, Vector3};

use crate::domain::{FitOptions, ThreeParameterResult};
use crate::error::{FitError, Result};
use crate::math::{
    PARAM_COUNT, design_matrix, dot, invert3x3, multiply, multiply_vector, subtract, to_matrix3,
    transpose,
};

/// Fewest samples that determine three free parameters.
pub const MIN_SAMPLES: usize = PARAM_COUNT;

/// Fit `[A, B, C]` to `x` at the fixed frequency `w`.
///
/// When `compute_cost` is set the result also carries the residual sum of
/// squares. `w` is not range-checked: any finite value is accepted, and values
/// where the design columns collapse (`w ≈ 0`, `w ≈ π`) fail as
/// [`FitError::SingularSystem`].
pub fn three_parameter_fit(
    x: &[f64],
    w: f64,
    compute_cost: bool,
    opts: &FitOptions,
) -> Result<ThreeParameterResult> {
    opts.validate()?;
    validate_samples(x)?;
    if !w.is_finite() {
        return Err(FitError::invalid(format!("frequency must be finite, got {w}")));
    }

    let n = x.len();
    let d = design_matrix(n, w);
    let dt = transpose(&d);

    let gram = to_matrix3(&multiply(&dt, &d)?)?;
    let gram_inv = invert3x3(&gram, opts.rcond_tol).map_err(|e| {
        warn!("three_parameter_fit: singular normal equations at w={w} (n={n}, rcond={:e})", e.rcond);
        FitError::SingularSystem {
            frequency: w,
            rcond: e.rcond,
        }
    })?;

    let xv = DVector::from_column_slice(x);
    let dtx = multiply_vector(&dt, &xv)?;
    let p = gram_inv * Vector3::new(dtx[0], dtx[1], dtx[2]);
    let p = DVector::from_column_slice(p.as_slice());
    if p.iter().any(|v| !v.is_finite()) {
        warn!("three_parameter_fit: non-finite parameters at w={w} (n={n})");
        return Err(FitError::SingularSystem {
            frequency: w,
            rcond: 0.0,
        });
    }

    let cost = if compute_cost {
        Some(residual_cost(&d, &xv, &p)?)
    } else {
        None
    };

    debug!(
        "three_parameter_fit: n={n} w={w} A={:.6} B={:.6} C={:.6} cost={cost:?}",
        p[0], p[1], p[2]
    );

    Ok(ThreeParameterResult {
        a: p[0],
        b: p[1],
        c: p[2],
        frequency: w,
        cost,
    })
}

/// Check the sample series: at least [`MIN_SAMPLES`] finite values.
pub fn validate_samples(x: &[f64]) -> Result<()> {
    if x.len() < MIN_SAMPLES {
        return Err(FitError::invalid(format!(
            "need at least {MIN_SAMPLES} samples, got {}",
            x.len()
        )));
    }
    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(FitError::invalid(format!("sample {i} is not finite")));
    }
    Ok(())
}

/// `‖x − D·p‖²`.
fn residual_cost(d: &DMatrix<f64>, x: &DVector<f64>, p: &DVector<f64>) -> Result<f64> {
    let y_fit = multiply_vector(d, p)?;
    let e = subtract(x, &y_fit)?;
    dot(&e, &e)
}
