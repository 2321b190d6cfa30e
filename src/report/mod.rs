//! Reporting utilities: residuals and fit quality.

use crate::domain::{FitQuality, SineParams};
use crate::error::{FitError, Result};

/// Residuals `x[n] − model(n)` of a fitted parameter set.
pub fn compute_residuals<P: SineParams>(x: &[f64], fit: &P) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(x.len());
    for (n, &xn) in x.iter().enumerate() {
        let y_fit = fit.evaluate(n);
        if !y_fit.is_finite() {
            return Err(FitError::invalid(
                "Non-finite model prediction during residual computation.",
            ));
        }
        out.push(xn - y_fit);
    }
    Ok(out)
}

/// Sum of squared residuals and RMSE of a fitted parameter set.
pub fn fit_quality<P: SineParams>(x: &[f64], fit: &P) -> Result<FitQuality> {
    if x.is_empty() {
        return Err(FitError::invalid("No samples to evaluate."));
    }
    let residuals = compute_residuals(x, fit)?;
    let sse: f64 = residuals.iter().map(|r| r * r).sum();
    let n = x.len();
    Ok(FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        n,
    })
}
