//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - returned by value from every fit call
//! - logged or exported by the surrounding measurement application
//! - reloaded later for comparisons

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};
use crate::math::PARAM_COUNT;
use crate::models::{predict, predict_series};

/// Tuning knobs shared by the three- and four-parameter fits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Minimum reciprocal condition number `λ_min/λ_max` of `D'D`.
    ///
    /// Below this the normal equations are reported as singular rather than
    /// solved into garbage.
    pub rcond_tol: f64,

    /// Minimum parabola curvature, relative to the largest probe cost.
    ///
    /// A floor derived from the rounding noise of the costs always applies, so
    /// exactly-fitted series (all costs ≈ 0) are still reported as degenerate.
    pub curvature_tol: f64,

    /// Evaluate the three probe fits on the rayon pool.
    pub parallel_probes: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            rcond_tol: 1e-10,
            curvature_tol: 1e-12,
            parallel_probes: false,
        }
    }
}

impl FitOptions {
    /// Reject tolerances that would make every check pass or fail trivially.
    pub fn validate(&self) -> Result<()> {
        if !(self.rcond_tol.is_finite() && self.rcond_tol >= 0.0 && self.rcond_tol < 1.0) {
            return Err(FitError::invalid(format!(
                "rcond_tol must be finite and in [0, 1), got {}",
                self.rcond_tol
            )));
        }
        if !(self.curvature_tol.is_finite() && self.curvature_tol >= 0.0) {
            return Err(FitError::invalid(format!(
                "curvature_tol must be finite and >= 0, got {}",
                self.curvature_tol
            )));
        }
        Ok(())
    }
}

/// Output of a fixed-frequency (three-parameter) fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreeParameterResult {
    /// Cosine coefficient.
    pub a: f64,
    /// Sine coefficient.
    pub b: f64,
    /// Constant offset.
    pub c: f64,
    /// Frequency (rad/sample) the fit was evaluated at.
    pub frequency: f64,
    /// Residual sum of squares, when requested.
    pub cost: Option<f64>,
}

/// Output of the four-parameter fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourParameterResult {
    /// Cosine coefficient.
    pub a: f64,
    /// Sine coefficient.
    pub b: f64,
    /// Constant offset.
    pub c: f64,
    /// Refined relative angular frequency (rad/sample).
    pub frequency: f64,
}

/// Diagnostics of the parabolic frequency-refinement step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRefinement {
    /// Probe frequencies `[w−δ, w, w+δ]`.
    pub probes: [f64; 3],
    /// Three-parameter cost at each probe.
    pub costs: [f64; 3],
    /// Parabola `[a, b, c]` in stencil coordinates `t ∈ {−1, 0, 1}`.
    pub parabola: [f64; 3],
    /// Frequency correction `t*` in rad/sample.
    pub offset: f64,
    /// `w_init + offset`.
    pub frequency: f64,
}

/// Fit quality of a parameter set against a sample series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Common view over fitted sine parameters.
pub trait SineParams {
    /// `[A, B, C]`.
    fn coefficients(&self) -> [f64; PARAM_COUNT];

    /// Relative angular frequency (rad/sample).
    fn frequency(&self) -> f64;

    /// Peak amplitude `√(A² + B²)`.
    fn amplitude(&self) -> f64 {
        let [a, b, _] = self.coefficients();
        a.hypot(b)
    }

    /// Phase `φ` such that `A·cos θ + B·sin θ = R·cos(θ + φ)`.
    fn phase(&self) -> f64 {
        let [a, b, _] = self.coefficients();
        (-b).atan2(a)
    }

    /// Model value at sample `n`.
    fn evaluate(&self, n: usize) -> f64 {
        predict(n, self.frequency(), &self.coefficients())
    }

    /// Model values for samples `0..len`.
    fn fitted(&self, len: usize) -> Vec<f64> {
        predict_series(len, self.frequency(), &self.coefficients())
    }
}

impl SineParams for ThreeParameterResult {
    fn coefficients(&self) -> [f64; PARAM_COUNT] {
        [self.a, self.b, self.c]
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl SineParams for FourParameterResult {
    fn coefficients(&self) -> [f64; PARAM_COUNT] {
        [self.a, self.b, self.c]
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

/// Convert a physical frequency to relative angular frequency `2π·f/fs`.
pub fn relative_angular_frequency(freq_hz: f64, sample_rate_hz: f64) -> Result<f64> {
    check_sample_rate(sample_rate_hz)?;
    if !freq_hz.is_finite() {
        return Err(FitError::invalid(format!("frequency must be finite, got {freq_hz}")));
    }
    Ok(TAU * freq_hz / sample_rate_hz)
}

/// Convert a relative angular frequency back to Hz.
pub fn frequency_hz(w: f64, sample_rate_hz: f64) -> Result<f64> {
    check_sample_rate(sample_rate_hz)?;
    if !w.is_finite() {
        return Err(FitError::invalid(format!("frequency must be finite, got {w}")));
    }
    Ok(w * sample_rate_hz / TAU)
}

fn check_sample_rate(sample_rate_hz: f64) -> Result<()> {
    if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
        return Err(FitError::invalid(format!(
            "sample rate must be finite and > 0, got {sample_rate_hz}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn default_options_are_valid() {
        assert!(FitOptions::default().validate().is_ok());
    }

    #[test]
    fn options_reject_bad_tolerances() {
        let opts = FitOptions {
            rcond_tol: f64::NAN,
            ..FitOptions::default()
        };
        assert!(matches!(opts.validate(), Err(FitError::InvalidInput(_))));

        let opts = FitOptions {
            curvature_tol: -1.0,
            ..FitOptions::default()
        };
        assert!(matches!(opts.validate(), Err(FitError::InvalidInput(_))));
    }

    #[test]
    fn amplitude_and_phase_describe_the_same_wave() {
        let fit = FourParameterResult {
            a: 1.0,
            b: -1.0,
            c: 0.0,
            frequency: 0.2,
        };
        assert_relative_eq!(fit.amplitude(), 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(fit.phase(), FRAC_PI_4, epsilon = 1e-12);

        for n in 0..10 {
            let theta = (n as f64 + 1.0) * fit.frequency;
            let polar = fit.amplitude() * (theta + fit.phase()).cos();
            assert_relative_eq!(fit.evaluate(n), polar, epsilon = 1e-12);
        }
    }

    #[test]
    fn hz_round_trip() {
        let w = relative_angular_frequency(50.0, 1000.0).unwrap();
        assert_relative_eq!(w, 0.1 * std::f64::consts::PI, epsilon = 1e-15);
        assert_relative_eq!(frequency_hz(w, 1000.0).unwrap(), 50.0, epsilon = 1e-12);
        assert!(relative_angular_frequency(50.0, 0.0).is_err());
    }
}
