//! Error type shared by every fitting operation.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FitError>;

/// Failures reported by the three- and four-parameter fits.
///
/// All variants describe deterministic numeric conditions, so retrying the
/// same call with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Malformed dimensions, lengths or non-finite inputs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The Gram matrix `D'D` is not invertible within tolerance at this frequency.
    ///
    /// Typical causes are `w ≈ 0`, `w ≈ π` or too few samples, where the cosine,
    /// sine and constant columns become (nearly) linearly dependent.
    #[error("Normal equations are singular at w={frequency} (rcond={rcond:e})")]
    SingularSystem {
        /// Frequency (rad/sample) at which the design matrix was built.
        frequency: f64,
        /// Reciprocal condition number of `D'D` (0 when it could not be estimated).
        rcond: f64,
    },

    /// The parabola through the three probe costs has no finite minimum.
    ///
    /// Covers zero or numerically-zero curvature (flat or collinear costs) and
    /// negative curvature (concave: the vertex would be a cost maximum).
    #[error("Cost parabola has no minimum: curvature is zero, negligible or negative (curvature={curvature:e})")]
    DegenerateParabola {
        /// Quadratic coefficient `a` of the fitted parabola.
        curvature: f64,
    },
}

impl FitError {
    /// Shorthand for [`FitError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        FitError::InvalidInput(message.into())
    }
}
