//! Dense linear-algebra layer used by the least-squares solver.
//!
//! Thin, dimension-checked wrappers over `nalgebra`. The operator overloads in
//! nalgebra panic on shape mismatch; the fitter goes through these helpers so a
//! bad shape surfaces as [`FitError::InvalidInput`] instead.
//!
//! Inversion of the 3×3 Gram matrix is the only numerically sensitive step:
//! `D'D` is symmetric positive semi-definite, so its conditioning is read off
//! the eigenvalues and compared against a caller-supplied tolerance before the
//! inverse is attempted.

use nalgebra::{DMatrix, DVector, Matrix3};
use thiserror::Error;

use crate::error::{FitError, Result};

/// A 3×3 matrix that cannot be inverted within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("matrix is singular (rcond={rcond:e})")]
pub struct SingularMatrix {
    /// Reciprocal condition number `λ_min / λ_max` (0 if not estimable).
    pub rcond: f64,
}

/// Transpose of `m`.
pub fn transpose(m: &DMatrix<f64>) -> DMatrix<f64> {
    m.transpose()
}

/// Matrix product `a · b`, failing on an inner-dimension mismatch.
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if a.ncols() != b.nrows() {
        return Err(FitError::invalid(format!(
            "cannot multiply {}x{} by {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(a * b)
}

/// Matrix-vector product `a · v`, failing on a dimension mismatch.
pub fn multiply_vector(a: &DMatrix<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
    if a.ncols() != v.len() {
        return Err(FitError::invalid(format!(
            "cannot multiply {}x{} by vector of length {}",
            a.nrows(),
            a.ncols(),
            v.len()
        )));
    }
    Ok(a * v)
}

/// View a dynamically-sized 3×3 matrix as a fixed `Matrix3`.
pub fn to_matrix3(m: &DMatrix<f64>) -> Result<Matrix3<f64>> {
    if m.shape() != (3, 3) {
        return Err(FitError::invalid(format!(
            "expected a 3x3 matrix, got {}x{}",
            m.nrows(),
            m.ncols()
        )));
    }
    Ok(m.fixed_view::<3, 3>(0, 0).into_owned())
}

/// Reciprocal condition number of a symmetric positive semi-definite matrix.
///
/// Returns 0 for non-finite input or a matrix whose largest eigenvalue is not
/// positive.
pub fn symmetric_rcond(m: &Matrix3<f64>) -> f64 {
    if m.iter().any(|v| !v.is_finite()) {
        return 0.0;
    }
    let eig = m.symmetric_eigenvalues();
    let max = eig.max();
    if !(max > 0.0) {
        return 0.0;
    }
    // Rounding can push the smallest eigenvalue of a PSD matrix slightly negative.
    eig.min().max(0.0) / max
}

/// Invert a symmetric 3×3 matrix whose reciprocal condition is at least `rcond_tol`.
pub fn invert3x3(m: &Matrix3<f64>, rcond_tol: f64) -> std::result::Result<Matrix3<f64>, SingularMatrix> {
    let rcond = symmetric_rcond(m);
    if !(rcond >= rcond_tol) || rcond == 0.0 {
        return Err(SingularMatrix { rcond });
    }
    match m.try_inverse() {
        Some(inv) if inv.iter().all(|v| v.is_finite()) => Ok(inv),
        _ => Err(SingularMatrix { rcond }),
    }
}

/// Inner product `u · v`.
pub fn dot(u: &DVector<f64>, v: &DVector<f64>) -> Result<f64> {
    check_same_len(u, v, "dot")?;
    Ok(u.dot(v))
}

/// Element-wise difference `u − v`.
pub fn subtract(u: &DVector<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
    check_same_len(u, v, "subtract")?;
    Ok(u - v)
}

fn check_same_len(u: &DVector<f64>, v: &DVector<f64>, op: &str) -> Result<()> {
    if u.len() != v.len() {
        return Err(FitError::invalid(format!(
            "{op}: vector lengths differ ({} vs {})",
            u.len(),
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn multiply_rejects_mismatched_shapes() {
        let a = DMatrix::<f64>::zeros(2, 3);
        let b = DMatrix::<f64>::zeros(2, 2);
        assert!(matches!(multiply(&a, &b), Err(FitError::InvalidInput(_))));
    }

    #[test]
    fn transpose_then_multiply_gives_gram() {
        let d = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let g = multiply(&transpose(&d), &d).unwrap();
        assert_eq!(g, DMatrix::from_row_slice(2, 2, &[3.0, 3.0, 3.0, 5.0]));
    }

    #[test]
    fn invert3x3_inverts_well_conditioned_matrix() {
        let m = Matrix3::new(4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0);
        let inv = invert3x3(&m, 1e-10).unwrap();
        let eye = m * inv;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(eye[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn invert3x3_rejects_rank_deficient_matrix() {
        // Two identical columns: rank 2.
        let m = Matrix3::new(1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let err = invert3x3(&m, 1e-10).unwrap_err();
        assert!(err.rcond < 1e-10);
    }

    #[test]
    fn invert3x3_rejects_non_finite_matrix() {
        let mut m = Matrix3::identity();
        m[(1, 1)] = f64::NAN;
        assert_eq!(invert3x3(&m, 1e-10), Err(SingularMatrix { rcond: 0.0 }));
    }

    #[test]
    fn dot_and_subtract_check_lengths() {
        let u = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let v = DVector::from_row_slice(&[1.0, 1.0, 1.0]);
        assert_eq!(dot(&u, &v).unwrap(), 6.0);
        assert_eq!(subtract(&u, &v).unwrap(), DVector::from_row_slice(&[0.0, 1.0, 2.0]));

        let short = DVector::from_row_slice(&[1.0]);
        assert!(dot(&u, &short).is_err());
        assert!(subtract(&u, &short).is_err());
    }
}
