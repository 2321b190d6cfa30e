//! Four-parameter sine fit by parabolic refinement of the frequency.
//!
//! The three-parameter cost `J(w) = min_p ‖x − D(w)·p‖²` is evaluated at the
//! probe triplet `{w_init − δ, w_init, w_init + δ}`. A parabola through the three
//! costs (in stencil coordinates `t ∈ {−1, 0, 1}`) gives one Newton-like
//! correction of the frequency:
//!
//! ```text
//! [a, b, c]' = M · [J₋, J₀, J₊]'
//! t*        = −b / (2a) · δ
//! w_opt     = w_init + t*
//! ```
//!
//! followed by a final three-parameter fit at `w_opt`. There is no iteration:
//! accuracy relies on `J` being locally quadratic over `[w_init − δ, w_init + δ]`.

use log::{debug, trace, warn};
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

use crate::domain::{FitOptions, FourParameterResult, FrequencyRefinement, ThreeParameterResult};
use crate::error::{FitError, Result};
use crate::fit::three_param::three_parameter_fit;

/// Three-point stencil mapping `[J(−1), J(0), J(+1)]` to parabola coefficients `[a, b, c]`.
///
/// Row-major. Solves `J(t) = a·t² + b·t + c` through `t = −1, 0, 1`.
pub const PARABOLA_STENCIL: [[f64; 3]; 3] = [
    [0.5, -1.0, 0.5],
    [-0.5, 0.0, 0.5],
    [0.0, 1.0, 0.0],
];

/// The stencil as a matrix.
pub fn stencil_matrix() -> Matrix3<f64> {
    let m = PARABOLA_STENCIL;
    Matrix3::new(
        m[0][0], m[0][1], m[0][2], //
        m[1][0], m[1][1], m[1][2], //
        m[2][0], m[2][1], m[2][2],
    )
}

/// Probe frequencies `[w_init − dw, w_init, w_init + dw]`.
pub fn probe_frequencies(w_init: f64, dw: f64) -> [f64; 3] {
    [w_init - dw, w_init, w_init + dw]
}

/// Three-parameter cost at each probe frequency, in probe order.
pub fn probe_costs(x: &[f64], w_init: f64, dw: f64, opts: &FitOptions) -> Result<[f64; 3]> {
    validate_search(w_init, dw)?;
    let probes = probe_frequencies(w_init, dw);

    // Each fit keeps its own summation order, so running them on the pool
    // does not change the costs.
    let fits: Vec<Result<ThreeParameterResult>> = if opts.parallel_probes {
        probes
            .par_iter()
            .map(|&w| three_parameter_fit(x, w, true, opts))
            .collect()
    } else {
        probes
            .iter()
            .map(|&w| three_parameter_fit(x, w, true, opts))
            .collect()
    };

    let mut costs = [0.0; 3];
    for (slot, fit) in costs.iter_mut().zip(fits) {
        *slot = fit?
            .cost
            .ok_or_else(|| FitError::invalid("probe fit did not report a cost"))?;
    }
    Ok(costs)
}

/// Parabola coefficients `[a, b, c]` through the three probe costs.
pub fn parabola_coefficients(costs: [f64; 3]) -> [f64; 3] {
    let p = stencil_matrix() * Vector3::from(costs);
    [p[0], p[1], p[2]]
}

/// Rounding headroom, in units of machine epsilon per sample, of a probe cost.
const COST_ROUNDING_ULPS: f64 = 1e3;

/// Frequency offset `t* = −b/(2a)·dw` of the parabola vertex.
///
/// `min_curvature` is the smallest `a` accepted as a genuine minimum.
///
/// # Errors
/// [`FitError::DegenerateParabola`] when the parabola has no minimum: `a` is
/// zero or below `min_curvature`, `a` is negative (concave, the vertex is a
/// cost maximum), or the coefficients are non-finite.
pub fn vertex_offset(parabola: [f64; 3], dw: f64, min_curvature: f64) -> Result<f64> {
    let [a, b, _] = parabola;
    if !(a.is_finite() && b.is_finite()) || a <= min_curvature {
        warn!("vertex_offset: degenerate cost parabola (a={a:e}, b={b:e}, min={min_curvature:e})");
        return Err(FitError::DegenerateParabola { curvature: a });
    }
    let offset = -b / (2.0 * a) * dw;
    if !offset.is_finite() {
        warn!("vertex_offset: non-finite offset (a={a:e}, b={b:e})");
        return Err(FitError::DegenerateParabola { curvature: a });
    }
    Ok(offset)
}

/// Locate the cost-minimizing frequency near `w_init`.
pub fn refine_frequency(
    x: &[f64],
    w_init: f64,
    dw: f64,
    opts: &FitOptions,
) -> Result<FrequencyRefinement> {
    let probes = probe_frequencies(w_init, dw);
    let costs = probe_costs(x, w_init, dw, opts)?;
    let parabola = parabola_coefficients(costs);
    trace!("refine_frequency: probes={probes:?} costs={costs:?} parabola={parabola:?}");

    let min_curvature = curvature_threshold(x, costs, opts.curvature_tol);
    let offset = vertex_offset(parabola, dw, min_curvature)?;
    let frequency = w_init + offset;

    debug!("refine_frequency: w_init={w_init} dw={dw} -> w_opt={frequency} (offset={offset:e})");

    Ok(FrequencyRefinement {
        probes,
        costs,
        parabola,
        offset,
        frequency,
    })
}

/// Fit `[A, B, C, w]` to the `n` samples in `x`, starting from `w_init`.
///
/// `dw > 0` is the half-width of the probe window. Too wide and the cost is no
/// longer quadratic over the window; too narrow and rounding noise dominates
/// the curvature.
pub fn four_parameter_fit(
    x: &[f64],
    w_init: f64,
    dw: f64,
    n: usize,
    opts: &FitOptions,
) -> Result<FourParameterResult> {
    if x.len() != n {
        return Err(FitError::invalid(format!(
            "sample count mismatch: expected {n}, got {}",
            x.len()
        )));
    }

    let refinement = refine_frequency(x, w_init, dw, opts)?;
    let fit = three_parameter_fit(x, refinement.frequency, false, opts)?;

    Ok(FourParameterResult {
        a: fit.a,
        b: fit.b,
        c: fit.c,
        frequency: refinement.frequency,
    })
}

/// Smallest curvature that is distinguishable from a flat cost.
///
/// Relative to the largest probe cost, floored by the rounding noise of a cost
/// over `x`. The offset `C` is fitted out of every cost, so only the floor sees
/// it, and only through `max|x|·ε`.
fn curvature_threshold(x: &[f64], costs: [f64; 3], curvature_tol: f64) -> f64 {
    let max_cost = costs.iter().fold(0.0_f64, |m, &c| m.max(c));
    let max_abs = x.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    let per_sample = COST_ROUNDING_ULPS * f64::EPSILON * max_abs;
    let floor = x.len() as f64 * per_sample * per_sample;
    (curvature_tol * max_cost).max(floor)
}

fn validate_search(w_init: f64, dw: f64) -> Result<()> {
    if !w_init.is_finite() {
        return Err(FitError::invalid(format!(
            "initial frequency must be finite, got {w_init}"
        )));
    }
    if !(dw.is_finite() && dw > 0.0) {
        return Err(FitError::invalid(format!(
            "probe half-width must be finite and > 0, got {dw}"
        )));
    }
    Ok(())
}
