//! `sine-fit` library crate.
//!
//! Non-iterative least-squares estimation of a single sinusoid
//! `x[n] ≈ A·cos((n+1)w) + B·sin((n+1)w) + C` in uniformly-sampled data:
//!
//! - [`three_parameter_fit`] solves `[A, B, C]` at a fixed frequency `w`
//! - [`four_parameter_fit`] also refines `w` with one parabolic step over three
//!   three-parameter costs
//!
//! All arithmetic is `f64`. Embedded implementations of this method often run in
//! `f32`; the Gram matrix entries grow with `N`, so single precision loses
//! conditioning first on long series.
//!
//! Diagnostics go through the `log` facade; no logger is installed here.
//!
//! ```
//! use sine_fit::{FitOptions, SignalSpec, four_parameter_fit, generate_signal};
//!
//! let x = generate_signal(&SignalSpec {
//!     a: 1.0,
//!     b: 0.5,
//!     c: 0.1,
//!     frequency: 0.3,
//!     len: 50,
//!     noise_std: 0.0,
//!     seed: 0,
//! })
//! .unwrap();
//!
//! let fit = four_parameter_fit(&x, 0.302, 0.005, x.len(), &FitOptions::default()).unwrap();
//! assert!((fit.frequency - 0.3).abs() < 1e-4);
//! ```

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod report;

pub use data::{SignalSpec, generate_signal};
pub use domain::{
    FitOptions, FitQuality, FourParameterResult, FrequencyRefinement, SineParams,
    ThreeParameterResult,
};
pub use error::{FitError, Result};
pub use fit::{four_parameter_fit, refine_frequency, three_parameter_fit};
