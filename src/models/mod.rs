//! Single-tone sine model.
//!
//! Implemented as small, pure functions so the fitting code stays free of
//! model details.

pub mod model;

pub use model::*;
