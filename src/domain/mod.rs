//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - fit configuration (`FitOptions`)
//! - fit outputs (`ThreeParameterResult`, `FourParameterResult`, `FrequencyRefinement`)
//! - frequency unit conversions

pub mod types;

pub use types::*;
