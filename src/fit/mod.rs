//! Sine fitting.
//!
//! Responsibilities:
//!
//! - solve the linear three-parameter problem at a fixed frequency
//! - probe the cost at a frequency triplet and refine the frequency (parallel optional)
//! - run the final fit at the refined frequency

pub mod four_param;
pub mod three_param;

pub use four_param::*;
pub use three_param::*;
