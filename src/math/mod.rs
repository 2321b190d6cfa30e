//! Mathematical utilities: sine-model basis and the linear-algebra layer.

pub mod basis;
pub mod linalg;

pub use basis::*;
pub use linalg::*;
