//! Explain Module - Coefficient ranking for the insights view

pub mod engine;
pub mod types;

pub use engine::{rank_coefficients, DEFAULT_TOP_N};
pub use types::{Coefficient, CoefficientReport};
