//! Features Module - Feature Engineering
//!
//! Turns form input into the named record the fitted pipeline expects.
//! Pure and deterministic, no I/O.

pub mod input;
pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use input::{Category, Country, Device, RawInput};
pub use layout::{layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{build, FeatureRecord, FeatureRow, FeatureValue, RawNumeric};
