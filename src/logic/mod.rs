//! Logic Module - Feature engineering & inference
//!
//! - `features/` - raw form input → named feature record
//! - `model/` - artifact loading, fitted pipeline, model service
//! - `explain/` - coefficient ranking for the insights chart

pub mod config;
pub mod error;

pub mod explain;
pub mod features;
pub mod model;

pub use error::{ErrorKind, ModelError};
