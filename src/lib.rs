//! Content Monetization Modeler - Core
//!
//! Feature engineering and inference contract behind the revenue modeler UI:
//! form input → feature record → fitted Lasso pipeline → prediction, plus the
//! coefficient report for the "top revenue drivers" chart.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::config::ModelConfig;
pub use logic::error::{ErrorKind, ModelError};
pub use logic::explain::{Coefficient, CoefficientReport};
pub use logic::features::{build, FeatureRecord, RawInput};
pub use logic::model::{FittedPipeline, ModelService};
