use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::explain::DEFAULT_TOP_N;

/// Knobs for the model service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// How many drivers `explain` returns
    pub top_n: usize,

    /// Report negative revenue as zero (raw value is still kept)
    pub floor_at_zero: bool,

    /// Check `<artifact>.sha256` when it exists
    pub verify_checksum: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            floor_at_zero: false,
            verify_checksum: true,
        }
    }
}

impl ModelConfig {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self {
            top_n: constants::get_top_n(),
            floor_at_zero: constants::get_floor_at_zero(),
            verify_checksum: constants::get_verify_checksum(),
        }
    }
}
