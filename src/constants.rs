//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.
//! Environment variables override them in the host binary.

use std::path::PathBuf;

use crate::logic::explain::DEFAULT_TOP_N;

/// Default artifact file name, looked up in the working directory first
pub const DEFAULT_MODEL_FILE: &str = "lasso_ad_revenue_model.json";

/// Per-user data directory name used as fallback location
pub const DATA_DIR_NAME: &str = "content-monetization";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Content Monetization Modeler";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Artifact path: `REVENUE_MODEL_PATH`, else the working directory, else the
/// local data directory
pub fn get_model_path() -> PathBuf {
    resolve_model_path(
        std::env::var("REVENUE_MODEL_PATH").ok(),
        PathBuf::from(DEFAULT_MODEL_FILE),
        dirs::data_local_dir(),
    )
}

/// Number of drivers in the insights chart
pub fn get_top_n() -> usize {
    parse_top_n(std::env::var("REVENUE_TOP_N").ok().as_deref())
}

/// Whether negative predictions are shown as zero
pub fn get_floor_at_zero() -> bool {
    std::env::var("REVENUE_FLOOR_AT_ZERO")
        .map(|s| parse_flag(&s))
        .unwrap_or(false)
}

/// Whether the checksum sidecar is verified
pub fn get_verify_checksum() -> bool {
    std::env::var("REVENUE_MODEL_VERIFY_CHECKSUM")
        .map(|s| parse_flag(&s))
        .unwrap_or(true)
}

fn resolve_model_path(explicit: Option<String>, local: PathBuf, data_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }

    if local.exists() {
        return local;
    }

    data_dir
        .map(|dir| dir.join(DATA_DIR_NAME).join(DEFAULT_MODEL_FILE))
        .unwrap_or(local)
}

/// Positive integer, anything else falls back to the default
fn parse_top_n(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_TOP_N)
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && !value.is_empty()
}
