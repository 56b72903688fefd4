//! Feature Layout - Centralized Column Definition
//!
//! **This file controls the record schema handed to the fitted pipeline.**
//!
//! The pipeline was fitted on a data frame with these exact column names.
//! Nothing re-checks the names at build time; a drift here only shows up as a
//! schema mismatch when `predict` is called.
//!
//! ## Rules
//! 1. Add column → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove column → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current record layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Numeric columns, in the order the preprocessing stage concatenates them
pub const NUMERIC_LAYOUT: &[&str] = &[
    // === Raw counts / durations (0-5) ===
    "views",
    "likes",
    "comments",
    "watch_time_minutes",
    "video_length_minutes",
    "subscribers",

    // === Derived ratios (6-7) ===
    "engagement_rate",       // (likes + comments) / views, 0 when views == 0
    "watch_time_per_min",    // watch_time_minutes / video_length_minutes
];

/// Categorical columns, passed through unencoded
/// (the pipeline's encoder expands them, e.g. `category_Gaming`)
pub const CATEGORICAL_LAYOUT: &[&str] = &[
    "category",              // Music, Gaming, Tech, Education, Entertainment
    "device",                // Mobile, Desktop, TV, Tablet
    "country",               // US, IN, DE, UK, CA (CPM differs per market)
];

/// Every column name in record order
pub const FEATURE_LAYOUT: &[&str] = &[
    "views",
    "likes",
    "comments",
    "watch_time_minutes",
    "video_length_minutes",
    "subscribers",
    "engagement_rate",
    "watch_time_per_min",
    "category",
    "device",
    "country",
];

/// Total number of columns
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 11;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version + ordered column names
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// TESTS
// ============================================================================
