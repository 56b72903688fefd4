//! Feature Record - Model input built from a [`RawInput`]
//!
//! Uses the centralized layout from `layout.rs` for:
//! - Consistent column ordering
//! - Version tracking
//! - Layout hash for logging

use serde::{Deserialize, Serialize};

use super::input::{Category, Country, Device, RawInput};
use super::layout::{layout_hash, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::error::ModelError;

// ============================================================================
// FEATURE BUILDER
// ============================================================================

/// Map raw form input to the record the pipeline consumes.
///
/// Validates durations first; a zero or negative video length is a
/// [`ModelError::DomainInput`] and never reaches the ratio math.
pub fn build(raw: &RawInput) -> Result<FeatureRecord, ModelError> {
    raw.validate()?;

    let engagement_rate = if raw.views > 0 {
        (raw.likes as f64 + raw.comments as f64) / raw.views as f64
    } else {
        0.0
    };
    let watch_time_per_min = raw.watch_time_minutes / raw.video_length_minutes;

    Ok(FeatureRecord {
        views: raw.views,
        likes: raw.likes,
        comments: raw.comments,
        watch_time_minutes: raw.watch_time_minutes,
        video_length_minutes: raw.video_length_minutes,
        subscribers: raw.subscribers,
        engagement_rate,
        watch_time_per_min,
        category: raw.category,
        device: raw.device,
        country: raw.country,
    })
}

// ============================================================================
// FEATURE RECORD
// ============================================================================

/// Derived record, field order follows `FEATURE_LAYOUT`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub watch_time_minutes: f64,
    pub video_length_minutes: f64,
    pub subscribers: u64,
    pub engagement_rate: f64,
    pub watch_time_per_min: f64,
    pub category: Category,
    pub device: Device,
    pub country: Country,
}

/// Numeric fields copied verbatim from the raw input
#[derive(Debug, Clone, PartialEq)]
pub struct RawNumeric {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub subscribers: u64,
    pub watch_time_minutes: f64,
    pub video_length_minutes: f64,
}

impl FeatureRecord {
    /// Tabular view handed to the pipeline
    pub fn to_row(&self) -> FeatureRow {
        let numeric = [
            self.views as f64,
            self.likes as f64,
            self.comments as f64,
            self.watch_time_minutes,
            self.video_length_minutes,
            self.subscribers as f64,
            self.engagement_rate,
            self.watch_time_per_min,
        ];
        let categorical = [self.category.as_str(), self.device.as_str(), self.country.as_str()];

        let values = numeric
            .into_iter()
            .map(FeatureValue::Numeric)
            .chain(categorical.into_iter().map(|c| FeatureValue::Categorical(c.to_string())));

        FeatureRow {
            columns: FEATURE_LAYOUT
                .iter()
                .map(|name| name.to_string())
                .zip(values)
                .collect(),
        }
    }

    /// Recover the passthrough fields
    pub fn raw_numeric(&self) -> RawNumeric {
        RawNumeric {
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            subscribers: self.subscribers,
            watch_time_minutes: self.watch_time_minutes,
            video_length_minutes: self.video_length_minutes,
        }
    }

    /// JSON form for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": FEATURE_VERSION,
            "layout_hash": layout_hash(),
            "record": self,
        })
    }
}

impl TryFrom<&RawInput> for FeatureRecord {
    type Error = ModelError;

    fn try_from(raw: &RawInput) -> Result<Self, Self::Error> {
        build(raw)
    }
}

// ============================================================================
// FEATURE ROW
// ============================================================================

/// One cell of a [`FeatureRow`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

/// Ordered named columns, the single-row table the pipeline predicts on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    /// Append a column
    pub fn with(mut self, name: &str, value: FeatureValue) -> Self {
        self.columns.push((name.to_string(), value));
        self
    }

    /// Remove a column by name, returning its value
    pub fn remove(&mut self, name: &str) -> Option<FeatureValue> {
        let index = self.columns.iter().position(|(n, _)| n == name)?;
        Some(self.columns.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_COUNT;

    #[test]
    fn test_row_follows_layout() {
        let record = build(&RawInput::default()).unwrap();
        let row = record.to_row();

        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row.names().collect::<Vec<_>>(), FEATURE_LAYOUT);
    }

    #[test]
    fn test_row_cell_types() {
        let row = build(&RawInput::default()).unwrap().to_row();

        assert_eq!(row.get("views"), Some(&FeatureValue::Numeric(10_000.0)));
        assert_eq!(row.get("device"), Some(&FeatureValue::Categorical("Mobile".to_string())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_row_remove() {
        let mut row = build(&RawInput::default()).unwrap().to_row();
        assert!(row.remove("likes").is_some());
        assert!(row.remove("likes").is_none());
        assert_eq!(row.len(), FEATURE_COUNT - 1);
    }

    #[test]
    fn test_try_from_raw() {
        let raw = RawInput { video_length_minutes: 0.0, ..Default::default() };
        assert!(FeatureRecord::try_from(&raw).is_err());
    }

    #[test]
    fn test_to_log_entry() {
        let log = build(&RawInput::default()).unwrap().to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["record"]["category"], "Music");
        assert!(log["layout_hash"].as_u64().is_some());
    }
}
