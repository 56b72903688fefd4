//! Raw Input - Form-collected video metrics
//!
//! Counts are unsigned so they cannot go negative. Durations are floats and
//! get checked in [`RawInput::validate`] before any ratio is computed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logic::error::ModelError;

// ============================================================================
// CATEGORICAL DOMAINS
// ============================================================================

/// Video category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Music,
    Gaming,
    Tech,
    Education,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Music,
        Category::Gaming,
        Category::Tech,
        Category::Education,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Gaming => "Gaming",
            Self::Tech => "Tech",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
        }
    }
}

/// Primary viewing device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Mobile,
    Desktop,
    TV,
    Tablet,
}

impl Device {
    pub const ALL: [Device; 4] = [Device::Mobile, Device::Desktop, Device::TV, Device::Tablet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Desktop => "Desktop",
            Self::TV => "TV",
            Self::Tablet => "Tablet",
        }
    }
}

/// Primary audience country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    US,
    IN,
    DE,
    UK,
    CA,
}

impl Country {
    pub const ALL: [Country; 5] = [Country::US, Country::IN, Country::DE, Country::UK, Country::CA];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::US => "US",
            Self::IN => "IN",
            Self::DE => "DE",
            Self::UK => "UK",
            Self::CA => "CA",
        }
    }
}

fn parse_label<T: Copy>(all: &[T], label: &str, field: &str, as_str: fn(&T) -> &'static str) -> Result<T, ModelError> {
    all.iter()
        .find(|v| as_str(v) == label)
        .copied()
        .ok_or_else(|| ModelError::DomainInput(format!("Unknown {}: '{}'", field, label)))
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, s, "category", Self::as_str)
    }
}

impl FromStr for Device {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, s, "device", Self::as_str)
    }
}

impl FromStr for Country {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, s, "country", Self::as_str)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RAW INPUT
// ============================================================================

/// One prediction request as entered in the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub subscribers: u64,
    pub watch_time_minutes: f64,
    pub video_length_minutes: f64,
    pub category: Category,
    pub device: Device,
    pub country: Country,
}

impl RawInput {
    /// Reject inputs whose ratios would be undefined
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.video_length_minutes.is_finite() || self.video_length_minutes <= 0.0 {
            return Err(ModelError::DomainInput(format!(
                "video_length_minutes must be > 0, got {}",
                self.video_length_minutes
            )));
        }

        if !self.watch_time_minutes.is_finite() || self.watch_time_minutes < 0.0 {
            return Err(ModelError::DomainInput(format!(
                "watch_time_minutes must be >= 0, got {}",
                self.watch_time_minutes
            )));
        }

        Ok(())
    }
}

impl Default for RawInput {
    /// Form defaults
    fn default() -> Self {
        Self {
            views: 10_000,
            likes: 500,
            comments: 50,
            subscribers: 50_000,
            watch_time_minutes: 3000.0,
            video_length_minutes: 10.0,
            category: Category::Music,
            device: Device::Mobile,
            country: Country::US,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        assert_eq!("Gaming".parse::<Category>().unwrap(), Category::Gaming);
        assert_eq!("TV".parse::<Device>().unwrap(), Device::TV);
        assert_eq!("UK".parse::<Country>().unwrap(), Country::UK);
    }

    #[test]
    fn test_parse_unknown_label_is_domain_error() {
        let err = "Sports".parse::<Category>().unwrap_err();
        assert!(matches!(err, ModelError::DomainInput(_)));
        assert!("us".parse::<Country>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Device::TV).unwrap();
        assert_eq!(json, "\"TV\"");
        let back: Country = serde_json::from_str("\"IN\"").unwrap();
        assert_eq!(back, Country::IN);
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        let raw = RawInput { video_length_minutes: 0.0, ..Default::default() };
        assert!(matches!(raw.validate(), Err(ModelError::DomainInput(_))));
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let raw = RawInput { video_length_minutes: -1.0, ..Default::default() };
        assert!(raw.validate().is_err());

        let raw = RawInput { watch_time_minutes: f64::NAN, ..Default::default() };
        assert!(raw.validate().is_err());

        let raw = RawInput { watch_time_minutes: -0.5, ..Default::default() };
        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(RawInput::default().validate().is_ok());
    }
}
