//! Host Commands - API for the presentation layer
//!
//! Each command returns `Result<_, String>` so a UI can show the message
//! as-is. Errors are never retried here.

use serde::{Deserialize, Serialize};

use super::engine_status::{EngineStatus, ModelStatus};
use crate::logic::explain::CoefficientReport;
use crate::logic::features::{Category, Country, Device, LayoutInfo, RawInput};
use crate::logic::model::ModelService;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Bounds and defaults for one numeric form field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericField {
    pub key: String,
    pub label: String,
    pub min: f64,
    pub default: f64,
    pub step: f64,
}

/// Options for one select box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceField {
    pub key: String,
    pub label: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSpec {
    pub numeric: Vec<NumericField>,
    pub choices: Vec<ChoiceField>,
}

/// Prediction as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenuePrediction {
    pub value: f64,
    pub raw_value: f64,
    pub floored: bool,
    /// e.g. `$12,345.67 USD`
    pub formatted: String,
    pub inference_time_us: u64,
}

/// Bar chart data: feature label → signed weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl From<&CoefficientReport> for ChartSeries {
    fn from(report: &CoefficientReport) -> Self {
        Self {
            title: "Top Revenue Drivers".to_string(),
            labels: report.features(),
            values: report.weights(),
        }
    }
}

/// Static narrative shown next to the chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInsights {
    pub title: String,
    pub findings: Vec<String>,
    pub conclusion: String,
}

// ============================================================================
// FORM
// ============================================================================

fn numeric(key: &str, label: &str, min: f64, default: f64, step: f64) -> NumericField {
    NumericField {
        key: key.to_string(),
        label: label.to_string(),
        min,
        default,
        step,
    }
}

fn choice(key: &str, label: &str, options: impl IntoIterator<Item = &'static str>) -> ChoiceField {
    ChoiceField {
        key: key.to_string(),
        label: label.to_string(),
        options: options.into_iter().map(str::to_string).collect(),
    }
}

/// Field bounds, defaults and option lists for the prediction form
pub fn form_spec() -> FormSpec {
    let defaults = RawInput::default();

    FormSpec {
        numeric: vec![
            numeric("views", "Views", 0.0, defaults.views as f64, 1000.0),
            numeric("likes", "Likes", 0.0, defaults.likes as f64, 50.0),
            numeric("comments", "Comments", 0.0, defaults.comments as f64, 10.0),
            numeric("subscribers", "Channel Subscribers", 0.0, defaults.subscribers as f64, 1000.0),
            numeric("watch_time_minutes", "Watch Time (minutes)", 0.0, defaults.watch_time_minutes, 100.0),
            numeric("video_length_minutes", "Video Length (minutes)", 0.1, defaults.video_length_minutes, 0.5),
        ],
        choices: vec![
            choice("category", "Video Category", Category::ALL.iter().map(|c| c.as_str())),
            choice("device", "Primary Device", Device::ALL.iter().map(|d| d.as_str())),
            choice("country", "Primary Audience Country", Country::ALL.iter().map(|c| c.as_str())),
        ],
    }
}

// ============================================================================
// MODEL COMMANDS
// ============================================================================

/// Load the model eagerly (startup). A failure here is fatal for the host.
pub fn load_model(service: &ModelService) -> Result<bool, String> {
    service.pipeline().map(|_| true).map_err(|e| e.to_string())
}

/// Build features, predict and format the estimate
pub fn predict_revenue(service: &ModelService, raw: &RawInput) -> Result<RevenuePrediction, String> {
    let result = service.predict(raw).map_err(|e| {
        log::warn!("Prediction failed: {}", e);
        e.to_string()
    })?;

    Ok(RevenuePrediction {
        value: result.value,
        raw_value: result.raw_value,
        floored: result.floored,
        formatted: format!("{} USD", format_currency(result.value)),
        inference_time_us: result.inference_time_us,
    })
}

/// Coefficient report ready for a bar chart
pub fn top_revenue_drivers(service: &ModelService) -> Result<ChartSeries, String> {
    let report = service.explain().map_err(|e| e.to_string())?;
    Ok(ChartSeries::from(&report))
}

pub fn model_insights() -> ModelInsights {
    ModelInsights {
        title: "Key Findings".to_string(),
        findings: vec![
            "Watch Time is the strongest predictor of ad revenue.".to_string(),
            "Engagement metrics (likes & comments) significantly increase monetization.".to_string(),
            "Views matter, but retention matters more.".to_string(),
            "Country and device influence revenue due to CPM differences.".to_string(),
        ],
        conclusion: "Revenue is driven more by engagement quality than raw reach.".to_string(),
    }
}

pub fn engine_status(service: &ModelService) -> EngineStatus {
    let metadata = service.metadata();

    EngineStatus {
        layout: LayoutInfo::current(),
        model: ModelStatus {
            loaded: metadata.is_some(),
            metadata,
        },
        prediction_count: service.prediction_count(),
        avg_latency_ms: service.avg_latency_ms(),
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// `$1,234.56`; negative values keep their sign after the symbol
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, frac_part)
}

// ============================================================================
// TESTS
// ============================================================================
