//! Shared test fixtures: a hand-checkable Lasso artifact and a counting source

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::artifact::{
    ArtifactSource, CategoricalColumnSpec, CategoricalSpec, LinearSpec, LoadedArtifact, NumericSpec,
    PipelineArtifact, PreprocessorSpec, UnknownPolicy,
};
use crate::logic::error::ModelError;
use crate::logic::features::layout::NUMERIC_LAYOUT;

pub const INTERCEPT: f64 = 5.0;

/// views, likes, comments, watch_time_minutes, video_length_minutes,
/// subscribers, engagement_rate, watch_time_per_min
pub const NUMERIC_WEIGHTS: [f64; 8] = [0.001, 0.002, 0.01, 0.05, -0.3, 0.0001, 100.0, 0.02];

pub const CATEGORY_WEIGHTS: [(&str, f64); 5] = [
    ("Music", 1.5),
    ("Gaming", 0.0),
    ("Tech", 2.0),
    ("Education", -1.0),
    ("Entertainment", 0.5),
];

pub const DEVICE_WEIGHTS: [(&str, f64); 4] = [("Mobile", -0.25), ("Desktop", 0.75), ("TV", 0.0), ("Tablet", 0.1)];

pub const COUNTRY_WEIGHTS: [(&str, f64); 5] = [("US", 3.0), ("IN", -2.0), ("DE", 1.0), ("UK", 0.8), ("CA", 0.6)];

fn column(name: &str, weights: &[(&str, f64)]) -> CategoricalColumnSpec {
    CategoricalColumnSpec {
        name: name.to_string(),
        categories: weights.iter().map(|(c, _)| c.to_string()).collect(),
        drop: None,
    }
}

pub fn sample_artifact() -> PipelineArtifact {
    let coefficients = NUMERIC_WEIGHTS
        .iter()
        .copied()
        .chain(CATEGORY_WEIGHTS.iter().map(|(_, w)| *w))
        .chain(DEVICE_WEIGHTS.iter().map(|(_, w)| *w))
        .chain(COUNTRY_WEIGHTS.iter().map(|(_, w)| *w))
        .collect();

    PipelineArtifact {
        format_version: 1,
        model_type: "lasso".to_string(),
        preprocessor: PreprocessorSpec {
            numeric: NumericSpec {
                features: NUMERIC_LAYOUT.iter().map(|s| s.to_string()).collect(),
                scaler: None,
            },
            categorical: CategoricalSpec {
                features: vec![
                    column("category", &CATEGORY_WEIGHTS),
                    column("device", &DEVICE_WEIGHTS),
                    column("country", &COUNTRY_WEIGHTS),
                ],
                handle_unknown: UnknownPolicy::Error,
            },
        },
        model: LinearSpec {
            coefficients,
            intercept: INTERCEPT,
            alpha: Some(0.1),
        },
    }
}

/// Source that counts how many times it was read
pub struct CountingSource {
    artifact: PipelineArtifact,
    pub reads: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(artifact: PipelineArtifact) -> Self {
        Self {
            artifact,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn read_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.reads)
    }
}

impl ArtifactSource for CountingSource {
    fn read(&self) -> Result<LoadedArtifact, ModelError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(LoadedArtifact {
            artifact: self.artifact.clone(),
            origin: "<stub>".to_string(),
            sha256: None,
        })
    }
}

/// Source that always fails, counting attempts
pub struct FailingSource {
    pub attempts: Arc<AtomicUsize>,
}

impl ArtifactSource for FailingSource {
    fn read(&self) -> Result<LoadedArtifact, ModelError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ModelError::ArtifactLoad("Model not found: <stub>".to_string()))
    }
}
