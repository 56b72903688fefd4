//! Model Service - Load-once pipeline holder
//!
//! Replaces a process-global model cache. Hosts construct one service and
//! hand it to whatever needs predictions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::artifact::{ArtifactSource, FileArtifactSource};
use super::pipeline::FittedPipeline;
use crate::logic::config::ModelConfig;
use crate::logic::error::ModelError;
use crate::logic::explain::CoefficientReport;
use crate::logic::features::{self, RawInput};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Captured when the artifact is loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub features: usize,
    pub sha256: Option<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Prediction output
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictionResult {
    /// Value handed to the host (floored if configured)
    pub value: f64,
    /// Model output before any flooring
    pub raw_value: f64,
    pub floored: bool,
    pub inference_time_us: u64,
}

struct LoadedModel {
    pipeline: Arc<FittedPipeline>,
    metadata: ModelMetadata,
}

/// Latency stats
#[derive(Debug, Default)]
struct InferenceStats {
    latency_sum_us: AtomicU64,
    count: AtomicU64,
}

// ============================================================================
// MODEL SERVICE
// ============================================================================

pub struct ModelService {
    source: Box<dyn ArtifactSource>,
    config: ModelConfig,
    loaded: OnceCell<LoadedModel>,
    stats: InferenceStats,
}

impl ModelService {
    pub fn new(source: Box<dyn ArtifactSource>, config: ModelConfig) -> Self {
        Self {
            source,
            config,
            loaded: OnceCell::new(),
            stats: InferenceStats::default(),
        }
    }

    /// Service reading a JSON artifact from `path`
    pub fn from_path(path: impl Into<std::path::PathBuf>, config: ModelConfig) -> Self {
        let source = FileArtifactSource::new(path).with_checksum_verification(config.verify_checksum);
        Self::new(Box::new(source), config)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The fitted pipeline, loading it on first call.
    ///
    /// Concurrent first calls block on a single initialization. A failed load
    /// is not cached.
    pub fn pipeline(&self) -> Result<Arc<FittedPipeline>, ModelError> {
        self.loaded().map(|m| Arc::clone(&m.pipeline))
    }

    fn loaded(&self) -> Result<&LoadedModel, ModelError> {
        self.loaded.get_or_try_init(|| {
            let loaded = self.source.read()?;
            let pipeline = FittedPipeline::from_artifact(loaded.artifact)?;

            let metadata = ModelMetadata {
                model_path: loaded.origin,
                model_type: pipeline.model_type().to_string(),
                features: pipeline.n_features_out(),
                sha256: loaded.sha256,
                loaded_at: chrono::Utc::now(),
            };

            log::info!(
                "Model loaded: {} ({} expanded features, type={})",
                metadata.model_path,
                metadata.features,
                metadata.model_type
            );

            Ok(LoadedModel {
                pipeline: Arc::new(pipeline),
                metadata,
            })
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn metadata(&self) -> Option<ModelMetadata> {
        self.loaded.get().map(|m| m.metadata.clone())
    }

    /// Build features, then run the pipeline.
    ///
    /// Input validation happens before the model is touched, so a bad form
    /// never triggers a load.
    pub fn predict(&self, raw: &RawInput) -> Result<PredictionResult, ModelError> {
        let record = features::build(raw)?;
        let pipeline = self.pipeline()?;

        let start_time = Instant::now();
        let raw_value = pipeline.predict(&record)?;
        let inference_time = start_time.elapsed().as_micros() as u64;

        self.stats.latency_sum_us.fetch_add(inference_time, Ordering::Relaxed);
        self.stats.count.fetch_add(1, Ordering::Relaxed);

        let floored = self.config.floor_at_zero && raw_value < 0.0;
        let value = if floored { 0.0 } else { raw_value };

        log::debug!("Predicted {:.4} in {}us for {}", raw_value, inference_time, record.to_log_entry());

        Ok(PredictionResult {
            value,
            raw_value,
            floored,
            inference_time_us: inference_time,
        })
    }

    /// Top drivers using the configured cut-off
    pub fn explain(&self) -> Result<CoefficientReport, ModelError> {
        Ok(self.pipeline()?.explain(self.config.top_n))
    }

    pub fn prediction_count(&self) -> u64 {
        self.stats.count.load(Ordering::Relaxed)
    }

    pub fn avg_latency_ms(&self) -> f32 {
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let count = self.stats.count.load(Ordering::Relaxed);
        if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        }
    }
}
