use serde::{Deserialize, Serialize};

use crate::logic::features::LayoutInfo;
use crate::logic::model::ModelMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub layout: LayoutInfo,
    pub model: ModelStatus,
    pub prediction_count: u64,
    pub avg_latency_ms: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub metadata: Option<ModelMetadata>,
}
