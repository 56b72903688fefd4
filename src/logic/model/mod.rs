//! Model Module - Inference over a fitted regression pipeline
//!
//! - `artifact` - on-disk JSON schema, sources, checksum sidecar
//! - `pipeline` - preprocessing + linear stage, predict / explain
//! - `service` - load-once holder injected into hosts

pub mod artifact;
pub mod pipeline;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export common types
pub use artifact::{ArtifactSource, FileArtifactSource, LoadedArtifact, PipelineArtifact, UnknownPolicy};
pub use pipeline::FittedPipeline;
pub use service::{ModelMetadata, ModelService, PredictionResult};
