//! Error taxonomy shared by feature building and inference.
//!
//! All failures are deterministic for a given input, so nothing here is
//! retried. Hosts match on [`ErrorKind`] to decide how to surface them.

use serde::{Deserialize, Serialize};

/// Coarse error category for hosting surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Fatal at startup: no usable model
    ArtifactLoad,
    /// Prediction failure: record and pipeline disagree structurally
    SchemaMismatch,
    /// Validation failure: rejected before touching the model
    DomainInput,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Artifact missing, unreadable, corrupt or not introspectable
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    /// Record fields don't match what the fitted pipeline expects
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Raw input violates a domain bound
    #[error("Invalid input: {0}")]
    DomainInput(String),
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArtifactLoad(_) => ErrorKind::ArtifactLoad,
            Self::SchemaMismatch(_) => ErrorKind::SchemaMismatch,
            Self::DomainInput(_) => ErrorKind::DomainInput,
        }
    }

    /// Whether the host should stop instead of showing a message
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::ArtifactLoad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ModelError::ArtifactLoad("x".into()).kind(), ErrorKind::ArtifactLoad);
        assert_eq!(ModelError::SchemaMismatch("x".into()).kind(), ErrorKind::SchemaMismatch);
        assert_eq!(ModelError::DomainInput("x".into()).kind(), ErrorKind::DomainInput);
    }

    #[test]
    fn test_only_load_errors_are_fatal() {
        assert!(ModelError::ArtifactLoad("missing".into()).is_fatal());
        assert!(!ModelError::SchemaMismatch("extra column".into()).is_fatal());
        assert!(!ModelError::DomainInput("zero length".into()).is_fatal());
    }

    #[test]
    fn test_display_carries_cause() {
        let err = ModelError::DomainInput("video_length_minutes must be > 0".into());
        assert_eq!(err.to_string(), "Invalid input: video_length_minutes must be > 0");
    }
}
