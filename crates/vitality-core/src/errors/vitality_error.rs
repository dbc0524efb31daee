use super::StorageError;

/// Top-level error type for the vitality engine.
#[derive(Debug, thiserror::Error)]
pub enum VitalityError {
    #[error("relationship not found: {id}")]
    RelationshipNotFound { id: String },

    #[error("interaction not found: {id}")]
    InteractionNotFound { id: String },

    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("learning task {task} failed: {reason}")]
    LearningTaskFailed { task: String, reason: String },
}

impl From<serde_json::Error> for VitalityError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Convenience alias used throughout the workspace.
pub type VitalityResult<T> = Result<T, VitalityError>;
