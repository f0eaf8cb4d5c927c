use thiserror::Error;

use lxcd_model::ModelError;

use crate::runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum DriverError {
    /// Task configuration missing or malformed. Fatal to `start`, never
    /// retried automatically.
    #[error("invalid task configuration: {0}")]
    Config(String),

    /// Container creation failed. Surfaced without retry: a blind retry may
    /// repeat a naming collision or resource exhaustion.
    #[error("unable to create container '{name}': {source}")]
    Create { name: String, source: RuntimeError },

    /// Container was created but failed to start. The created container is
    /// left in place for the operator to decide cleanup.
    #[error("unable to start container '{name}': {source}")]
    Start { name: String, source: RuntimeError },

    /// Handle token could not be parsed. Fatal to `open`.
    #[error("failed to parse handle token: {0}")]
    Decode(String),

    #[error("failed to encode handle token: {0}")]
    Encode(String),

    /// Decoded identity matches no live container. The task must be treated
    /// as lost; recreating it could duplicate work.
    #[error("container '{name}' not found")]
    HandleNotFound { name: String },
}

impl From<ModelError> for DriverError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::MalformedHandle(msg) => DriverError::Decode(msg),
            ModelError::HandleEncode(msg) => DriverError::Encode(msg),
            ModelError::InvalidConfig(msg) => DriverError::Config(msg),
        }
    }
}
