use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed handle token: {0}")]
    MalformedHandle(String),

    #[error("failed to encode handle token: {0}")]
    HandleEncode(String),

    #[error("invalid driver configuration: {0}")]
    InvalidConfig(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
