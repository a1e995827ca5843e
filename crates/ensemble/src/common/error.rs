use thiserror::Error;

use crate::common::error::EnsembleError::GenericError;

#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Resource error: {0}")]
    ResourceError(#[from] rsets::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<serde_json::error::Error> for EnsembleError {
    fn from(e: serde_json::error::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for EnsembleError {
    fn from(error: toml::de::Error) -> Self {
        Self::DeserializationError(error.to_string())
    }
}

pub fn error<T>(message: String) -> crate::Result<T> {
    Err(GenericError(message))
}
