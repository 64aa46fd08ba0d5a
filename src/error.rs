//! Error types for liblod

use crate::rdf::SerializeError;
use thiserror::Error;

/// Errors surfaced by the LOD client outside the per-request fetch path
#[derive(Error, Debug)]
pub enum LodError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// YAML configuration could not be read
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    /// RDF serialization error
    #[error("Serialization error: {0}")]
    SerializeError(#[from] SerializeError),
}

pub type LodResult<T> = Result<T, LodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: LodError = SerializeError::Serialize("bad term".to_string()).into();
        assert!(matches!(err, LodError::SerializeError(_)));
        assert_eq!(err.to_string(), "Serialization error: Serialization error: bad term");

        let err: LodError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, LodError::IoError(_)));
    }
}
