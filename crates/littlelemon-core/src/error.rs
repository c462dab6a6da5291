//! Error taxonomy shared by the stores, the loader and the profile code.

use thiserror::Error;
use tokio_rusqlite::rusqlite;

use crate::api::ApiError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure talking to the remote menu resource.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The remote payload was not a `{ menu: [...] }` document.
    #[error("Failed to parse menu payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Local menu table failure.
    #[error("Storage error: {0}")]
    Storage(tokio_rusqlite::Error),

    /// Key-value store failure.
    #[error("Key-value store error: {0}")]
    KeyValue(String),

    /// Input did not pass the field checks. Never tied to a single field.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Storage(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Storage(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KeyValue("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_validation_flag() {
        assert!(Error::Validation("incomplete".into()).is_validation());
        assert!(!Error::KeyValue("x".into()).is_validation());
    }

    #[test]
    fn test_from_rusqlite() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Storage(_)));
    }
}
