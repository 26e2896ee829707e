use crate::core::models::{FailureDetail, FailureKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KilnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("No such directory exists as the project root: {}", .0.display())]
    ProjectDirectoryNotFound(PathBuf),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl KilnError {
    /// Create a configuration error
    pub fn config(message: String) -> Self {
        Self::Config(message)
    }

    /// Recognized kind carried by this error, if any
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            KilnError::InvalidConfiguration(_) => Some(FailureKind::InvalidConfiguration),
            KilnError::ProjectDirectoryNotFound(_) => Some(FailureKind::ProjectDirectoryNotFound),
            _ => None,
        }
    }

    /// Convert into a build failure. Tagged variants keep their code, the rest
    /// become untagged failures with the error as payload.
    pub fn into_failure(self) -> FailureDetail {
        let code = self.kind().map(|kind| kind.code().to_string());
        let message = self.to_string();
        FailureDetail {
            code,
            message,
            payload: anyhow::Error::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, KilnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_tagged() {
        let failure = KilnError::ProjectDirectoryNotFound(PathBuf::from("/nope")).into_failure();

        assert_eq!(failure.code.as_deref(), Some("PROJECT_DIRECTORY_NOT_FOUND"));
        assert_eq!(failure.message, "No such directory exists as the project root: /nope");
    }

    #[test]
    fn test_io_error_is_untagged() {
        let err = KilnError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"));
        let failure = err.into_failure();

        assert!(failure.code.is_none());
        assert!(failure.message.contains("disk on fire"));
    }
}
