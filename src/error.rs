//! Error taxonomy for a signing run.
//!
//! Every step of the workflow surfaces one of these variants. Nothing is
//! retried or rolled back: the first error ends the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;
use crate::config::loader::ConfigError;

/// Errors that can end a signing run.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Configuration or credentials are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The document path does not resolve.
    #[error("Document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    /// The document exists but could not be read.
    #[error("Failed to read document {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The signing request or document is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider rejected the login or no usable account was returned.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The provider rejected the envelope.
    #[error("Envelope creation failed: {0}")]
    EnvelopeCreation(String),

    /// The provider rejected the recipient view request.
    #[error("Recipient view request failed: {0}")]
    ViewRequest(String),

    /// Network or protocol failure talking to the provider.
    #[error("Transport error: {0}")]
    Transport(#[from] ApiError),
}

/// Error class recorded in a failed run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    DocumentNotFound,
    DocumentRead,
    Validation,
    Auth,
    EnvelopeCreation,
    ViewRequest,
    Transport,
}

impl SigningError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            SigningError::Configuration(_) => FailureKind::Configuration,
            SigningError::DocumentNotFound { .. } => FailureKind::DocumentNotFound,
            SigningError::DocumentRead { .. } => FailureKind::DocumentRead,
            SigningError::Validation(_) => FailureKind::Validation,
            SigningError::Auth(_) => FailureKind::Auth,
            SigningError::EnvelopeCreation(_) => FailureKind::EnvelopeCreation,
            SigningError::ViewRequest(_) => FailureKind::ViewRequest,
            SigningError::Transport(_) => FailureKind::Transport,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type for signing operations.
pub type SigningResult<T> = Result<T, SigningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SigningError::DocumentNotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        assert_eq!(err.to_string(), "Document not found: /tmp/missing.pdf");

        let err = SigningError::Auth("401 USER_AUTHENTICATION_FAILED".into());
        assert!(err.to_string().starts_with("Authentication failed"));
    }

    #[test]
    fn test_kind_and_exit_code() {
        let err = SigningError::ViewRequest("bad client user id".into());
        assert_eq!(err.kind(), FailureKind::ViewRequest);
        assert_eq!(err.exit_code(), 1);

        let err = SigningError::Transport(ApiError::Timeout(30));
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
