//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs (base path, return URL) and value ranges (timeouts > 0)
//! - Validate document acceptance rules
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SignerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::SignerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &SignerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_http_url(&config.api.base_path) {
        errors.push(ValidationError::new("api.base_path", reason));
    }
    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::new("api.request_timeout_secs", "must be greater than 0"));
    }
    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("api.connect_timeout_secs", "must be greater than 0"));
    }

    if let Err(reason) = check_http_url(&config.signing.return_url) {
        errors.push(ValidationError::new("signing.return_url", reason));
    }
    if config.signing.authentication_method.trim().is_empty() {
        errors.push(ValidationError::new("signing.authentication_method", "must not be empty"));
    }
    if matches!(&config.signing.account_id, Some(id) if id.trim().is_empty()) {
        errors.push(ValidationError::new("signing.account_id", "must not be empty when set"));
    }

    if config.document.max_size_bytes == 0 {
        errors.push(ValidationError::new("document.max_size_bytes", "must be greater than 0"));
    }
    if config.document.allowed_extensions.is_empty() {
        errors.push(ValidationError::new("document.allowed_extensions", "must list at least one extension"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
