//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a signing run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the signing workflow.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SignerConfig {
    /// Provider REST endpoint and timeouts.
    pub api: ApiConfig,

    /// Embedded signing settings (return URL, account selection).
    pub signing: SigningConfig,

    /// Envelope presentation settings.
    pub envelope: EnvelopeConfig,

    /// Document acceptance rules.
    pub document: DocumentConfig,

    /// Credentials stored in the file. Environment variables take precedence.
    pub credentials: CredentialsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Provider API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST base path (e.g., "https://demo.docusign.net/restapi").
    pub base_path: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: "https://demo.docusign.net/restapi".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Embedded signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Where the provider redirects the signer after the session ends.
    pub return_url: String,

    /// How the host application authenticated the signer.
    pub authentication_method: String,

    /// Account to act on when the user belongs to several.
    pub account_id: Option<String>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            return_url: "http://www.docusign.com/developer-center".to_string(),
            authentication_method: "email".to_string(),
            account_id: None,
        }
    }
}

/// Envelope configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Subject line of the notification sent with the envelope.
    pub email_subject: String,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            email_subject: "Please sign this document".to_string(),
        }
    }
}

/// Document acceptance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Largest document accepted, in bytes.
    pub max_size_bytes: u64,

    /// Accepted file extensions, lowercase, without the dot.
    pub allowed_extensions: Vec<String>,

    /// Check leading magic bytes against the extension.
    pub verify_content: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: 25 * 1024 * 1024, // 25MB
            allowed_extensions: vec![
                "pdf".to_string(),
                "doc".to_string(),
                "docx".to_string(),
                "txt".to_string(),
            ],
            verify_content: true,
        }
    }
}

/// Credentials read from the config file.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    pub integrator_key: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("integrator_key", &self.integrator_key.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
