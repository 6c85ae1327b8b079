//! Provider response types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of the login call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInformation {
    /// A user may belong to several accounts.
    #[serde(default)]
    pub login_accounts: Vec<LoginAccount>,
}

/// One account the authenticated user can act on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginAccount {
    pub account_id: String,
    pub account_id_guid: Option<String>,
    pub name: Option<String>,
    /// The provider reports this as the string "true" or "false".
    pub is_default: Option<String>,
    pub base_url: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
}

impl LoginAccount {
    pub fn is_default(&self) -> bool {
        self.is_default
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Result of envelope creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub envelope_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_date_time: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Result of a recipient view request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewUrl {
    pub url: String,
}

/// Error body returned by the provider on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorDetails {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

/// Errors from the provider API binding.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failed or the request could not be sent.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// No response within the configured deadline.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}{}: {message}", code_suffix(.code))]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    /// The client could not be constructed.
    #[error("invalid client setup: {0}")]
    Setup(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" {}", c)).unwrap_or_default()
}

/// Result type for provider API calls.
pub type ApiResult<T> = Result<T, ApiError>;
