//! Credential resolution and the provider authentication header.
//!
//! # Security
//! - Secrets come from the environment or the config file, never from CLI args
//! - Secrets are never logged; `Debug` is redacted

use serde_json::json;

use crate::config::loader::ConfigError;
use crate::config::schema::CredentialsConfig;

/// Environment variable name for the integrator key.
pub const INTEGRATOR_KEY_ENV_VAR: &str = "ESIGN_INTEGRATOR_KEY";
/// Environment variable name for the account email.
pub const ACCOUNT_EMAIL_ENV_VAR: &str = "ESIGN_ACCOUNT_EMAIL";
/// Environment variable name for the account password.
pub const ACCOUNT_PASSWORD_ENV_VAR: &str = "ESIGN_ACCOUNT_PASSWORD";

/// Account credentials and integrator identity. Read-only once resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    account_email: String,
    account_password: String,
    integrator_key: String,
}

impl Credentials {
    /// Create credentials from explicit values.
    ///
    /// Fails with `MissingCredential` if any value is empty.
    pub fn new(
        account_email: impl Into<String>,
        account_password: impl Into<String>,
        integrator_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let account_email = non_empty(Some(account_email.into()), "account_email")?;
        let account_password = non_empty(Some(account_password.into()), "account_password")?;
        let integrator_key = non_empty(Some(integrator_key.into()), "integrator_key")?;

        Ok(Self {
            account_email,
            account_password,
            integrator_key,
        })
    }

    /// Resolve credentials with `lookup` taking precedence over the file section.
    pub fn resolve<F>(file: &CredentialsConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, fallback: &Option<String>| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| fallback.clone())
        };

        let account_email = non_empty(pick(ACCOUNT_EMAIL_ENV_VAR, &file.email), "account_email")?;
        let account_password = non_empty(
            pick(ACCOUNT_PASSWORD_ENV_VAR, &file.password),
            "account_password",
        )?;
        let integrator_key = non_empty(
            pick(INTEGRATOR_KEY_ENV_VAR, &file.integrator_key),
            "integrator_key",
        )?;

        tracing::debug!(account_email = %account_email, "Credentials resolved");

        Ok(Self {
            account_email,
            account_password,
            integrator_key,
        })
    }

    /// Resolve credentials from the process environment and the file section.
    pub fn from_env(file: &CredentialsConfig) -> Result<Self, ConfigError> {
        Self::resolve(file, |var| std::env::var(var).ok())
    }

    pub fn account_email(&self) -> &str {
        &self.account_email
    }

    pub fn integrator_key(&self) -> &str {
        &self.integrator_key
    }

    /// Value of the `X-DocuSign-Authentication` header.
    pub fn auth_header_value(&self) -> String {
        json!({
            "Username": self.account_email,
            "Password": self.account_password,
            "IntegratorKey": self.integrator_key,
        })
        .to_string()
    }
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingCredential(field)),
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_email", &self.account_email)
            .field("account_password", &"<redacted>")
            .field("integrator_key", &"<redacted>")
            .finish()
    }
}
