//! Credential provider.
//!
//! # Data Flow
//! ```text
//! Environment Variables (integrator key, email, password)
//!     + [credentials] section of the config file (fallback)
//!     → provider.rs (lookup, non-empty checks)
//!     → Credentials (read-only for the whole run)
//!     → api client (authentication header)
//! ```

pub mod provider;

pub use provider::{
    Credentials, ACCOUNT_EMAIL_ENV_VAR, ACCOUNT_PASSWORD_ENV_VAR, INTEGRATOR_KEY_ENV_VAR,
};
