//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SignerConfig (validated, immutable)
//!     → passed by reference into the credential provider,
//!       document loader, API client and orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded and lives for one run
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets may live in the file but environment variables win

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::SignerConfig;
pub use schema::ApiConfig;
pub use schema::CredentialsConfig;
pub use schema::DocumentConfig;
pub use schema::SigningConfig;
