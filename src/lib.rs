//! Embedded e-signature workflow library.
//!
//! Sends one local document to one embedded signer through the provider's
//! REST API and returns the signing session URL.

pub mod api;
pub mod config;
pub mod credentials;
pub mod document;
pub mod envelope;
pub mod error;
pub mod observability;
pub mod orchestrator;

pub use api::{DocuSignClient, SigningApi};
pub use config::SignerConfig;
pub use credentials::Credentials;
pub use envelope::SigningRequest;
pub use error::{FailureKind, SigningError, SigningResult};
pub use orchestrator::{SigningOrchestrator, SigningOutcome, SigningRun, SigningState};
