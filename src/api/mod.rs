//! Provider API subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials + [api] config
//!     → client.rs (per-run reqwest client, auth header, timeouts)
//!     → login / create_envelope / create_recipient_view
//!     → types.rs (decoded responses or ApiError)
//! ```
//!
//! # Design Decisions
//! - The orchestrator only sees the `SigningApi` trait, so tests swap in fakes
//! - No retries: envelope creation is not idempotent
//! - Every call has a deadline

pub mod client;
pub mod types;

pub use client::{DocuSignClient, SigningApi, AUTH_HEADER};
pub use types::{
    ApiError, ApiResult, EnvelopeSummary, ErrorDetails, LoginAccount, LoginInformation, ViewUrl,
};
