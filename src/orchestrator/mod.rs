//! Signing orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! SigningRequest
//!     → builder + document loader (offline checks, Idle)
//!     → api.login → account.rs (select account)      Idle → Authenticated
//!     → api.create_envelope (status "sent")           → EnvelopeCreated
//!       or reuse an envelope id when resuming
//!     → api.create_recipient_view (same clientUserId) → ViewObtained
//!     → SigningOutcome                                 → Done
//! Any error                                           → Failed(kind)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: each call completes before the next starts
//! - Identifiers are threaded explicitly between steps; no shared state
//! - No retries and no rollback: a failure after sending leaves the
//!   envelope at the provider, recoverable by resuming with its id

pub mod account;
pub mod engine;
pub mod state;

pub use account::select_account;
pub use engine::{OrchestratorSettings, SigningOrchestrator, SigningOutcome};
pub use state::{SigningRun, SigningState};
