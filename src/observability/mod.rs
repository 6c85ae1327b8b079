//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, never secrets)
//!     → one `signing_run` span per run carrying a run ID
//!
//! Consumers:
//!     → stderr (human-readable or JSON lines)
//!     → stdout stays reserved for the signing URL / report
//! ```
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
