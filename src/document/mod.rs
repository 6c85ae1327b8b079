//! Document loading subsystem.
//!
//! # Data Flow
//! ```text
//! local file path
//!     → loader.rs (existence, size, extension, signature checks)
//!     → base64 encoding
//!     → EncodedDocument → envelope builder
//! ```
//!
//! # Design Decisions
//! - One read-only file access per run, no mutation
//! - Checked before any network call so a bad path never authenticates

pub mod loader;
pub mod types;

pub use loader::DocumentLoader;
pub use types::{DocumentKind, EncodedDocument};
