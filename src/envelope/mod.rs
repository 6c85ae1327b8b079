//! Envelope construction subsystem.
//!
//! # Data Flow
//! ```text
//! SigningRequest + EncodedDocument
//!     → builder.rs (validate, one document / one signer / one tab)
//!     → EnvelopeDefinition (status "sent") → api client
//!
//! Signer from the envelope
//!     → RecipientViewRequest::for_signer → api client
//! ```
//!
//! # Design Decisions
//! - Builder is pure; validation failures never reach the network
//! - The view request is derived from the signer, not re-typed

pub mod builder;
pub mod types;

pub use builder::{EnvelopeBuilder, DOCUMENT_ID, RECIPIENT_ID};
pub use types::{
    Document, EnvelopeDefinition, EnvelopeStatus, RecipientView, RecipientViewRequest,
    Recipients, SignHere, Signer, SigningRequest, Tabs,
};
