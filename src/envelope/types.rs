//! Envelope payload types.
//!
//! Field names follow the provider's camelCase JSON. Placement values are
//! sent as decimal strings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything needed to send one document to one embedded signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pub document_path: PathBuf,
    /// Name shown to the signer; defaults to the file name.
    pub document_name: Option<String>,
    pub recipient_name: String,
    pub recipient_email: String,
    /// Host-application identifier that marks the signer as embedded.
    pub client_user_id: String,
    pub page_number: u32,
    pub x_position: u32,
    pub y_position: u32,
}

/// Envelope status on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Saved as a draft.
    Created,
    /// Sent to recipients immediately.
    Sent,
}

/// Envelope creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDefinition {
    pub email_subject: String,
    pub documents: Vec<Document>,
    pub recipients: Recipients,
    pub status: EnvelopeStatus,
}

impl EnvelopeDefinition {
    /// The first (and, as built here, only) signer.
    pub fn signer(&self) -> Option<&Signer> {
        self.recipients.signers.first()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    pub document_base64: String,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("document_id", &self.document_id)
            .field("name", &self.name)
            .field("file_extension", &self.file_extension)
            .field("document_base64_len", &self.document_base64.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipients {
    #[serde(default)]
    pub signers: Vec<Signer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub name: String,
    pub email: String,
    pub recipient_id: String,
    pub client_user_id: String,
    pub tabs: Tabs,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tabs {
    #[serde(default)]
    pub sign_here_tabs: Vec<SignHere>,
}

/// Signature placement in pixels from the page's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignHere {
    pub document_id: String,
    pub page_number: String,
    pub recipient_id: String,
    pub x_position: String,
    pub y_position: String,
}

/// Request for an embedded signing session URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientViewRequest {
    pub user_name: String,
    pub email: String,
    pub return_url: String,
    pub authentication_method: String,
    pub client_user_id: String,
}

impl RecipientViewRequest {
    /// Build the view request for a signer already placed in an envelope.
    ///
    /// Identity fields are copied from `signer`, so the `clientUserId` always
    /// matches the one the envelope was created with.
    pub fn for_signer(signer: &Signer, return_url: &str, authentication_method: &str) -> Self {
        Self {
            user_name: signer.name.clone(),
            email: signer.email.clone(),
            return_url: return_url.to_string(),
            authentication_method: authentication_method.to_string(),
            client_user_id: signer.client_user_id.clone(),
        }
    }
}

/// Signing session URL. Terminal artifact of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientView {
    pub url: String,
}
