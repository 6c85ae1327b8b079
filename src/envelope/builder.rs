//! Builds the envelope payload from a signing request.

use crate::document::EncodedDocument;
use crate::envelope::types::{
    Document, EnvelopeDefinition, EnvelopeStatus, Recipients, SignHere, Signer, SigningRequest,
    Tabs,
};
use crate::error::{SigningError, SigningResult};

/// Identifier of the single document in every envelope built here.
pub const DOCUMENT_ID: &str = "1";
/// Identifier of the single signer in every envelope built here.
pub const RECIPIENT_ID: &str = "1";

/// Stateless envelope builder: same input, equivalent payload.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    email_subject: String,
}

impl EnvelopeBuilder {
    pub fn new(email_subject: impl Into<String>) -> Self {
        Self {
            email_subject: email_subject.into(),
        }
    }

    /// Validate `request` and build its embedded signer with one signature tab.
    pub fn signer(&self, request: &SigningRequest) -> SigningResult<Signer> {
        validate_request(request)?;

        Ok(Signer {
            name: request.recipient_name.trim().to_string(),
            email: request.recipient_email.trim().to_string(),
            recipient_id: RECIPIENT_ID.to_string(),
            client_user_id: request.client_user_id.clone(),
            tabs: Tabs {
                sign_here_tabs: vec![SignHere {
                    document_id: DOCUMENT_ID.to_string(),
                    page_number: request.page_number.to_string(),
                    recipient_id: RECIPIENT_ID.to_string(),
                    x_position: request.x_position.to_string(),
                    y_position: request.y_position.to_string(),
                }],
            },
        })
    }

    /// Build an envelope with one document, one signer and one signature tab,
    /// ready to be sent.
    pub fn build(
        &self,
        request: &SigningRequest,
        document: &EncodedDocument,
    ) -> SigningResult<EnvelopeDefinition> {
        let signer = self.signer(request)?;

        let name = request
            .document_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&document.name);
        if name.trim().is_empty() {
            return Err(SigningError::Validation("document name is required".into()));
        }

        Ok(EnvelopeDefinition {
            email_subject: self.email_subject.clone(),
            documents: vec![Document {
                document_id: DOCUMENT_ID.to_string(),
                name: name.to_string(),
                file_extension: Some(document.file_extension.clone())
                    .filter(|e| !e.is_empty()),
                document_base64: document.base64.clone(),
            }],
            recipients: Recipients {
                signers: vec![signer],
            },
            status: EnvelopeStatus::Sent,
        })
    }
}

fn validate_request(request: &SigningRequest) -> SigningResult<()> {
    if request.recipient_name.trim().is_empty() {
        return Err(SigningError::Validation("recipient name is required".into()));
    }
    let email = request.recipient_email.trim();
    if email.is_empty() {
        return Err(SigningError::Validation("recipient email is required".into()));
    }
    if !email.contains('@') {
        return Err(SigningError::Validation(format!(
            "recipient email '{}' is not an email address",
            email
        )));
    }
    // Embedded signing is impossible without it.
    if request.client_user_id.trim().is_empty() {
        return Err(SigningError::Validation("client user id is required".into()));
    }
    if request.page_number == 0 {
        return Err(SigningError::Validation("page number starts at 1".into()));
    }
    Ok(())
}
