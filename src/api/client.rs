//! Provider REST client.
//!
//! # Responsibilities
//! - Authenticate every request with the legacy credentials header
//! - Login, create envelope, create recipient view
//! - Enforce connect and request timeouts
//! - Decode provider error bodies into `ApiError::Status`

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::types::{
    ApiError, ApiResult, EnvelopeSummary, ErrorDetails, LoginInformation, ViewUrl,
};
use crate::config::schema::ApiConfig;
use crate::credentials::Credentials;
use crate::envelope::{EnvelopeDefinition, RecipientViewRequest};

/// Header carrying the JSON-encoded credentials.
pub const AUTH_HEADER: &str = "x-docusign-authentication";

/// The three provider operations a signing run consumes.
#[async_trait]
pub trait SigningApi: Send + Sync {
    /// List the accounts the authenticated user belongs to.
    async fn login(&self) -> ApiResult<LoginInformation>;

    /// Create (and, with status "sent", send) an envelope.
    async fn create_envelope(
        &self,
        account_id: &str,
        envelope: &EnvelopeDefinition,
    ) -> ApiResult<EnvelopeSummary>;

    /// Request a signing session URL for an embedded recipient.
    async fn create_recipient_view(
        &self,
        account_id: &str,
        envelope_id: &str,
        request: &RecipientViewRequest,
    ) -> ApiResult<ViewUrl>;
}

/// `SigningApi` over the provider's REST surface.
///
/// One instance per run: the credentials header is baked into the client.
#[derive(Clone)]
pub struct DocuSignClient {
    http: Client,
    base_path: String,
    timeout_secs: u64,
}

impl DocuSignClient {
    pub fn new(config: &ApiConfig, credentials: &Credentials) -> ApiResult<Self> {
        let mut auth = HeaderValue::from_str(&credentials.auth_header_value())
            .map_err(|e| ApiError::Setup(format!("credentials are not a valid header: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTH_HEADER), auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("esign-embed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(base_path = %config.base_path, "Provider client initialized");

        Ok(Self {
            http,
            base_path: config.base_path.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Transport(e)
        }
    }
}

#[async_trait]
impl SigningApi for DocuSignClient {
    async fn login(&self) -> ApiResult<LoginInformation> {
        let resp = self
            .http
            .get(format!("{}/v2/login_information", self.base_path))
            .query(&[("api_password", "true"), ("include_account_id_guid", "true")])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        decode(resp).await
    }

    async fn create_envelope(
        &self,
        account_id: &str,
        envelope: &EnvelopeDefinition,
    ) -> ApiResult<EnvelopeSummary> {
        let resp = self
            .http
            .post(format!("{}/v2/accounts/{}/envelopes", self.base_path, account_id))
            .json(envelope)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        decode(resp).await
    }

    async fn create_recipient_view(
        &self,
        account_id: &str,
        envelope_id: &str,
        request: &RecipientViewRequest,
    ) -> ApiResult<ViewUrl> {
        let resp = self
            .http
            .post(format!(
                "{}/v2/accounts/{}/envelopes/{}/views/recipient",
                self.base_path, account_id, envelope_id
            ))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        decode(resp).await
    }
}

/// Turn a response into `T`, or into `ApiError::Status` on non-2xx.
async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let details: ErrorDetails = serde_json::from_str(&text).unwrap_or_default();
        let message = details
            .message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            code: details.error_code,
            message,
        });
    }

    serde_json::from_str::<T>(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

impl std::fmt::Debug for DocuSignClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocuSignClient")
            .field("base_path", &self.base_path)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
