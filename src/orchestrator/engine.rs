//! Drives one signing run against the provider.

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{ApiError, SigningApi};
use crate::config::schema::{SignerConfig, SigningConfig};
use crate::document::DocumentLoader;
use crate::envelope::{
    EnvelopeBuilder, EnvelopeDefinition, RecipientView, RecipientViewRequest, SigningRequest,
};
use crate::error::{SigningError, SigningResult};
use crate::orchestrator::account::select_account;
use crate::orchestrator::state::{SigningRun, SigningState};

/// Per-run settings for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub return_url: String,
    pub authentication_method: String,
    /// Explicit account to act on.
    pub account_id: Option<String>,
    /// Skip envelope creation and reuse an already-sent envelope.
    pub resume_envelope_id: Option<String>,
}

impl OrchestratorSettings {
    pub fn from_config(config: &SigningConfig) -> Self {
        Self {
            return_url: config.return_url.clone(),
            authentication_method: config.authentication_method.clone(),
            account_id: config.account_id.clone(),
            resume_envelope_id: None,
        }
    }
}

/// What a successful run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningOutcome {
    pub account_id: String,
    pub envelope_id: String,
    pub view: RecipientView,
    /// The envelope was reused rather than created by this run.
    pub resumed: bool,
}

/// Which provider call an `ApiError` came from.
#[derive(Debug, Clone, Copy)]
enum Step {
    Login,
    CreateEnvelope,
    RecipientView,
}

/// Sequences login → create envelope → recipient view.
///
/// Document and request checks run first so nothing invalid ever reaches
/// the provider. No step is retried.
pub struct SigningOrchestrator<A> {
    api: A,
    loader: DocumentLoader,
    builder: EnvelopeBuilder,
    settings: OrchestratorSettings,
}

impl<A: SigningApi> SigningOrchestrator<A> {
    /// Create an orchestrator from a validated configuration.
    pub fn new(api: A, config: &SignerConfig) -> Self {
        Self::with_parts(
            api,
            DocumentLoader::new(config.document.clone()),
            EnvelopeBuilder::new(config.envelope.email_subject.clone()),
            OrchestratorSettings::from_config(&config.signing),
        )
    }

    pub fn with_parts(
        api: A,
        loader: DocumentLoader,
        builder: EnvelopeBuilder,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            api,
            loader,
            builder,
            settings,
        }
    }

    /// Act on `account_id` instead of the configured or first account.
    pub fn with_account_id(mut self, account_id: Option<String>) -> Self {
        if account_id.is_some() {
            self.settings.account_id = account_id;
        }
        self
    }

    /// Request a view for an existing envelope instead of sending a new one.
    pub fn resume_envelope(mut self, envelope_id: impl Into<String>) -> Self {
        self.settings.resume_envelope_id = Some(envelope_id.into());
        self
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Validate, load and build the envelope without any network call.
    pub fn prepare(&self, request: &SigningRequest) -> SigningResult<EnvelopeDefinition> {
        let document = self
            .loader
            .load(&request.document_path, request.document_name.as_deref())?;
        self.builder.build(request, &document)
    }

    /// Run the whole workflow once.
    pub async fn run(&self, request: &SigningRequest) -> SigningResult<SigningOutcome> {
        let mut run = SigningRun::new();
        self.execute(request, &mut run).await
    }

    /// Run the whole workflow, recording states into `run`.
    pub async fn execute(
        &self,
        request: &SigningRequest,
        run: &mut SigningRun,
    ) -> SigningResult<SigningOutcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("signing_run", %run_id);

        let result = self.drive(request, run).instrument(span.clone()).await;

        let _guard = span.enter();
        match &result {
            Ok(outcome) => {
                tracing::info!(
                    envelope_id = %outcome.envelope_id,
                    resumed = outcome.resumed,
                    "Signing run complete"
                );
            }
            Err(e) => {
                run.fail(e.kind());
                tracing::error!(error = %e, trail = %run.trail().join(" -> "), "Signing run failed");
            }
        }

        result
    }

    async fn drive(
        &self,
        request: &SigningRequest,
        run: &mut SigningRun,
    ) -> SigningResult<SigningOutcome> {
        // Idle: everything that can fail offline fails here.
        let signer = self.builder.signer(request)?;
        let envelope = match &self.settings.resume_envelope_id {
            Some(id) if id.trim().is_empty() => {
                return Err(SigningError::Validation("envelope id to resume is empty".into()));
            }
            Some(_) => None,
            None => Some(self.prepare(request)?),
        };

        // Idle → Authenticated
        let info = self
            .api
            .login()
            .await
            .map_err(|e| classify(Step::Login, e))?;
        let account_id = select_account(&info.login_accounts, self.settings.account_id.as_deref())?
            .account_id
            .clone();
        tracing::info!(
            account_id = %account_id,
            account_count = info.login_accounts.len(),
            "Authenticated"
        );
        run.advance(SigningState::Authenticated {
            account_id: account_id.clone(),
        });

        // Authenticated → EnvelopeCreated
        let envelope_id = match &envelope {
            Some(definition) => {
                let summary = self
                    .api
                    .create_envelope(&account_id, definition)
                    .await
                    .map_err(|e| classify(Step::CreateEnvelope, e))?;
                tracing::info!(
                    envelope_id = %summary.envelope_id,
                    status = summary.status.as_deref().unwrap_or("unknown"),
                    "Envelope sent"
                );
                summary.envelope_id
            }
            None => {
                let existing = self.settings.resume_envelope_id.clone().unwrap_or_default();
                tracing::info!(envelope_id = %existing, "Resuming existing envelope");
                existing
            }
        };
        if envelope_id.trim().is_empty() {
            return Err(SigningError::EnvelopeCreation(
                "provider returned an empty envelope id".into(),
            ));
        }
        run.advance(SigningState::EnvelopeCreated {
            account_id: account_id.clone(),
            envelope_id: envelope_id.clone(),
        });

        // EnvelopeCreated → ViewObtained
        let placed_signer = envelope
            .as_ref()
            .and_then(EnvelopeDefinition::signer)
            .unwrap_or(&signer);
        let view_request = RecipientViewRequest::for_signer(
            placed_signer,
            &self.settings.return_url,
            &self.settings.authentication_method,
        );
        let view = self
            .api
            .create_recipient_view(&account_id, &envelope_id, &view_request)
            .await
            .map_err(|e| classify(Step::RecipientView, e))?;
        if view.url.trim().is_empty() {
            return Err(SigningError::ViewRequest(
                "provider returned an empty signing URL".into(),
            ));
        }
        tracing::info!(envelope_id = %envelope_id, "Recipient view obtained");
        run.advance(SigningState::ViewObtained {
            account_id: account_id.clone(),
            envelope_id: envelope_id.clone(),
            url: view.url.clone(),
        });

        // ViewObtained → Done
        run.advance(SigningState::Done);

        Ok(SigningOutcome {
            account_id,
            envelope_id,
            view: RecipientView { url: view.url },
            resumed: envelope.is_none(),
        })
    }
}

/// Provider rejections map to the step's error; anything else is transport.
fn classify(step: Step, err: ApiError) -> SigningError {
    match err {
        ApiError::Status { .. } => {
            let detail = err.to_string();
            match step {
                Step::Login => SigningError::Auth(detail),
                Step::CreateEnvelope => SigningError::EnvelopeCreation(detail),
                Step::RecipientView => SigningError::ViewRequest(detail),
            }
        }
        other => SigningError::Transport(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, EnvelopeSummary, LoginAccount, LoginInformation, ViewUrl};
    use crate::error::FailureKind;
    use async_trait::async_trait;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;

    const SIGNING_URL: &str = "https://demo.docusign.net/Signing/StartInSession.aspx?t=abc";

    #[derive(Default)]
    struct FakeApi {
        accounts: Vec<&'static str>,
        login_status: Option<u16>,
        envelope_status: Option<u16>,
        view_timeout: bool,
        calls: Mutex<Vec<&'static str>>,
        sent: Mutex<Option<EnvelopeDefinition>>,
        viewed: Mutex<Option<(String, String, RecipientViewRequest)>>,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                accounts: vec!["1703061"],
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn rejected(status: u16) -> ApiError {
            ApiError::Status {
                status,
                code: Some("REJECTED".into()),
                message: "rejected by fake".into(),
            }
        }
    }

    #[async_trait]
    impl SigningApi for FakeApi {
        async fn login(&self) -> ApiResult<LoginInformation> {
            self.calls.lock().unwrap().push("login");
            if let Some(status) = self.login_status {
                return Err(Self::rejected(status));
            }
            Ok(LoginInformation {
                login_accounts: self
                    .accounts
                    .iter()
                    .map(|id| LoginAccount {
                        account_id: id.to_string(),
                        ..LoginAccount::default()
                    })
                    .collect(),
            })
        }

        async fn create_envelope(
            &self,
            _account_id: &str,
            envelope: &EnvelopeDefinition,
        ) -> ApiResult<EnvelopeSummary> {
            self.calls.lock().unwrap().push("create_envelope");
            if let Some(status) = self.envelope_status {
                return Err(Self::rejected(status));
            }
            *self.sent.lock().unwrap() = Some(envelope.clone());
            Ok(EnvelopeSummary {
                envelope_id: "env-1".into(),
                status: Some("sent".into()),
                status_date_time: None,
                uri: None,
            })
        }

        async fn create_recipient_view(
            &self,
            account_id: &str,
            envelope_id: &str,
            request: &RecipientViewRequest,
        ) -> ApiResult<ViewUrl> {
            self.calls.lock().unwrap().push("create_recipient_view");
            if self.view_timeout {
                return Err(ApiError::Timeout(30));
            }
            *self.viewed.lock().unwrap() =
                Some((account_id.to_string(), envelope_id.to_string(), request.clone()));
            Ok(ViewUrl {
                url: SIGNING_URL.into(),
            })
        }
    }

    fn pdf() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 liability waiver").unwrap();
        file
    }

    fn request(path: PathBuf) -> SigningRequest {
        SigningRequest {
            document_path: path,
            document_name: None,
            recipient_name: "Jane Doe".into(),
            recipient_email: "jane@example.com".into(),
            client_user_id: "42".into(),
            page_number: 1,
            x_position: 100,
            y_position: 100,
        }
    }

    fn orchestrator(api: FakeApi) -> SigningOrchestrator<FakeApi> {
        SigningOrchestrator::new(api, &SignerConfig::default())
    }

    #[tokio::test]
    async fn test_happy_path_reaches_done() {
        let doc = pdf();
        let orch = orchestrator(FakeApi::new());
        let mut run = SigningRun::new();

        let outcome = orch
            .execute(&request(doc.path().to_path_buf()), &mut run)
            .await
            .unwrap();

        assert_eq!(outcome.view.url, SIGNING_URL);
        assert_eq!(outcome.envelope_id, "env-1");
        assert_eq!(outcome.account_id, "1703061");
        assert!(!outcome.resumed);
        assert_eq!(run.state(), &SigningState::Done);
        assert_eq!(
            run.trail(),
            vec!["idle", "authenticated", "envelope_created", "view_obtained", "done"]
        );
        assert_eq!(
            orch.api().calls(),
            vec!["login", "create_envelope", "create_recipient_view"]
        );
    }

    #[tokio::test]
    async fn test_client_user_id_correlates() {
        let doc = pdf();
        let orch = orchestrator(FakeApi::new());
        orch.run(&request(doc.path().to_path_buf())).await.unwrap();

        let sent = orch.api().sent.lock().unwrap().clone().unwrap();
        let (account_id, envelope_id, view) = orch.api().viewed.lock().unwrap().clone().unwrap();
        let signer = sent.signer().unwrap();

        assert_eq!(view.client_user_id, signer.client_user_id);
        assert_eq!(view.client_user_id, "42");
        assert_eq!(view.return_url, "http://www.docusign.com/developer-center");
        assert_eq!(view.authentication_method, "email");
        assert_eq!(account_id, "1703061");
        assert_eq!(envelope_id, "env-1");
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_network_call() {
        let doc = pdf();
        let orch = orchestrator(FakeApi::new());
        let mut req = request(doc.path().to_path_buf());
        req.recipient_email = String::new();
        let mut run = SigningRun::new();

        let err = orch.execute(&req, &mut run).await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Validation);
        assert_eq!(run.state(), &SigningState::Failed(FailureKind::Validation));
        assert!(orch.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_document_fails_before_login() {
        let orch = orchestrator(FakeApi::new());
        let mut run = SigningRun::new();

        let err = orch
            .execute(&request(PathBuf::from("/no/such/waiver.pdf")), &mut run)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::DocumentNotFound);
        assert_eq!(run.trail(), vec!["idle", "failed"]);
        assert!(orch.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_auth_failure_creates_no_envelope() {
        let doc = pdf();
        let orch = orchestrator(FakeApi {
            login_status: Some(401),
            ..FakeApi::new()
        });
        let mut run = SigningRun::new();

        let err = orch
            .execute(&request(doc.path().to_path_buf()), &mut run)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Auth);
        assert_eq!(run.state(), &SigningState::Failed(FailureKind::Auth));
        assert_eq!(orch.api().calls(), vec!["login"]);
        assert!(orch.api().sent.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_envelope_rejection_stops_before_view() {
        let doc = pdf();
        let orch = orchestrator(FakeApi {
            envelope_status: Some(400),
            ..FakeApi::new()
        });
        let mut run = SigningRun::new();

        let err = orch
            .execute(&request(doc.path().to_path_buf()), &mut run)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::EnvelopeCreation);
        assert!(err.to_string().contains("400 REJECTED"));
        assert_eq!(run.trail(), vec!["idle", "authenticated", "failed"]);
        assert_eq!(orch.api().calls(), vec!["login", "create_envelope"]);
    }

    #[tokio::test]
    async fn test_view_timeout_is_transport_error() {
        let doc = pdf();
        let orch = orchestrator(FakeApi {
            view_timeout: true,
            ..FakeApi::new()
        });
        let mut run = SigningRun::new();

        let err = orch
            .execute(&request(doc.path().to_path_buf()), &mut run)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Transport);
        assert_eq!(
            run.trail(),
            vec!["idle", "authenticated", "envelope_created", "failed"]
        );
        // The envelope stays sent at the provider.
        assert!(orch.api().sent.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resume_skips_document_and_envelope() {
        let orch = orchestrator(FakeApi::new()).resume_envelope("41b4d09b-57f4-4946-8b48-d47251eaabf0");

        let outcome = orch
            .run(&request(PathBuf::from("/no/such/waiver.pdf")))
            .await
            .unwrap();

        assert!(outcome.resumed);
        assert_eq!(outcome.envelope_id, "41b4d09b-57f4-4946-8b48-d47251eaabf0");
        assert_eq!(orch.api().calls(), vec!["login", "create_recipient_view"]);
        let (_, envelope_id, view) = orch.api().viewed.lock().unwrap().clone().unwrap();
        assert_eq!(envelope_id, "41b4d09b-57f4-4946-8b48-d47251eaabf0");
        assert_eq!(view.client_user_id, "42");
    }

    #[tokio::test]
    async fn test_explicit_account_selection() {
        let doc = pdf();
        let orch = orchestrator(FakeApi {
            accounts: vec!["1703061", "1703062"],
            ..FakeApi::new()
        })
        .with_account_id(Some("1703062".into()));

        let outcome = orch.run(&request(doc.path().to_path_buf())).await.unwrap();
        assert_eq!(outcome.account_id, "1703062");
    }

    #[tokio::test]
    async fn test_unknown_account_is_auth_error() {
        let doc = pdf();
        let orch = orchestrator(FakeApi::new()).with_account_id(Some("999".into()));

        let err = orch.run(&request(doc.path().to_path_buf())).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Auth);
        assert_eq!(orch.api().calls(), vec!["login"]);
    }

    #[test]
    fn test_prepare_is_offline() {
        let doc = pdf();
        let orch = orchestrator(FakeApi::new());
        let envelope = orch.prepare(&request(doc.path().to_path_buf())).unwrap();
        assert_eq!(envelope.documents.len(), 1);
        assert!(orch.api().calls().is_empty());
    }

    #[test]
    fn test_classify() {
        let err = classify(Step::Login, FakeApi::rejected(401));
        assert_eq!(err.kind(), FailureKind::Auth);
        let err = classify(Step::RecipientView, FakeApi::rejected(400));
        assert_eq!(err.kind(), FailureKind::ViewRequest);
        let err = classify(Step::CreateEnvelope, ApiError::Decode("eof".into()));
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
