//! Embedded e-signature CLI.
//!
//! # Flow
//!
//! ```text
//!   config file ──┐
//!   environment ──┼─▶ SignerConfig + Credentials
//!   CLI args ─────┘          │
//!                            ▼
//!   document ──▶ loader ──▶ envelope builder      (offline checks)
//!                            │
//!                            ▼
//!          ┌──────────── orchestrator ────────────┐
//!          │ login ─▶ create envelope ─▶ view URL │──▶ provider REST API
//!          └──────────────────────────────────────┘
//!                            │
//!                            ▼
//!          signing URL on stdout, exit 0  /  error log, exit 1
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use esign_embed::config::load_or_default;
use esign_embed::observability::init_logging;
use esign_embed::{
    Credentials, DocuSignClient, SignerConfig, SigningOrchestrator, SigningOutcome,
    SigningRequest, SigningResult,
};

#[derive(Parser)]
#[command(name = "esign-embed")]
#[command(about = "Send a document for embedded e-signature and print the signing URL", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "ESIGN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of the bare URL.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the document and obtain a signing URL
    Send {
        #[command(flatten)]
        document: DocumentArgs,
        #[command(flatten)]
        recipient: RecipientArgs,
        /// Account to act on when the user has several
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Obtain a new signing URL for an envelope that was already sent
    View {
        #[arg(long)]
        envelope_id: String,
        #[command(flatten)]
        recipient: RecipientArgs,
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Validate configuration, credentials and document without network calls
    Check {
        #[command(flatten)]
        document: DocumentArgs,
        #[command(flatten)]
        recipient: RecipientArgs,
    },
}

#[derive(Args)]
struct DocumentArgs {
    #[arg(short, long)]
    document: PathBuf,
    /// Name shown to the signer (defaults to the file name)
    #[arg(long)]
    document_name: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 100)]
    x: u32,
    #[arg(long, default_value_t = 100)]
    y: u32,
}

#[derive(Args)]
struct RecipientArgs {
    #[arg(long)]
    recipient_name: String,
    #[arg(long)]
    recipient_email: String,
    /// Must be identical for the envelope and the view request
    #[arg(long)]
    client_user_id: String,
}

fn signing_request(document: Option<&DocumentArgs>, recipient: &RecipientArgs) -> SigningRequest {
    SigningRequest {
        document_path: document.map(|d| d.document.clone()).unwrap_or_default(),
        document_name: document.and_then(|d| d.document_name.clone()),
        recipient_name: recipient.recipient_name.clone(),
        recipient_email: recipient.recipient_email.clone(),
        client_user_id: recipient.client_user_id.clone(),
        page_number: document.map_or(1, |d| d.page),
        x_position: document.map_or(100, |d| d.x),
        y_position: document.map_or(100, |d| d.y),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!(
        base_path = %config.api.base_path,
        "esign-embed v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = ?e.kind(), "Run failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli, config: SignerConfig) -> SigningResult<()> {
    let credentials = Credentials::from_env(&config.credentials)?;
    let client = DocuSignClient::new(&config.api, &credentials)?;
    let orchestrator = SigningOrchestrator::new(client, &config);

    match cli.command {
        Commands::Send {
            document,
            recipient,
            account_id,
        } => {
            let request = signing_request(Some(&document), &recipient);
            let outcome = orchestrator
                .with_account_id(account_id)
                .run(&request)
                .await?;
            print_outcome(&outcome, cli.json);
        }
        Commands::View {
            envelope_id,
            recipient,
            account_id,
        } => {
            let request = signing_request(None, &recipient);
            let outcome = orchestrator
                .with_account_id(account_id)
                .resume_envelope(envelope_id)
                .run(&request)
                .await?;
            print_outcome(&outcome, cli.json);
        }
        Commands::Check {
            document,
            recipient,
        } => {
            let request = signing_request(Some(&document), &recipient);
            let envelope = orchestrator.prepare(&request)?;

            if cli.json {
                let report = serde_json::json!({
                    "emailSubject": envelope.email_subject,
                    "documents": envelope.documents.iter().map(|d| d.name.clone()).collect::<Vec<_>>(),
                    "signers": envelope.recipients.signers,
                    "status": envelope.status,
                });
                println!("{}", report);
            } else {
                for doc in &envelope.documents {
                    println!("document  {} ({} base64 chars)", doc.name, doc.document_base64.len());
                }
                for signer in &envelope.recipients.signers {
                    println!(
                        "signer    {} <{}> clientUserId={}",
                        signer.name, signer.email, signer.client_user_id
                    );
                    for tab in &signer.tabs.sign_here_tabs {
                        println!(
                            "signHere  page={} x={} y={}",
                            tab.page_number, tab.x_position, tab.y_position
                        );
                    }
                }
                println!("ok");
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SigningOutcome, json: bool) {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(report) => println!("{}", report),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to render JSON report");
                println!("{}", outcome.view.url);
            }
        }
    } else {
        println!("{}", outcome.view.url);
    }
}
