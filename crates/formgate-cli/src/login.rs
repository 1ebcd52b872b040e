//! # Login Subcommand
//!
//! Runs the guest login form end to end: the username is placed in the
//! draft, validated, posted to the backend, and the routed action is
//! printed.
//!
//! ## Output
//!
//! - `NAVIGATE /case/<id>` when the guest is already in a case.
//! - `NAVIGATE /rooms` otherwise.
//! - `NOTIFY <message>` when the backend could not be reached or refused.
//! - `FAIL: <field>: <message>` per field when the username is invalid.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use formgate_client::{AuthClient, ClientConfig};
use formgate_schema::{forms::USERNAME, guest_login_validator, Locale};
use formgate_state::{
    ActionDispatcher, ControllerOptions, RouteTable, SubmissionController, SubmitReport,
    Transport, TransportError,
};

use crate::console::Console;

/// Arguments for the `formgate login` subcommand.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Guest username (3 to 32 characters, not blank).
    #[arg(long)]
    pub username: String,

    /// Backend base URL. Defaults to `FORMGATE_API_URL` or http://localhost:8000.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds. Defaults to `FORMGATE_TIMEOUT_SECS` or 30.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Language of validation and failure messages.
    #[arg(long, default_value = "en")]
    pub locale: Locale,

    /// Clear the draft after a successful login.
    #[arg(long)]
    pub clear_draft: bool,
}

/// Execute the login subcommand.
///
/// Returns exit code: 0 on navigation, 1 on validation or submission
/// failure, 2 on operational error.
pub fn run_login(args: &LoginArgs) -> Result<u8> {
    let mut config = match &args.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    }
    .context("invalid backend configuration")?;
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }

    tracing::info!(api_url = %config.api_url, "logging in as guest");

    let client = AuthClient::new(&config).context("failed to create HTTP client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let console = Console::new(std::io::stdout());
    runtime.block_on(login(args, client, &console))
}

/// Drive one login attempt through `transport`, writing the outcome to
/// `console`.
pub async fn login<T, W>(args: &LoginArgs, transport: T, console: &Console<W>) -> Result<u8>
where
    T: Transport,
    W: Write,
{
    let validator = guest_login_validator(args.locale).context("failed to build login form")?;
    let controller = SubmissionController::with_options(
        validator,
        transport,
        ControllerOptions {
            clear_draft_on_success: args.clear_draft,
            ..ControllerOptions::default()
        },
    );
    controller.set_field(USERNAME, args.username.as_str());

    let report = controller.submit().await;

    let routes = RouteTable::for_locale(args.locale);
    let router = routes.router();
    let dispatcher = ActionDispatcher::new(routes, console, console);

    match &report {
        SubmitReport::Invalid(errors) => {
            for error in errors {
                console.line(&format!("FAIL: {error}"));
            }
            Ok(1)
        }
        SubmitReport::Rejected => {
            console.line("FAIL: a submission is already in flight");
            Ok(1)
        }
        SubmitReport::Completed(result) => {
            if let Err(error) = result {
                log_transport_failure(error);
            }
            if let Some(action) = router.route_report(&report) {
                dispatcher.dispatch(&action);
            }
            Ok(if result.is_ok() { 0 } else { 1 })
        }
    }
}

fn log_transport_failure(error: &TransportError) {
    tracing::warn!(%error, "guest login failed");
    if let TransportError::Rejected { fields, .. } = error {
        for field in fields {
            tracing::info!(field = %field.field, kind = %field.kind, "{}", field.message);
        }
    }
}
