use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use pse_checkout::application::controller::{
    CheckoutController, CheckoutPorts, INVALID_FORM_MESSAGE, SubmitOutcome,
};
use pse_checkout::config::CheckoutConfig;
use pse_checkout::domain::form::FormField;
use pse_checkout::domain::validation::CONSENT_REQUIRED_MESSAGE;
use pse_checkout::infrastructure::http_notifier::HttpNotifier;
use pse_checkout::infrastructure::in_memory::InMemoryPage;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Runs the PSE landing-page checkout once against a headless page.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query string the page was opened with, e.g. "phone=573001234567&name=Ana"
    #[arg(long, default_value = "")]
    query: String,

    #[arg(long)]
    full_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Overrides the phone prefilled from the query string
    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    document: Option<String>,

    /// Tick the terms and conditions checkbox
    #[arg(long)]
    accept_terms: bool,

    #[arg(long)]
    payment_method: Option<String>,

    /// Base URL of the bot that receives the confirmation
    #[arg(long)]
    notify_url: Option<String>,

    /// Pause before each simulated step, in milliseconds
    #[arg(long)]
    step_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CheckoutConfig::from_env().into_diagnostic()?;
    if let Some(url) = &cli.notify_url {
        config = config.with_notify_base_url(url).into_diagnostic()?;
    }
    if let Some(ms) = cli.step_delay_ms {
        config = config.with_step_delay(Duration::from_millis(ms));
    }

    let page = Arc::new(InMemoryPage::new());
    let notifier = HttpNotifier::from_config(&config).into_diagnostic()?;
    let controller = CheckoutController::initialize(
        CheckoutPorts::new(page.clone(), Box::new(notifier)),
        config,
        &cli.query,
    )
    .into_diagnostic()?;

    let typed = [
        (FormField::FullName, &cli.full_name),
        (FormField::Email, &cli.email),
        (FormField::Phone, &cli.phone),
        (FormField::Document, &cli.document),
    ];
    for (field, value) in typed {
        if let Some(value) = value {
            page.type_into(field, value);
            controller.on_field_input(field);
            controller.on_field_blur(field);
        }
    }

    page.set_consent(cli.accept_terms);
    controller.on_consent_changed();

    if let Some(method) = &cli.payment_method {
        controller.select_payment_method(method).into_diagnostic()?;
    }

    match controller.submit().await {
        SubmitOutcome::Completed { record, notified } => {
            for step in page.snapshot().loading_history {
                println!("  {step}");
            }
            println!("status: success");
            println!("transaction: {}", record.transaction_id);
            println!("amount: {}", record.amount.display_cop());
            println!("confirmation delivered: {notified}");
            Ok(())
        }
        SubmitOutcome::Rejected(report) => {
            for error in &report.field_errors {
                println!("{}: {}", error.field, error.message());
            }
            if report.consent_missing {
                println!("acceptTerms: {CONSENT_REQUIRED_MESSAGE}");
            }
            Err(miette!("{INVALID_FORM_MESSAGE}"))
        }
        SubmitOutcome::Failed(e) => Err(e).into_diagnostic(),
        SubmitOutcome::Busy => Err(miette!("a payment is already in progress")),
    }
}
