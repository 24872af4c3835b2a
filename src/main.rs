use clap::{Parser, Subcommand};
use horizon_checkout::application::engine::{CheckoutEngine, CheckoutOutcome};
use horizon_checkout::application::forms::{FormKind, LeadForm, LeadFormService};
use horizon_checkout::domain::checkout::CheckoutWizard;
use horizon_checkout::domain::currency::Currency;
use horizon_checkout::domain::customer::CustomerInfo;
use horizon_checkout::domain::payment::{CardDetails, PaymentMethod};
use horizon_checkout::domain::ports::HandoffStore;
use horizon_checkout::error::Result;
use horizon_checkout::infrastructure::card::CardGateway;
use horizon_checkout::infrastructure::http_poster::HttpFormPoster;
use horizon_checkout::infrastructure::in_memory::InMemoryHandoff;
use horizon_checkout::infrastructure::wallet::WalletGateway;
use horizon_checkout::interfaces::csv::{CheckoutRequest, OrderRow, OrderWriter, RequestReader};
use miette::{IntoDiagnostic, Result as CliResult};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a CSV of checkout requests, writing one outcome row per
    /// request to stdout
    Batch {
        /// Input checkout-requests CSV file
        input: PathBuf,

        /// Display currency for order summaries
        #[arg(long, default_value = "usd")]
        currency: Currency,
    },
    /// Run a single checkout end to end and print the outcome
    Buy {
        /// Plan id: basic, advanced, academic, or commercial
        #[arg(long)]
        plan: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        address1: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long, default_value = "US")]
        country: String,
        /// Required unless --existing-user is set
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long)]
        existing_user: bool,
        /// Accept the terms of service
        #[arg(long)]
        agree_terms: bool,
        /// Optional discount code
        #[arg(long)]
        coupon: Option<String>,
        /// Payment method: card or wallet
        #[arg(long, default_value = "card")]
        method: PaymentMethod,
        #[arg(long, default_value = "4242424242424242")]
        card_number: String,
        #[arg(long, default_value = "12/30")]
        expiry: String,
        #[arg(long, default_value = "123")]
        cvv: String,
        #[arg(long, default_value = "usd")]
        currency: Currency,
    },
    /// Submit the contact form stub (countdown, then best-effort POST)
    Contact {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        #[arg(long, default_value = "https://horizonplays.example/api")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Batch { input, currency } => run_batch(input, currency).await,
        Command::Buy {
            plan,
            email,
            first_name,
            last_name,
            phone,
            address1,
            city,
            postal_code,
            country,
            password,
            existing_user,
            agree_terms,
            coupon,
            method,
            card_number,
            expiry,
            cvv,
            currency,
        } => {
            let customer = CustomerInfo {
                email,
                first_name,
                last_name,
                phone,
                address1,
                city,
                postal_code,
                country,
                password,
                existing_user,
                agree_terms,
            };
            let card = CardDetails {
                card_number,
                expiry,
                cvv,
                name_on_card: customer.full_name(),
            };
            run_buy(&plan, customer, coupon, method, card, currency).await
        }
        Command::Contact {
            first_name,
            last_name,
            email,
            subject,
            message,
            base_url,
        } => run_contact(first_name, last_name, email, subject, message, base_url).await,
    }
}

fn build_engine(handoff: &InMemoryHandoff) -> CheckoutEngine {
    CheckoutEngine::new(
        Box::new(CardGateway::new()),
        Box::new(WalletGateway::new()),
        Box::new(handoff.clone()),
    )
}

async fn run_batch(input: PathBuf, currency: Currency) -> CliResult<()> {
    let handoff = InMemoryHandoff::new();
    let engine = build_engine(&handoff);

    let file = File::open(input).into_diagnostic()?;
    let reader = RequestReader::new(file);

    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());

    for request in reader.requests() {
        match request {
            Ok(request) => {
                let row = run_request(&engine, &handoff, &request, currency)
                    .await
                    .into_diagnostic()?;
                writer.write_row(&row).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading request: {e}");
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}

async fn run_request(
    engine: &CheckoutEngine,
    handoff: &InMemoryHandoff,
    request: &CheckoutRequest,
    currency: Currency,
) -> Result<OrderRow> {
    let mut wizard = match CheckoutWizard::new(&request.plan, currency) {
        Ok(wizard) => wizard,
        Err(e) => return Ok(OrderRow::rejected(&request.plan, e.to_string())),
    };
    wizard.customer = request.customer();

    // PlanReview -> Billing is unconditional; the billing gate can fail.
    let _ = wizard.advance();
    if let Err(errors) = wizard.advance() {
        return Ok(OrderRow::rejected(&request.plan, errors.to_string()));
    }

    if !request.coupon.is_empty()
        && let Err(error) = wizard.apply_coupon(&request.coupon)
    {
        tracing::warn!(code = %request.coupon, %error, "ignoring invalid coupon");
    }

    match engine
        .complete(&wizard, request.method, request.card_details())
        .await
    {
        Ok(CheckoutOutcome::Confirmed(_)) => match handoff.take_order().await? {
            Some(order) => Ok(OrderRow::confirmed(&order)),
            None => Ok(OrderRow::rejected(&request.plan, "order record missing")),
        },
        Ok(CheckoutOutcome::Failed(_)) => match handoff.take_failure().await? {
            Some(failure) => Ok(OrderRow::failed(&request.plan, &failure)),
            None => Ok(OrderRow::rejected(&request.plan, "failure record missing")),
        },
        Err(e) => Ok(OrderRow::rejected(&request.plan, e.to_string())),
    }
}

async fn run_buy(
    plan: &str,
    customer: CustomerInfo,
    coupon: Option<String>,
    method: PaymentMethod,
    card: CardDetails,
    currency: Currency,
) -> CliResult<()> {
    let handoff = InMemoryHandoff::new();
    let engine = build_engine(&handoff);

    let mut wizard = CheckoutWizard::new(plan, currency).into_diagnostic()?;
    wizard.customer = customer;
    let _ = wizard.advance();
    wizard.advance().into_diagnostic()?;

    if let Some(code) = coupon {
        match wizard.apply_coupon(&code) {
            Ok(applied) => println!("Coupon {}: save {}%", applied.code, applied.percent),
            Err(error) => println!("{}", error.message),
        }
    }

    let summary = wizard.summary();
    println!(
        "{} Plan: total {} (discount {})",
        summary.plan_name,
        summary.display_total,
        currency.format(summary.discount)
    );

    let card = matches!(method, PaymentMethod::Card).then_some(card);
    let outcome = engine
        .complete(&wizard, method, card)
        .await
        .into_diagnostic()?;

    match outcome {
        CheckoutOutcome::Confirmed(_) => {
            if let Some(order) = handoff.take_order().await.into_diagnostic()? {
                println!(
                    "Order {} confirmed via {} at {}",
                    order.order_id,
                    order.payment.method_label(),
                    order.timestamp.to_rfc3339()
                );
            }
        }
        CheckoutOutcome::Failed(_) => {
            if let Some(failure) = handoff.take_failure().await.into_diagnostic()? {
                println!(
                    "Payment failed (ref {}): {}",
                    failure.reference, failure.message
                );
            }
        }
    }

    Ok(())
}

async fn run_contact(
    first_name: String,
    last_name: String,
    email: String,
    subject: String,
    message: String,
    base_url: String,
) -> CliResult<()> {
    let service = LeadFormService::new(Box::new(HttpFormPoster::new(base_url)));
    let form = LeadForm {
        first_name,
        last_name,
        email,
        subject,
        message,
        terms: true,
        ..LeadForm::default()
    };

    let reply = service
        .submit(FormKind::Contact, &form)
        .await
        .into_diagnostic()?;
    println!("{}", reply.message);
    Ok(())
}
