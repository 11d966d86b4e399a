//! PayZen Gateway CLI
//!
//! Entry points called by the billing host. Each subcommand reads the host
//! parameter bag as JSON on stdin and writes its answer to stdout; logs go
//! to stderr.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use payzen_gateway::adapters::host::HostParameters;
use payzen_gateway::adapters::payzen::{PayzenConfig, PayzenPaymentAdapter};
use payzen_gateway::application::{
    BuildPaymentLinkCommand, BuildPaymentLinkHandler, CancelSubscriptionCommand,
    CancelSubscriptionHandler, HandlePaymentNotificationCommand, HandlePaymentNotificationHandler,
    RefundTransactionCommand, RefundTransactionHandler,
};
use payzen_gateway::config::{GatewayConfig, LoggingConfig};
use payzen_gateway::domain::gateway::{gateway_metadata, settings_schema, SettingsSchema};

#[derive(Parser)]
#[command(name = "payzen-gateway")]
#[command(about = "PayZen hosted payment gateway for billing platforms", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the gateway metadata
    Metadata,

    /// Print the admin settings schema
    Config,

    /// Render the payment form for an invoice
    Link,

    /// Refund a transaction
    Refund,

    /// Cancel a subscription
    CancelSubscription,

    /// Verify a payment notification posted by PayZen
    Notification,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GatewayConfig::load_validated().context("Invalid gateway configuration")?;
    init_tracing(&config.logging);
    tracing::debug!(
        environment = ?config.environment,
        production = config.is_production(),
        "Gateway configuration loaded"
    );

    match cli.command {
        Commands::Metadata => print_json(&gateway_metadata())?,
        Commands::Config => print_json(&SettingsSchema(&settings_schema()))?,
        Commands::Link => {
            let handler = BuildPaymentLinkHandler::new(config.provider.form_url.as_str());
            let result = handler.handle(BuildPaymentLinkCommand::new(read_params()?))?;
            println!("{}", result.html);
        }
        Commands::Refund => {
            let handler = RefundTransactionHandler::new(provider(&config)?);
            let response = handler
                .handle(RefundTransactionCommand {
                    params: read_params()?,
                })
                .await;
            print_json(&response)?;
        }
        Commands::CancelSubscription => {
            let handler = CancelSubscriptionHandler::new(provider(&config)?);
            let response = handler
                .handle(CancelSubscriptionCommand {
                    params: read_params()?,
                })
                .await;
            print_json(&response)?;
        }
        Commands::Notification => {
            let notification = HandlePaymentNotificationHandler::new().handle(
                HandlePaymentNotificationCommand {
                    params: read_params()?,
                },
            )?;
            print_json(&notification)?;
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn provider(config: &GatewayConfig) -> Result<Arc<PayzenPaymentAdapter>> {
    let adapter = PayzenPaymentAdapter::new(PayzenConfig::from(&config.provider))
        .context("Failed to create PayZen client")?;
    Ok(Arc::new(adapter))
}

fn read_params() -> Result<HostParameters> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read parameters from stdin")?;
    Ok(HostParameters::from_json(&input)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
