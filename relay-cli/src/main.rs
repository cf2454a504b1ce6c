//! Relay CLI
//!
//! Command-line interface for the payment relay API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use relay_client::RelayClient;
use relay_types::{CurrencyCode, MinorUnits};

#[derive(Parser)]
#[command(name = "relay")]
#[command(author, version, about = "Payment relay CLI client", long_about = None)]
struct Cli {
    /// Base URL of the relay
    #[arg(long, env = "RELAY_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay health
    Health,
    /// Check a promo code
    Promo {
        /// Code to check (any casing)
        code: String,
    },
    /// Create a payment intent
    Intent {
        /// Amount in minor units (cents)
        #[arg(long)]
        amount: i64,
        /// Currency code; the relay's base currency when omitted
        #[arg(long)]
        currency: Option<String>,
    },
    /// Ask the relay to probe the payment processor
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RelayClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.processor_configured {
                eprintln!("⚠ processor not configured: payment endpoints are disabled");
            }
        }

        Commands::Promo { code } => {
            let promo = client.verify_promo(&code).await?;
            println!("{}", serde_json::to_string_pretty(&promo)?);
        }

        Commands::Intent { amount, currency } => {
            // Same checks the relay applies, to fail before any network call.
            let amount = MinorUnits::new(amount)?;
            if let Some(code) = &currency {
                CurrencyCode::new(code)?;
            }
            let intent = client
                .create_payment_intent(amount.get(), currency.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&intent)?);
        }

        Commands::Probe => {
            let probe = client.test_processor().await?;
            println!("{}", serde_json::to_string_pretty(&probe)?);
        }
    }

    Ok(())
}
