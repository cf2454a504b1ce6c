//! Client example exercising the relay API against an in-process server.
//!
//! Run with: cargo run -p relay-app --example client_example
//!
//! Without `STRIPE_SECRET_KEY` the server starts degraded, so payment calls
//! show the "processor not configured" path. With a test key they hit Stripe.

use relay_client::RelayClient;
use relay_hex::{RelayService, inbound::HttpServer};
use relay_stripe::{DEFAULT_API_BASE, StripeProcessor, build_processor};
use relay_types::{ProcessorState, SecretKey};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();
    dotenvy::dotenv().ok();

    let processor: ProcessorState<StripeProcessor> = match std::env::var("STRIPE_SECRET_KEY") {
        Ok(raw) => ProcessorState::Ready(build_processor(SecretKey::parse(&raw)?, DEFAULT_API_BASE)?),
        Err(_) => ProcessorState::unconfigured("STRIPE_SECRET_KEY not set"),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    println!("🚀 Starting relay on {addr}...");

    // Start server in background
    let router = HttpServer::new(RelayService::new(processor)).router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server stopped: {e}");
        }
    });

    let client = RelayClient::new(format!("http://{addr}"));

    // Health check
    let health = client.health().await?;
    println!(
        "✅ Health: {} (processor configured: {})",
        health.status, health.processor_configured
    );

    // Promo codes
    for code in ["promo10", " BlackFriday ", "NOPE"] {
        let promo = client.verify_promo(code).await?;
        println!(
            "🏷️  {:>14?} -> valid={} reduction={}% ({})",
            code, promo.valid, promo.reduction, promo.message
        );
    }

    // The relay rejects a zero amount with a 400
    let err = client.create_payment_intent(0, None).await.unwrap_err();
    println!("✅ Zero amount rejected: {err}");

    // Payment intent for 19.99 EUR (1999 cents)
    match client.create_payment_intent(1999, Some("eur")).await {
        Ok(intent) => println!("💳 Created {}", intent.payment_intent_id),
        Err(e) => println!("⚠️  Payment intent not created: {e}"),
    }

    match client.test_processor().await {
        Ok(probe) => println!("✅ Processor reachable: {}", probe.message),
        Err(e) => println!("⚠️  Processor probe failed: {e}"),
    }

    println!("\n🎉 Example completed!");
    Ok(())
}
