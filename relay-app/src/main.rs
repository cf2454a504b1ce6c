//! # Relay Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Apply the startup policy to the processor key
//! - Create the relay service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_hex::{RelayService, inbound::HttpServer};
use relay_stripe::{StripeProcessor, build_processor};
use relay_types::ProcessorState;

use config::{Config, ProcessorSetup, resolve_processor};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking).
    // The endpoint is read from OTEL_EXPORTER_OTLP_ENDPOINT.
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("payment-relay"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables, letting .env win over stale shell values
    dotenvy::dotenv_override().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize OpenTelemetry tracing only when a collector is configured
    let otel = match &config.otlp_endpoint {
        Some(_) => Some(init_tracer()?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,relay_app=debug,relay_hex=debug,relay_stripe=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!(
        "Starting payment relay on port {} ({:?} profile, {:?} startup)",
        config.port,
        config.profile,
        config.startup_policy
    );
    if let Some(endpoint) = &config.otlp_endpoint {
        tracing::info!("Exporting traces to {}", endpoint);
    }

    // Apply the startup policy (strict aborts here)
    let processor: ProcessorState<StripeProcessor> =
        match resolve_processor(config.startup_policy, config.stripe_secret_key.as_deref())? {
            ProcessorSetup::Ready(key) => {
                tracing::info!(
                    "Stripe key loaded: {} ({} mode)",
                    key,
                    if key.is_test_mode() { "test" } else { "live" }
                );
                ProcessorState::Ready(build_processor(key, &config.stripe_api_base)?)
            }
            ProcessorSetup::Degraded { reason } => {
                tracing::warn!("Payment endpoints disabled: {}", reason);
                ProcessorState::unconfigured(reason)
            }
        };

    // Create the relay service
    let service = RelayService::new(processor).with_base_currency(config.base_currency.clone());

    // Create and run the HTTP server
    let server = HttpServer::new(service).with_cors(config.cors.clone());
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
