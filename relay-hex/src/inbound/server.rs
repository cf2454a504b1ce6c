//! HTTP Server configuration and startup.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use relay_types::PaymentProcessor;

use super::cors::CorsPolicy;
use super::handlers::{self, AppState};
use crate::RelayService;
use crate::openapi::ApiDoc;

/// HTTP Server for the relay API.
pub struct HttpServer<P: PaymentProcessor> {
    state: Arc<AppState<P>>,
    cors: CorsPolicy,
}

impl<P: PaymentProcessor> HttpServer<P> {
    /// Creates a new HTTP server with the given service and the development CORS allow-list.
    pub fn new(service: RelayService<P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            cors: CorsPolicy::default(),
        }
    }

    /// Replaces the CORS policy.
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health::<P>))
            .route("/test-stripe", get(handlers::test_stripe::<P>))
            .route("/verify-promo", post(handlers::verify_promo::<P>))
            .route(
                "/create-payment-intent",
                post(handlers::create_payment_intent::<P>),
            )
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(self.cors.layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("🚀 Server listening on {}", listener.local_addr()?);
        tracing::info!("CORS: {}", self.cors);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Turns a handler panic into a 500 for that request only.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);

    let body = serde_json::json!({
        "error": "Internal server error",
        "code": StatusCode::INTERNAL_SERVER_ERROR.as_u16()
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
