//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use relay_types::{
    AppError, CreatePaymentIntentRequest, DomainError, HealthResponse, PaymentProcessor,
    ProbeFailure, ProbeResponse, RootResponse, VerifyPromoRequest, VerifyPromoResponse,
};

use crate::RelayService;

/// Routes listed by `/` and `/health`.
pub const BUSINESS_ROUTES: [&str; 4] = [
    "/health",
    "/test-stripe",
    "/create-payment-intent",
    "/verify-promo",
];

/// Application state shared across handlers.
pub struct AppState<P: PaymentProcessor> {
    pub service: RelayService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ProcessorUnavailable | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn route_list() -> Vec<String> {
    BUSINESS_ROUTES.iter().map(|r| r.to_string()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// Service banner.
pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Serveur Stripe en ligne".into(),
        endpoints: route_list(),
    })
}

/// Health check endpoint.
pub async fn health<P: PaymentProcessor>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    let configured = state.service.processor_configured();
    Json(HealthResponse {
        status: "OK".into(),
        timestamp: chrono::Utc::now(),
        processor_configured: configured,
        stripe: if configured { "Configured" } else { "Missing" }.into(),
        routes: route_list(),
    })
}

/// Processor connectivity probe.
#[tracing::instrument(skip(state))]
pub async fn test_stripe<P: PaymentProcessor>(State(state): State<Arc<AppState<P>>>) -> Response {
    match state.service.probe_processor().await {
        Ok(balance) => Json(ProbeResponse {
            status: "SUCCESS".into(),
            message: "Connexion Stripe OK".into(),
            balance,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ProbeFailure {
                status: "ERROR".into(),
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Promo codes
// ─────────────────────────────────────────────────────────────────────────────

/// Check a promo code.
///
/// Unreadable bodies are treated like a missing code, so the app always
/// gets the `{valid, reduction, message}` shape back.
#[tracing::instrument(skip(state, payload))]
pub async fn verify_promo<P: PaymentProcessor>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<VerifyPromoRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("Unreadable promo request: {}", rejection.body_text());
            VerifyPromoRequest::default()
        }
    };
    tracing::info!("📨 Promo check requested: {:?}", req.code);

    match state.service.verify_promo(req.code_str()) {
        Ok(verdict) => Json(VerifyPromoResponse::from(verdict)).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(VerifyPromoResponse::rejected(e.to_string())),
        )
            .into_response(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment intents
// ─────────────────────────────────────────────────────────────────────────────

/// Create a payment intent with the processor.
#[tracing::instrument(skip(state, payload))]
pub async fn create_payment_intent<P: PaymentProcessor>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::from(DomainError::InvalidAmount(rejection.body_text()))
    })?;

    let resp = state.service.create_payment_intent(req).await?;
    Ok(Json(resp))
}
