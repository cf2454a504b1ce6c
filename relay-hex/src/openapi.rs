//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use relay_types::domain::{Balance, BalanceAmount};
use relay_types::dto::{
    CreatePaymentIntentRequest, CreatePaymentIntentResponse, ErrorResponse, HealthResponse,
    ProbeFailure, ProbeResponse, RootResponse, VerifyPromoRequest, VerifyPromoResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = RootResponse)
    )
)]
async fn root() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Processor connectivity probe
#[utoipa::path(
    get,
    path = "/test-stripe",
    tag = "health",
    responses(
        (status = 200, description = "Processor reachable", body = ProbeResponse),
        (status = 500, description = "Processor unreachable or not configured", body = ProbeFailure)
    )
)]
async fn test_stripe() {}

/// Check a promo code
#[utoipa::path(
    post,
    path = "/verify-promo",
    tag = "promo",
    request_body = VerifyPromoRequest,
    responses(
        (status = 200, description = "Code checked; `valid` tells whether it applies", body = VerifyPromoResponse),
        (status = 400, description = "No code supplied", body = VerifyPromoResponse)
    )
)]
async fn verify_promo() {}

/// Create a payment intent
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = CreatePaymentIntentResponse),
        (status = 400, description = "Invalid amount or currency", body = ErrorResponse),
        (status = 500, description = "Processor error or not configured", body = ErrorResponse)
    )
)]
async fn create_payment_intent() {}

/// OpenAPI documentation for the relay API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Relay API",
        version = "1.0.0",
        description = "Backend relay for the mobile app: promo code checks and Stripe payment intents.\n\n## Amounts\n\nAmounts are sent in minor currency units (cents) and forwarded to Stripe unchanged.",
        license(name = "MIT"),
    ),
    paths(
        root,
        health,
        test_stripe,
        verify_promo,
        create_payment_intent,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            ProbeResponse,
            ProbeFailure,
            Balance,
            BalanceAmount,
            VerifyPromoRequest,
            VerifyPromoResponse,
            CreatePaymentIntentRequest,
            CreatePaymentIntentResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health and diagnostics endpoints"),
        (name = "promo", description = "Promo code validation"),
        (name = "payments", description = "Payment intent creation"),
    )
)]
pub struct ApiDoc;
