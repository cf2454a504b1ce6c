//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names follow what the mobile app already sends and reads
//! (`clientSecret`, `paymentIntentId`, `processorConfigured`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Balance, PromoVerdict};

// ─────────────────────────────────────────────────────────────────────────────
// Promo DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to check a promo code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyPromoRequest {
    /// Promo code, any casing; surrounding whitespace is ignored
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "promo10")]
    pub code: Option<serde_json::Value>,
}

impl VerifyPromoRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(serde_json::Value::String(code.into())),
        }
    }

    /// The code if one was sent as a string.
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_ref().and_then(|v| v.as_str())
    }
}

/// Result of a promo check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VerifyPromoResponse {
    pub valid: bool,
    /// Discount percentage, 0 if the code is not valid
    #[schema(example = 10)]
    pub reduction: u8,
    #[schema(example = "Code promo valide : 10% de réduction !")]
    pub message: String,
}

impl VerifyPromoResponse {
    /// Rejection for a request that carried no usable code.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            reduction: 0,
            message: message.into(),
        }
    }
}

impl From<PromoVerdict> for VerifyPromoResponse {
    fn from(verdict: PromoVerdict) -> Self {
        Self {
            valid: verdict.is_valid(),
            reduction: verdict.reduction(),
            message: verdict.message(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment intent DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment intent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    /// Amount already expressed in minor units (cents); must be a positive integer
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 1999)]
    pub amount: Option<serde_json::Number>,
    /// Three-letter currency code; defaults to the service base currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "eur")]
    pub currency: Option<serde_json::Value>,
}

impl CreatePaymentIntentRequest {
    pub fn new(amount: i64, currency: Option<String>) -> Self {
        Self {
            amount: Some(amount.into()),
            currency: currency.map(serde_json::Value::String),
        }
    }
}

/// Payment intent handle returned to the mobile app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Secret the app uses to confirm the payment client-side
    #[schema(example = "pi_3Nabc_secret_xyz")]
    pub client_secret: String,
    #[schema(example = "pi_3Nabc")]
    pub payment_intent_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Service banner returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Serveur Stripe en ligne")]
    pub message: String,
    pub endpoints: Vec<String>,
}

/// Health report returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub processor_configured: bool,
    /// `Configured` or `Missing`
    #[schema(example = "Configured")]
    pub stripe: String,
    pub routes: Vec<String>,
}

/// Successful processor connectivity probe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProbeResponse {
    #[schema(example = "SUCCESS")]
    pub status: String,
    #[schema(example = "Connexion Stripe OK")]
    pub message: String,
    pub balance: Balance,
}

/// Failed processor connectivity probe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProbeFailure {
    #[schema(example = "ERROR")]
    pub status: String,
    pub error: String,
}

/// Error body shared by the payment routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Montant invalide : le montant doit être strictement positif")]
    pub error: String,
    /// HTTP status code
    #[schema(example = 400)]
    pub code: u16,
}
