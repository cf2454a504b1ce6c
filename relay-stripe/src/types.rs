//! Stripe wire types and their mapping onto domain types.

use serde::Deserialize;

use relay_types::{Balance, BalanceAmount, PaymentIntent, ProcessorError};

// ─────────────────────────────────────────────────────────────────────────────
// Response bodies
// ─────────────────────────────────────────────────────────────────────────────

/// `payment_intent` object as returned by `POST /v1/payment_intents`.
#[derive(Debug, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

impl TryFrom<StripePaymentIntent> for PaymentIntent {
    type Error = ProcessorError;

    fn try_from(pi: StripePaymentIntent) -> Result<Self, Self::Error> {
        let client_secret = pi.client_secret.ok_or_else(|| {
            ProcessorError::Decode(format!("payment intent {} has no client_secret", pi.id))
        })?;

        Ok(PaymentIntent {
            id: pi.id,
            client_secret,
            amount: pi.amount,
            currency: pi.currency,
            status: pi.status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StripeBalanceAmount {
    pub amount: i64,
    pub currency: String,
}

/// `balance` object as returned by `GET /v1/balance`.
#[derive(Debug, Deserialize)]
pub struct StripeBalance {
    pub object: String,
    #[serde(default)]
    pub livemode: bool,
    #[serde(default)]
    pub available: Vec<StripeBalanceAmount>,
    #[serde(default)]
    pub pending: Vec<StripeBalanceAmount>,
}

impl From<StripeBalance> for Balance {
    fn from(b: StripeBalance) -> Self {
        let convert = |lines: Vec<StripeBalanceAmount>| {
            lines
                .into_iter()
                .map(|l| BalanceAmount {
                    amount: l.amount,
                    currency: l.currency,
                })
                .collect()
        };

        Balance {
            object: b.object,
            livemode: b.livemode,
            available: convert(b.available),
            pending: convert(b.pending),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Envelope of every non-2xx Stripe response.
#[derive(Debug, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorDetail {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
}

/// Builds the error for a non-2xx response, preferring Stripe's own message.
pub fn api_error(status: reqwest::StatusCode, body: &str) -> ProcessorError {
    let detail = serde_json::from_str::<StripeErrorBody>(body)
        .ok()
        .map(|b| b.error);

    if let Some(detail) = &detail {
        tracing::debug!(
            status = status.as_u16(),
            kind = detail.kind.as_deref().unwrap_or("-"),
            code = detail.code.as_deref().unwrap_or("-"),
            "Stripe returned an error"
        );
    }

    let message = detail
        .and_then(|d| d.message)
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("Stripe responded {} {}", status.as_u16(), reason),
            None => format!("Stripe responded {}", status.as_u16()),
        });

    ProcessorError::Api {
        status: status.as_u16(),
        message,
    }
}
