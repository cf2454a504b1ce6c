//! Stripe processor adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use relay_types::{
    Balance, PaymentIntent, PaymentIntentRequest, PaymentProcessor, ProcessorError, SecretKey,
};

use crate::types::{StripeBalance, StripePaymentIntent, api_error};

/// Public Stripe API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Settings needed to talk to Stripe.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: SecretKey,
    /// Overridable so tests and local mocks can stand in for Stripe.
    pub api_base: String,
}

impl StripeConfig {
    pub fn new(secret_key: SecretKey) -> Self {
        Self {
            secret_key,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stripe Processor
// ─────────────────────────────────────────────────────────────────────────────

/// `PaymentProcessor` backed by the Stripe REST API.
pub struct StripeProcessor {
    http: Client,
    api_base: String,
    secret_key: SecretKey,
}

impl StripeProcessor {
    /// Creates a new processor client.
    pub fn new(config: StripeConfig) -> Result<Self, ProcessorError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("relay-stripe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProcessorError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ProcessorError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ProcessorError::Transport(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| ProcessorError::Decode(e.to_string()))
        } else {
            Err(api_error(status, &body))
        }
    }
}

/// Form fields for `POST /v1/payment_intents`.
///
/// The amount is sent exactly as received: it is already in minor units.
pub fn payment_intent_form(req: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), req.amount.get().to_string()),
        ("currency".to_string(), req.currency.to_string()),
    ];
    if req.automatic_payment_methods {
        form.push((
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ));
    }
    for (key, value) in &req.metadata {
        form.push((format!("metadata[{}]", key), value.clone()));
    }
    form
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    #[tracing::instrument(skip(self, req), fields(amount = req.amount.get(), currency = %req.currency))]
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProcessorError> {
        tracing::debug!(
            "Creating payment intent for {} {}",
            req.amount,
            req.currency.as_str().to_uppercase()
        );

        let resp = self
            .http
            .post(self.url("/v1/payment_intents"))
            .bearer_auth(self.secret_key.expose())
            .form(&payment_intent_form(req))
            .send()
            .await
            .map_err(|e| ProcessorError::Transport(e.to_string()))?;

        let intent: StripePaymentIntent = self.handle_response(resp).await?;
        let intent = PaymentIntent::try_from(intent)?;

        tracing::info!(payment_intent_id = %intent.id, status = %intent.status, "Payment intent created");
        Ok(intent)
    }

    #[tracing::instrument(skip(self))]
    async fn retrieve_balance(&self) -> Result<Balance, ProcessorError> {
        let resp = self
            .http
            .get(self.url("/v1/balance"))
            .bearer_auth(self.secret_key.expose())
            .send()
            .await
            .map_err(|e| ProcessorError::Transport(e.to_string()))?;

        let balance: StripeBalance = self.handle_response(resp).await?;
        Ok(balance.into())
    }
}
