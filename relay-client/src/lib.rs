//! # Relay Client SDK
//!
//! A typed Rust client for the payment relay API.

use relay_types::{
    CreatePaymentIntentRequest, CreatePaymentIntentResponse, HealthResponse, ProbeResponse,
    RootResponse, VerifyPromoRequest, VerifyPromoResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Relay API client.
pub struct RelayClient {
    base_url: String,
    http: Client,
}

impl RelayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Fetches the service banner.
    pub async fn root(&self) -> Result<RootResponse, ClientError> {
        self.get("/").await
    }

    /// Fetches the health report.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health").await
    }

    /// Asks the relay to probe the payment processor.
    pub async fn test_processor(&self) -> Result<ProbeResponse, ClientError> {
        self.get("/test-stripe").await
    }

    /// Checks a promo code. Unknown codes come back as `valid: false`, not as errors.
    pub async fn verify_promo(&self, code: &str) -> Result<VerifyPromoResponse, ClientError> {
        self.post("/verify-promo", &VerifyPromoRequest::new(code))
            .await
    }

    /// Creates a payment intent. `amount` is in minor units (cents).
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: Option<&str>,
    ) -> Result<CreatePaymentIntentResponse, ClientError> {
        let req = CreatePaymentIntentRequest::new(amount, currency.map(str::to_string));
        self.post("/create-payment-intent", &req).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Pulls a readable message out of an error body.
///
/// Payment routes answer `{error}`, the promo route answers `{message}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|e| e.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        Json, Router,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
    };
    use serde_json::{Value, json};

    async fn stub_health() -> Json<Value> {
        Json(json!({
            "status": "OK",
            "timestamp": "2026-10-17T08:00:00Z",
            "processorConfigured": false,
            "stripe": "Missing",
            "routes": ["/health", "/test-stripe", "/create-payment-intent", "/verify-promo"]
        }))
    }

    async fn stub_verify_promo(Json(body): Json<Value>) -> axum::response::Response {
        match body["code"].as_str() {
            Some(code) if code.trim().eq_ignore_ascii_case("promo10") => Json(json!({
                "valid": true,
                "reduction": 10,
                "message": "Code promo valide : 10% de réduction !"
            }))
            .into_response(),
            Some(code) if !code.trim().is_empty() => Json(json!({
                "valid": false,
                "reduction": 0,
                "message": "Code promo invalide"
            }))
            .into_response(),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "valid": false, "reduction": 0, "message": "Code promo manquant" })),
            )
                .into_response(),
        }
    }

    async fn stub_create_intent(Json(body): Json<Value>) -> axum::response::Response {
        if body["amount"].as_i64().unwrap_or(0) <= 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Montant invalide : le montant doit être strictement positif",
                    "code": 400
                })),
            )
                .into_response();
        }
        Json(json!({ "clientSecret": "pi_stub_secret_1", "paymentIntentId": "pi_stub" }))
            .into_response()
    }

    async fn stub_test_stripe() -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "ERROR", "error": "processor not configured" })),
        )
            .into_response()
    }

    /// Starts a relay stand-in on an ephemeral port and returns a client for it.
    async fn spawn_stub() -> RelayClient {
        let app = Router::new()
            .route("/health", get(stub_health))
            .route("/test-stripe", get(stub_test_stripe))
            .route("/verify-promo", post(stub_verify_promo))
            .route("/create-payment-intent", post(stub_create_intent));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RelayClient::new(format!("http://{addr}/"))
    }

    #[tokio::test]
    async fn test_health_decodes_camel_case_body() {
        let client = spawn_stub().await;

        let health = client.health().await.unwrap();

        assert_eq!(health.status, "OK");
        assert!(!health.processor_configured);
        assert_eq!(health.stripe, "Missing");
        assert_eq!(health.routes.len(), 4);
    }

    #[tokio::test]
    async fn test_verify_promo_valid_and_unknown() {
        let client = spawn_stub().await;

        let promo = client.verify_promo(" Promo10 ").await.unwrap();
        assert!(promo.valid);
        assert_eq!(promo.reduction, 10);

        let promo = client.verify_promo("NOPE").await.unwrap();
        assert!(!promo.valid);
        assert_eq!(promo.reduction, 0);
    }

    #[tokio::test]
    async fn test_verify_promo_missing_code_is_api_error() {
        let client = spawn_stub().await;

        let err = client.verify_promo("  ").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Api { status: 400, ref message } if message == "Code promo manquant"
        ));
    }

    #[tokio::test]
    async fn test_create_payment_intent_success() {
        let client = spawn_stub().await;

        let intent = client.create_payment_intent(1999, Some("eur")).await.unwrap();

        assert_eq!(intent.payment_intent_id, "pi_stub");
        assert_eq!(intent.client_secret, "pi_stub_secret_1");
    }

    #[tokio::test]
    async fn test_create_payment_intent_rejected_by_relay() {
        let client = spawn_stub().await;

        let err = client.create_payment_intent(0, None).await.unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("Montant invalide"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_processor_probe_failure_surfaces_error_field() {
        let client = spawn_stub().await;

        let err = client.test_processor().await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Api { status: 500, ref message } if message == "processor not configured"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = RelayClient::new(format!("http://{addr}")).health().await.unwrap_err();

        assert!(matches!(err, ClientError::Http(_)));
    }

    #[test]
    fn test_client_creation() {
        let client = RelayClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = RelayClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":"processor not configured","code":500}"#),
            "processor not configured"
        );
        assert_eq!(
            error_message(r#"{"valid":false,"reduction":0,"message":"Code promo manquant"}"#),
            "Code promo manquant"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
