//! RelayService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use relay_types::{
        AppError, Balance, BalanceAmount, CreatePaymentIntentRequest, CurrencyCode, PaymentIntent,
        PaymentIntentRequest, PaymentProcessor, ProcessorError, ProcessorState, PromoTable,
    };

    use crate::RelayService;

    /// Simple in-memory processor for testing the service layer.
    pub struct MockProcessor {
        requests: Mutex<Vec<PaymentIntentRequest>>,
        fail_with: Option<String>,
    }

    impl MockProcessor {
        pub fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::new()
            }
        }

        pub fn requests(&self) -> Vec<PaymentIntentRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentProcessor for MockProcessor {
        async fn create_payment_intent(
            &self,
            req: &PaymentIntentRequest,
        ) -> Result<PaymentIntent, ProcessorError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());

            if let Some(message) = &self.fail_with {
                return Err(ProcessorError::Api {
                    status: 402,
                    message: message.clone(),
                });
            }

            let id = format!("pi_test_{}", requests.len());
            Ok(PaymentIntent {
                client_secret: format!("{}_secret_x", id),
                id,
                amount: req.amount.get(),
                currency: req.currency.to_string(),
                status: "requires_payment_method".into(),
            })
        }

        async fn retrieve_balance(&self) -> Result<Balance, ProcessorError> {
            if let Some(message) = &self.fail_with {
                return Err(ProcessorError::Transport(message.clone()));
            }
            Ok(Balance {
                object: "balance".into(),
                livemode: false,
                available: vec![BalanceAmount {
                    amount: 100,
                    currency: "eur".into(),
                }],
                pending: vec![],
            })
        }
    }

    fn service() -> RelayService<MockProcessor> {
        RelayService::new(ProcessorState::Ready(MockProcessor::new()))
    }

    fn unconfigured() -> RelayService<MockProcessor> {
        RelayService::new(ProcessorState::unconfigured("STRIPE_SECRET_KEY missing"))
    }

    fn intent(amount: serde_json::Value, currency: Option<&str>) -> CreatePaymentIntentRequest {
        let mut body = serde_json::json!({ "amount": amount });
        if let Some(currency) = currency {
            body["currency"] = currency.into();
        }
        serde_json::from_value(body).unwrap()
    }

    fn recorded(service: &RelayService<MockProcessor>) -> Vec<PaymentIntentRequest> {
        match service.processor() {
            Some(processor) => processor.requests(),
            None => vec![],
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Promo codes
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_verify_known_code_any_casing() {
        let service = service();
        for variant in ["promo20", " PROMO20 ", "Promo20\n"] {
            let verdict = service.verify_promo(Some(variant)).unwrap();
            assert!(verdict.is_valid());
            assert_eq!(verdict.reduction(), 20);
        }
    }

    #[test]
    fn test_verify_unknown_code_is_not_an_error() {
        let verdict = service().verify_promo(Some("WINTER99")).unwrap();
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reduction(), 0);
    }

    #[test]
    fn test_verify_missing_or_blank_code_fails() {
        let service = service();
        for code in [None, Some(""), Some("   ")] {
            let result = service.verify_promo(code);
            assert!(
                matches!(result, Err(AppError::BadRequest(ref m)) if m == "Code promo manquant"),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_verify_uses_injected_table() {
        let table = PromoTable::new([("SUMMER", 15)]).unwrap();
        let service = service().with_promo_table(table);

        assert_eq!(service.verify_promo(Some("summer")).unwrap().reduction(), 15);
        assert!(!service.verify_promo(Some("PROMO10")).unwrap().is_valid());
    }

    #[test]
    fn test_verify_works_without_processor() {
        let verdict = unconfigured().verify_promo(Some("blackfriday")).unwrap();
        assert_eq!(verdict.reduction(), 50);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment intents
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_intent_forwards_amount_unscaled() {
        let service = service();

        let resp = service
            .create_payment_intent(intent(1999.into(), Some("EUR")))
            .await
            .unwrap();

        assert_eq!(resp.payment_intent_id, "pi_test_1");
        assert_eq!(resp.client_secret, "pi_test_1_secret_x");

        let sent = recorded(&service);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].amount.get(), 1999);
        assert_eq!(sent[0].currency.as_str(), "eur");
    }

    #[tokio::test]
    async fn test_create_intent_defaults_to_base_currency() {
        let service = service().with_base_currency(CurrencyCode::new("usd").unwrap());

        service
            .create_payment_intent(intent(500.into(), None))
            .await
            .unwrap();

        assert_eq!(recorded(&service)[0].currency.as_str(), "usd");
    }

    #[tokio::test]
    async fn test_create_intent_rejects_bad_amounts_without_calling_processor() {
        let service = service();
        let bad_amounts = [
            serde_json::json!(0),
            serde_json::json!(-100),
            serde_json::json!(19.99),
            serde_json::Value::Null,
        ];

        for amount in bad_amounts {
            let result = service
                .create_payment_intent(intent(amount.clone(), Some("eur")))
                .await;
            assert!(
                matches!(result, Err(AppError::BadRequest(ref m)) if m.starts_with("Montant invalide")),
                "{amount} should be rejected"
            );
        }

        assert!(recorded(&service).is_empty());
    }

    #[tokio::test]
    async fn test_create_intent_rejects_bad_currency() {
        let service = service();

        let result = service
            .create_payment_intent(intent(500.into(), Some("euros")))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(recorded(&service).is_empty());
    }

    #[tokio::test]
    async fn test_create_intent_rejects_non_string_currency() {
        let service = service();
        let req: CreatePaymentIntentRequest =
            serde_json::from_value(serde_json::json!({ "amount": 1999, "currency": 5 })).unwrap();

        let result = service.create_payment_intent(req).await;

        assert!(
            matches!(result, Err(AppError::BadRequest(ref m)) if m.starts_with("Devise invalide")),
            "{result:?}"
        );
        assert!(recorded(&service).is_empty());
    }

    #[tokio::test]
    async fn test_create_intent_unconfigured() {
        let result = unconfigured()
            .create_payment_intent(intent(500.into(), None))
            .await;

        assert!(matches!(result, Err(AppError::ProcessorUnavailable)));
    }

    #[tokio::test]
    async fn test_create_intent_validates_before_configuration_check() {
        let result = unconfigured()
            .create_payment_intent(intent(0.into(), None))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_intent_passes_processor_message_through() {
        let service = RelayService::new(ProcessorState::Ready(MockProcessor::failing(
            "Your card was declined.",
        )));

        let result = service
            .create_payment_intent(intent(500.into(), None))
            .await;

        assert!(matches!(result, Err(AppError::Upstream(ref m)) if m == "Your card was declined."));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_not_deduplicated() {
        let service = service();

        let first = service
            .create_payment_intent(intent(500.into(), None))
            .await
            .unwrap();
        let second = service
            .create_payment_intent(intent(500.into(), None))
            .await
            .unwrap();

        assert_ne!(first.payment_intent_id, second.payment_intent_id);
        assert_eq!(recorded(&service).len(), 2);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Diagnostics
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_probe_returns_balance() {
        let balance = service().probe_processor().await.unwrap();
        assert_eq!(balance.available[0].amount, 100);
    }

    #[tokio::test]
    async fn test_probe_unconfigured() {
        let result = unconfigured().probe_processor().await;
        assert!(matches!(result, Err(AppError::ProcessorUnavailable)));
    }

    #[tokio::test]
    async fn test_probe_failure_surfaces_message() {
        let service = RelayService::new(ProcessorState::Ready(MockProcessor::failing(
            "connection refused",
        )));

        let result = service.probe_processor().await;

        assert!(matches!(result, Err(AppError::Upstream(ref m)) if m == "connection refused"));
    }

    #[test]
    fn test_processor_configured_flag() {
        assert!(service().processor_configured());
        assert!(!unconfigured().processor_configured());
    }
}
