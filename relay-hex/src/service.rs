//! Relay Application Service
//!
//! Validates caller input and orchestrates the processor port.
//! Contains NO infrastructure logic - the processor adapter is injected.

use relay_types::{
    AppError, Balance, CreatePaymentIntentRequest, CreatePaymentIntentResponse, CurrencyCode,
    DomainError, MinorUnits, PaymentIntentRequest, PaymentProcessor, ProcessorState, PromoTable,
    PromoVerdict,
};

/// Message returned when a promo request carries no usable code.
pub const MISSING_PROMO_CODE: &str = "Code promo manquant";

/// Application service for the relay.
///
/// Generic over `P: PaymentProcessor` - the adapter is injected at compile time,
/// and whether it was configured at all is carried by `ProcessorState`.
pub struct RelayService<P: PaymentProcessor> {
    processor: ProcessorState<P>,
    promos: PromoTable,
    base_currency: CurrencyCode,
}

impl<P: PaymentProcessor> RelayService<P> {
    /// Creates a service with the default promo table and base currency.
    pub fn new(processor: ProcessorState<P>) -> Self {
        Self {
            processor,
            promos: PromoTable::default(),
            base_currency: CurrencyCode::default(),
        }
    }

    pub fn with_promo_table(mut self, promos: PromoTable) -> Self {
        self.promos = promos;
        self
    }

    pub fn with_base_currency(mut self, currency: CurrencyCode) -> Self {
        self.base_currency = currency;
        self
    }

    pub fn processor_configured(&self) -> bool {
        self.processor.is_configured()
    }

    /// Returns the processor, if one was configured.
    pub fn processor(&self) -> Option<&P> {
        self.processor.get().ok()
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base_currency
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Promo Codes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Checks a caller-supplied promo code.
    ///
    /// A missing or blank code is a bad request; an unknown code is not.
    pub fn verify_promo(&self, code: Option<&str>) -> Result<PromoVerdict, AppError> {
        let code = match code {
            Some(code) if !code.trim().is_empty() => code,
            _ => return Err(AppError::BadRequest(MISSING_PROMO_CODE.into())),
        };

        let verdict = self.promos.lookup(code);
        tracing::debug!(
            code = verdict.code(),
            reduction = verdict.reduction(),
            "Promo lookup"
        );
        Ok(verdict)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Intents
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a raw request into a processor request.
    ///
    /// Runs before the processor is consulted, so bad input is a 400 even
    /// when no processor is configured.
    pub fn build_intent_request(
        &self,
        req: &CreatePaymentIntentRequest,
    ) -> Result<PaymentIntentRequest, AppError> {
        let amount = req
            .amount
            .as_ref()
            .ok_or_else(|| DomainError::InvalidAmount("montant manquant".into()))
            .and_then(MinorUnits::from_json)?;

        let currency = match &req.currency {
            None | Some(serde_json::Value::Null) => self.base_currency.clone(),
            Some(serde_json::Value::String(code)) => CurrencyCode::new(code)?,
            Some(other) => return Err(DomainError::InvalidCurrency(other.to_string()).into()),
        };

        Ok(PaymentIntentRequest::new(amount, currency))
    }

    /// Creates a payment intent with the processor.
    ///
    /// Not idempotent: every call creates a new pending charge upstream.
    pub async fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<CreatePaymentIntentResponse, AppError> {
        let intent_req = self.build_intent_request(&req)?;
        let processor = self.processor.get()?;

        tracing::info!(
            amount_minor = intent_req.amount.get(),
            currency = %intent_req.currency,
            display = %format!("{} {}", intent_req.amount, intent_req.currency.as_str().to_uppercase()),
            "Creating payment intent"
        );

        let intent = processor
            .create_payment_intent(&intent_req)
            .await
            .inspect_err(|e| tracing::error!("Processor error: {}", e))?;

        Ok(CreatePaymentIntentResponse {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Diagnostics
    // ─────────────────────────────────────────────────────────────────────────────

    /// Retrieves the processor balance as a connectivity check.
    pub async fn probe_processor(&self) -> Result<Balance, AppError> {
        let processor = self.processor.get()?;
        processor
            .retrieve_balance()
            .await
            .inspect_err(|e| tracing::warn!("Processor probe failed: {}", e))
            .map_err(Into::into)
    }
}
