//! Payment processor port trait.
//!
//! This is the only outbound port in our hexagonal architecture.
//! Adapters (Stripe over HTTP, in-memory fakes) implement this trait.

use crate::domain::{Balance, PaymentIntent, PaymentIntentRequest};
use crate::error::ProcessorError;

/// The port for talking to an external payment processor.
///
/// Calls are forwarded as-is: no retries and no idempotency keys.
/// Two calls with the same request create two distinct intents.
#[async_trait::async_trait]
pub trait PaymentProcessor: Send + Sync + 'static {
    /// Creates a pending charge and returns its identifier and client secret.
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProcessorError>;

    /// Retrieves the account balance. Used as a connectivity probe.
    async fn retrieve_balance(&self) -> Result<Balance, ProcessorError>;
}

/// Whether a processor client was configured at startup.
///
/// Built once from configuration and injected into the service, so the
/// degraded mode is an explicit value rather than a missing global.
#[derive(Debug)]
pub enum ProcessorState<P> {
    Ready(P),
    Unconfigured { reason: String },
}

impl<P> ProcessorState<P> {
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        ProcessorState::Unconfigured {
            reason: reason.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ProcessorState::Ready(_))
    }

    /// Returns the processor, or `NotConfigured` without touching the network.
    pub fn get(&self) -> Result<&P, ProcessorError> {
        match self {
            ProcessorState::Ready(processor) => Ok(processor),
            ProcessorState::Unconfigured { .. } => Err(ProcessorError::NotConfigured),
        }
    }
}
