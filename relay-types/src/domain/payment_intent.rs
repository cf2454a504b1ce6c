//! Payment intent and balance models.
//!
//! The processor owns every payment intent record; the relay only holds
//! these values for the duration of a request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::{CurrencyCode, MinorUnits};

/// Metadata attached to every intent so they can be traced back to this integration.
pub const INTEGRATION_CHECK_KEY: &str = "integration_check";
pub const INTEGRATION_CHECK_VALUE: &str = "accept_a_payment";

/// A pending charge to be created by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    pub amount: MinorUnits,
    pub currency: CurrencyCode,
    pub metadata: BTreeMap<String, String>,
    /// Let the processor pick eligible payment methods.
    pub automatic_payment_methods: bool,
}

impl PaymentIntentRequest {
    /// Creates a request carrying the standard integration metadata.
    pub fn new(amount: MinorUnits, currency: CurrencyCode) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            INTEGRATION_CHECK_KEY.to_string(),
            INTEGRATION_CHECK_VALUE.to_string(),
        );
        Self {
            amount,
            currency,
            metadata,
            automatic_payment_methods: true,
        }
    }
}

/// Payment intent as reported back by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// One line of a processor balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BalanceAmount {
    /// Amount in minor units
    #[schema(example = 12500)]
    pub amount: i64,
    #[schema(example = "eur")]
    pub currency: String,
}

/// Processor account balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Balance {
    #[schema(example = "balance")]
    pub object: String,
    pub livemode: bool,
    pub available: Vec<BalanceAmount>,
    pub pending: Vec<BalanceAmount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_integration_metadata() {
        let req = PaymentIntentRequest::new(
            MinorUnits::new(1999).unwrap(),
            CurrencyCode::new("eur").unwrap(),
        );
        assert_eq!(req.amount.get(), 1999);
        assert!(req.automatic_payment_methods);
        assert_eq!(
            req.metadata.get(INTEGRATION_CHECK_KEY).map(String::as_str),
            Some(INTEGRATION_CHECK_VALUE)
        );
    }
}
