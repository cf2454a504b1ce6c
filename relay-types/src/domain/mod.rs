//! Domain models for the payment relay.

pub mod money;
pub mod payment_intent;
pub mod promo;
pub mod secret_key;

pub use money::{CurrencyCode, DEFAULT_CURRENCY, MinorUnits};
pub use payment_intent::{Balance, BalanceAmount, PaymentIntent, PaymentIntentRequest};
pub use promo::{PromoTable, PromoVerdict};
pub use secret_key::SecretKey;
