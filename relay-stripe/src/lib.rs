//! # Relay Stripe
//!
//! Concrete payment processor adapter for the relay.
//! This crate provides the Stripe client that implements the `PaymentProcessor` port.

use relay_types::{ProcessorError, SecretKey};

mod stripe;
mod types;


pub use stripe::{DEFAULT_API_BASE, StripeConfig, StripeProcessor, payment_intent_form};

/// Build a Stripe processor from a validated secret key.
///
/// # Examples
///
/// ```ignore
/// let key = SecretKey::parse(&std::env::var("STRIPE_SECRET_KEY")?)?;
/// let processor = build_processor(key, relay_stripe::DEFAULT_API_BASE)?;
/// ```
pub fn build_processor(
    secret_key: SecretKey,
    api_base: &str,
) -> Result<StripeProcessor, ProcessorError> {
    StripeProcessor::new(StripeConfig::new(secret_key).with_api_base(api_base))
}
