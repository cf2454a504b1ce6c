//! # Relay Types
//!
//! Domain types and port traits for the payment relay.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (promo table, minor-unit amounts, payment intents)
//! - `ports/` - The payment processor trait adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, processor and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Balance, BalanceAmount, CurrencyCode, MinorUnits, PaymentIntent, PaymentIntentRequest,
    PromoTable, PromoVerdict, SecretKey,
};
pub use dto::*;
pub use error::{AppError, DomainError, ProcessorError};
pub use ports::{PaymentProcessor, ProcessorState};
