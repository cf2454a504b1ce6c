//! # Relay Hex
//!
//! Application service layer and HTTP adapter for the payment relay.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation + processor orchestration)
//! - `inbound/` - HTTP adapter (Axum server, CORS policy)
//! - `openapi/` - OpenAPI document served under `/api-docs`
//!
//! The service is generic over `P: PaymentProcessor`, allowing
//! different processor implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::RelayService;
