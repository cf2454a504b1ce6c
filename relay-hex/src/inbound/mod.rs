//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod cors;
mod handlers;
mod server;

pub use cors::{CorsPolicy, DEV_ORIGINS};
pub use handlers::BUSINESS_ROUTES;
pub use server::HttpServer;
