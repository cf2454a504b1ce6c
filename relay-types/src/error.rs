//! Error types for the payment relay.

/// Domain-level errors (invalid values built from caller or operator input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Montant invalide : {0}")]
    InvalidAmount(String),

    #[error("Devise invalide : {0:?}")]
    InvalidCurrency(String),

    #[error("Invalid processor secret key: {0}")]
    InvalidSecretKey(String),

    #[error("Invalid promo entry {code:?}: reduction {reduction}% must be within 1..=100")]
    InvalidReduction { code: String, reduction: u8 },
}

/// Errors raised by a payment processor adapter.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("processor not configured")]
    NotConfigured,

    /// The processor answered with an error payload.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Unexpected processor response: {0}")]
    Decode(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("processor not configured")]
    ProcessorUnavailable,

    /// Processor failure, message passed through verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidAmount(_) | DomainError::InvalidCurrency(_) => {
                AppError::BadRequest(err.to_string())
            }
            DomainError::InvalidSecretKey(_) | DomainError::InvalidReduction { .. } => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<ProcessorError> for AppError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::NotConfigured => AppError::ProcessorUnavailable,
            ProcessorError::Api { message, .. } => AppError::Upstream(message),
            ProcessorError::Transport(e) => AppError::Upstream(e),
            e @ ProcessorError::Decode(_) => AppError::Upstream(e.to_string()),
        }
    }
}
