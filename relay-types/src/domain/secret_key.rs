//! Processor secret key domain type.

use std::fmt;

use crate::error::DomainError;

/// Prefix every processor secret key starts with.
pub const SECRET_KEY_PREFIX: &str = "sk_";

/// Number of leading characters shown when a key is logged.
const VISIBLE_CHARS: usize = 8;

/// A processor secret API key.
///
/// `Debug` and `Display` never reveal more than the first few characters.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Validates a raw key read from the environment.
    ///
    /// # Validation
    /// - Surrounding whitespace is ignored
    /// - Must start with `sk_` and carry something after the prefix
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(DomainError::InvalidSecretKey("key is empty".into()));
        }
        if !key.starts_with(SECRET_KEY_PREFIX) || key.len() == SECRET_KEY_PREFIX.len() {
            return Err(DomainError::InvalidSecretKey(format!(
                "key must start with \"{}\"",
                SECRET_KEY_PREFIX
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// Returns the full key, for use in the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the key targets the processor's test environment.
    pub fn is_test_mode(&self) -> bool {
        self.0.starts_with("sk_test_")
    }

    /// Returns a loggable form of the key.
    pub fn redacted(&self) -> String {
        let visible: String = self.0.chars().take(VISIBLE_CHARS).collect();
        format!("{}… ({} chars)", visible, self.0.chars().count())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&self.redacted()).finish()
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl std::str::FromStr for SecretKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
