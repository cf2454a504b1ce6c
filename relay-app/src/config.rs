//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

use anyhow::Context;

use relay_hex::inbound::CorsPolicy;
use relay_stripe::DEFAULT_API_BASE;
use relay_types::{CurrencyCode, SecretKey};

/// Bundle of defaults for where the relay runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Developer machine: strict startup, Expo origins only.
    Local,
    /// Hosted platform: lenient startup, any origin.
    Hosted,
}

impl FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Profile::Local),
            "hosted" | "prod" | "production" => Ok(Profile::Hosted),
            other => anyhow::bail!("Unknown RELAY_PROFILE {:?} (expected local or hosted)", other),
        }
    }
}

/// What to do when the processor key is missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPolicy {
    /// Refuse to start.
    Strict,
    /// Start with payment endpoints answering "processor not configured".
    Lenient,
}

impl FromStr for StartupPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(StartupPolicy::Strict),
            "lenient" => Ok(StartupPolicy::Lenient),
            other => anyhow::bail!(
                "Unknown PROCESSOR_STARTUP_POLICY {:?} (expected strict or lenient)",
                other
            ),
        }
    }
}

impl Profile {
    fn default_policy(self) -> StartupPolicy {
        match self {
            Profile::Local => StartupPolicy::Strict,
            Profile::Hosted => StartupPolicy::Lenient,
        }
    }

    fn default_cors(self) -> CorsPolicy {
        match self {
            Profile::Local => CorsPolicy::default(),
            Profile::Hosted => CorsPolicy::AllowAny,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    pub port: u16,
    pub startup_policy: StartupPolicy,
    pub cors: CorsPolicy,
    /// Raw value; validated by `resolve_processor`.
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    pub base_currency: CurrencyCode,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let profile = match var("RELAY_PROFILE") {
            Some(raw) => raw.parse()?,
            None => Profile::Local,
        };

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse()
            .context("PORT must be a valid port number")?;

        let startup_policy = match var("PROCESSOR_STARTUP_POLICY") {
            Some(raw) => raw.parse()?,
            None => profile.default_policy(),
        };

        let cors = match var("CORS_ALLOWED_ORIGINS") {
            Some(raw) => CorsPolicy::parse(&raw),
            None => profile.default_cors(),
        };

        let base_currency = match var("BASE_CURRENCY") {
            Some(raw) => CurrencyCode::new(&raw).context("BASE_CURRENCY is invalid")?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            profile,
            port,
            startup_policy,
            cors,
            stripe_secret_key: lookup("STRIPE_SECRET_KEY"),
            stripe_api_base: var("STRIPE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            base_currency,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

/// Outcome of the startup check on the processor key.
#[derive(Debug)]
pub enum ProcessorSetup {
    Ready(SecretKey),
    Degraded { reason: String },
}

/// Applies the startup policy to the raw processor key.
pub fn resolve_processor(
    policy: StartupPolicy,
    raw_key: Option<&str>,
) -> anyhow::Result<ProcessorSetup> {
    let problem = match raw_key {
        None => "STRIPE_SECRET_KEY is not set".to_string(),
        Some(raw) => match SecretKey::parse(raw) {
            Ok(key) => return Ok(ProcessorSetup::Ready(key)),
            Err(e) => format!("STRIPE_SECRET_KEY rejected: {}", e),
        },
    };

    match policy {
        StartupPolicy::Strict => anyhow::bail!("{} (startup policy is strict)", problem),
        StartupPolicy::Lenient => Ok(ProcessorSetup::Degraded { reason: problem }),
    }
}
