//! CORS policy, chosen per deployment.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Origins the mobile app uses during local development (Expo web and device).
pub const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:19006",
    "http://192.168.1.81:19006",
    "exp://192.168.1.81:19000",
];

/// Which browser origins may call the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, no credentials.
    AllowAny,
    /// Only the listed origins, with credentials.
    AllowList(Vec<String>),
}

impl Default for CorsPolicy {
    fn default() -> Self {
        CorsPolicy::AllowList(DEV_ORIGINS.iter().map(|o| o.to_string()).collect())
    }
}

impl CorsPolicy {
    /// Parses a comma-separated origin list; `*` means any origin.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            CorsPolicy::AllowAny
        } else {
            CorsPolicy::AllowList(origins)
        }
    }

    /// Builds the tower-http layer for this policy.
    pub fn layer(&self) -> CorsLayer {
        let methods = [Method::GET, Method::POST];

        match self {
            CorsPolicy::AllowAny => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any),
            CorsPolicy::AllowList(origins) => {
                let origins: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|o| match HeaderValue::from_str(o) {
                        Ok(v) => Some(v),
                        Err(_) => {
                            tracing::warn!("Ignoring unusable CORS origin {:?}", o);
                            None
                        }
                    })
                    .collect();

                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(methods)
                    .allow_headers([header::CONTENT_TYPE])
                    .allow_credentials(true)
            }
        }
    }
}

impl std::fmt::Display for CorsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorsPolicy::AllowAny => write!(f, "any origin"),
            CorsPolicy::AllowList(origins) => write!(f, "{}", origins.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wildcard() {
        assert_eq!(CorsPolicy::parse("*"), CorsPolicy::AllowAny);
        assert_eq!(CorsPolicy::parse("http://a.test, *"), CorsPolicy::AllowAny);
    }

    #[test]
    fn test_parse_list_trims_and_skips_empty() {
        let policy = CorsPolicy::parse(" http://a.test ,, exp://10.0.0.2:19000 ");
        assert_eq!(
            policy,
            CorsPolicy::AllowList(vec![
                "http://a.test".to_string(),
                "exp://10.0.0.2:19000".to_string()
            ])
        );
    }

    #[test]
    fn test_default_is_dev_allowlist() {
        match CorsPolicy::default() {
            CorsPolicy::AllowList(origins) => assert_eq!(origins.len(), DEV_ORIGINS.len()),
            CorsPolicy::AllowAny => panic!("default should be an allow-list"),
        }
    }
}
