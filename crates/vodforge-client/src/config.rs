//! Client configuration.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Configuration for the encoding service client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the encoding service API, e.g. `https://api.example.com/v1`
    pub base_url: String,
    /// API key, sent as `X-Api-Key` on every request
    pub api_key: String,
    /// Optional tenant organisation id, sent as `X-Tenant-Org-Id`
    pub tenant_org_id: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Max retries for retryable failures
    pub max_retries: u32,
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// The base URL and API key have no sane default; their absence is a
    /// startup-time configuration error.
    pub fn from_env() -> ClientResult<Self> {
        Ok(Self {
            base_url: require_env("ENCODING_API_URL")?,
            api_key: require_env("ENCODING_API_KEY")?,
            tenant_org_id: std::env::var("ENCODING_TENANT_ORG_ID")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            timeout: Duration::from_secs(
                std::env::var("ENCODING_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            max_retries: std::env::var("ENCODING_API_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
        })
    }
}

/// Read a required environment variable; empty counts as absent.
pub(crate) fn require_env(name: &'static str) -> ClientResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ClientError::MissingConfig(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_rejects_missing_and_empty() {
        std::env::remove_var("VODFORGE_TEST_REQUIRE_ENV_MISSING");
        assert!(require_env("VODFORGE_TEST_REQUIRE_ENV_MISSING").is_err());

        std::env::set_var("VODFORGE_TEST_REQUIRE_ENV_EMPTY", "   ");
        assert!(require_env("VODFORGE_TEST_REQUIRE_ENV_EMPTY").is_err());

        std::env::set_var("VODFORGE_TEST_REQUIRE_ENV_SET", "value");
        assert_eq!(require_env("VODFORGE_TEST_REQUIRE_ENV_SET").unwrap(), "value");
    }
}
