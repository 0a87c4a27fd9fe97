//! Client configuration

use crate::constants::{
    DEFAULT_SCHEME, DOMAIN_PRODUCTION, ENV_API_DOMAIN, ENV_API_SCHEME, ENV_REQUEST_TIMEOUT_SECS,
    REQUEST_TIMEOUT_SECS, USER_AGENT,
};

/// Connection settings for `NftGoClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL scheme ("https" in production)
    pub scheme: String,
    /// API host, without scheme or path
    pub domain: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            domain: DOMAIN_PRODUCTION.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds a config from the defaults, overridden by `NFTGO_API_DOMAIN`,
    /// `NFTGO_API_SCHEME` and `NFTGO_REQUEST_TIMEOUT_SECS` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(domain) = lookup(ENV_API_DOMAIN).filter(|d| !d.is_empty()) {
            config.domain = domain;
        }
        if let Some(scheme) = lookup(ENV_API_SCHEME).filter(|s| !s.is_empty()) {
            config.scheme = scheme.to_lowercase();
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => tracing::warn!(
                    value = %raw,
                    default_secs = REQUEST_TIMEOUT_SECS,
                    "Ignoring invalid request timeout"
                ),
            }
        }

        config
    }

    /// Sets the API host
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the URL scheme
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Base URL all endpoint paths are joined onto
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.domain.trim_end_matches('/'))
    }
}
