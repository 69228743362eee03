use boston_ckan::Configuration as CkanConfiguration;
use url::Url;

use crate::error::{FetchError, Result};

pub const DEFAULT_BASE_URL: &str = "https://data.boston.gov/api/3";
pub const DEFAULT_USER_AGENT: &str = "boston-data-rs/0.1";

pub const BASE_URL_ENV: &str = "DATA_BOSTON_BASE_URL";
pub const USER_AGENT_ENV: &str = "DATA_BOSTON_USER_AGENT";

/// Where to send the request and how to identify ourselves
///
/// The query itself is not part of the configuration; see [`crate::fixed_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// CKAN API root, e.g. `https://data.boston.gov/api/3`
    pub base_url: String,
    /// User agent for HTTP requests
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DATA_BOSTON_BASE_URL` and `DATA_BOSTON_USER_AGENT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`FetchConfig::from_env`], reading variables through `lookup`.
    /// Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(ua) = lookup(USER_AGENT_ENV).filter(|v| !v.is_empty()) {
            config = config.with_user_agent(ua);
        }
        config
    }

    /// Point at a different CKAN instance (mirror or test double)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check that the base URL is an absolute http(s) URL with no query or
    /// fragment, since action paths are appended to it
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            FetchError::config_error(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::config_error(format!(
                "unsupported URL scheme '{}' in base URL '{}'",
                parsed.scheme(),
                self.base_url
            )));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(FetchError::config_error(format!(
                "base URL '{}' must not carry a query or fragment",
                self.base_url
            )));
        }

        Ok(())
    }

    /// Build the CKAN client configuration. The user agent is sent per
    /// request by the CKAN client.
    pub fn ckan_configuration(&self) -> Result<CkanConfiguration> {
        self.validate()?;

        Ok(CkanConfiguration {
            base_path: self.base_url.trim_end_matches('/').to_string(),
            user_agent: Some(self.user_agent.clone()),
            client: reqwest::Client::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (BASE_URL_ENV, "http://127.0.0.1:8080/api/3"),
            (USER_AGENT_ENV, "mirror-check/2.0"),
        ]
        .into_iter()
        .collect();

        let config = FetchConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/3");
        assert_eq!(config.user_agent, "mirror-check/2.0");
    }

    #[test]
    fn test_lookup_ignores_empty_values() {
        let config = FetchConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(config, FetchConfig::default());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = FetchConfig::new().with_base_url("not a url");
        assert!(matches!(config.validate(), Err(FetchError::ConfigError { .. })));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let config = FetchConfig::new().with_base_url("ftp://data.boston.gov/api/3");
        assert!(config.ckan_configuration().is_err());
    }

    #[test]
    fn test_base_url_with_query_or_fragment_is_rejected() {
        for base_url in ["http://host/api/3?x=1", "http://host/api/3#top"] {
            let config = FetchConfig::new().with_base_url(base_url);
            assert!(
                matches!(config.validate(), Err(FetchError::ConfigError { .. })),
                "{} should be rejected",
                base_url
            );
        }
    }

    #[test]
    fn test_ckan_configuration_strips_trailing_slash() {
        let ckan = FetchConfig::new()
            .with_base_url("http://localhost:5000/api/3/")
            .ckan_configuration()
            .unwrap();
        assert_eq!(ckan.base_path, "http://localhost:5000/api/3");
        assert_eq!(ckan.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
    }
}
