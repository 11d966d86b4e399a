//! Payment provider configuration

use serde::Deserialize;

use super::environment::Environment;
use super::error::ValidationError;
use crate::domain::payment::DEFAULT_FORM_URL;

/// PayZen endpoints and HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Payment page the form posts to
    #[serde(default = "default_form_url")]
    pub form_url: String,

    /// REST API host for refunds and cancellations
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// REST request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ProviderConfig {
    /// Validate provider configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        check_url(&self.form_url, "form_url", environment)?;
        check_url(&self.api_base_url, "api_base_url", environment)?;

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn check_url(
    url: &str,
    name: &'static str,
    environment: &Environment,
) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if *environment == Environment::Production && !url.starts_with("https://") {
        return Err(ValidationError::UrlMustBeHttps(name));
    }
    Ok(())
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            form_url: default_form_url(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_form_url() -> String {
    DEFAULT_FORM_URL.to_string()
}

fn default_api_base_url() -> String {
    "https://api.payzen.eu".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.form_url, "https://secure.payzen.eu/vads-payment/");
        assert_eq!(config.api_base_url, "https://api.payzen.eu");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = ProviderConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTimeout)
        ));

        let config = ProviderConfig {
            request_timeout_secs: 301,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = ProviderConfig {
            api_base_url: "ftp://api.payzen.eu".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidUrl("api_base_url"))
        ));
    }

    #[test]
    fn test_plain_http_allowed_outside_production() {
        let config = ProviderConfig {
            api_base_url: "http://localhost:9000".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::UrlMustBeHttps("api_base_url"))
        ));
    }

    #[test]
    fn test_validation_missing_form_url() {
        let config = ProviderConfig {
            form_url: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("form_url"))
        ));
    }
}
