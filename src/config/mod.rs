//! Gateway process configuration
//!
//! Process-level settings (provider endpoints, HTTP timeout, log output),
//! read from `PAYZEN_GATEWAY__*` environment variables.
//!
//! Merchant credentials are not part of it: the host passes them with every call.
//!
//! # Example
//!
//! ```no_run
//! use payzen_gateway::config::GatewayConfig;
//!
//! let config = GatewayConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Posting payment forms to {}", config.provider.form_url);
//! ```

mod environment;
mod error;
mod logging;
mod provider;

pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use provider::ProviderConfig;

use serde::Deserialize;

/// Root gateway configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration against the public PayZen endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Provider endpoints and HTTP settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Read `PAYZEN_GATEWAY__*` variables, after loading a `.env` file when
    /// one exists. Nested keys are joined with `__`:
    ///
    /// - `PAYZEN_GATEWAY__ENVIRONMENT=production`
    /// - `PAYZEN_GATEWAY__PROVIDER__API_BASE_URL=https://api.payzen.eu`
    /// - `PAYZEN_GATEWAY__LOGGING__JSON=true`
    ///
    /// Values are not validated here; see [`GatewayConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYZEN_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Check every section. Production additionally requires HTTPS endpoints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.provider.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
