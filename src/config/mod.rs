//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `SKOLAR`
//! prefix and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use skolar::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod firestore;
mod identity;

pub use error::{ConfigError, ValidationError};
pub use firestore::FirestoreConfig;
pub use identity::IdentityConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote document store (Firestore REST).
    pub firestore: FirestoreConfig,

    /// Identity provider (Firebase Auth REST).
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `SKOLAR` prefix and `__` separators:
    ///
    /// - `SKOLAR__FIRESTORE__PROJECT_ID=my-project`
    /// - `SKOLAR__IDENTITY__WEB_API_KEY=AIza...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required values are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("SKOLAR").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.firestore.validate()?;
        self.identity.validate()?;
        Ok(())
    }
}
