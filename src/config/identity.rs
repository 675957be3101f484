//! Identity provider (Firebase Auth) configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

fn default_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

/// Configuration for the Identity Toolkit REST surface.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Web API key identifying the Firebase project to the auth backend.
    pub web_api_key: SecretString,

    /// Base URL of the Identity Toolkit REST surface. Overridable for tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl IdentityConfig {
    /// Validate the identity configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.web_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("IDENTITY_WEB_API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("identity.base_url"));
        }
        Ok(())
    }
}
