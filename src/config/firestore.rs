//! Firestore (document store) configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

/// Configuration for the remote document store.
#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreConfig {
    /// Firebase project id the documents live under.
    pub project_id: String,

    /// Optional web API key appended as `?key=` to requests. Unauthenticated
    /// reads in test-mode projects work without one.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Base URL of the Firestore REST surface. Overridable for tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl FirestoreConfig {
    /// Validate the Firestore configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.is_empty() {
            return Err(ValidationError::MissingRequired("FIRESTORE_PROJECT_ID"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("firestore.base_url"));
        }
        if let Some(key) = &self.api_key {
            if key.expose_secret().is_empty() {
                return Err(ValidationError::MissingRequired("FIRESTORE_API_KEY"));
            }
        }
        Ok(())
    }
}
