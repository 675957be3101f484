//! Account and preferences screen.

use std::sync::Arc;

use crate::domain::ValidationError;
use crate::ports::IdentityProvider;

/// Controller for the settings screen: account summary, a password-reset
/// shortcut, sign-out, and local preferences.
pub struct SettingsScreen {
    identity: Arc<dyn IdentityProvider>,
    /// Local notification preference; not persisted remotely.
    pub notifications_enabled: bool,
    error: Option<String>,
    info: Option<String>,
}

impl SettingsScreen {
    /// Creates the screen with notifications on.
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            notifications_enabled: true,
            error: None,
            info: None,
        }
    }

    /// User-facing error text.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// User-facing confirmation text.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Label shown in the account section: display name, else email,
    /// else the provider uid.
    pub fn account_label(&self) -> String {
        match self.identity.current_user() {
            Some(user) => user
                .display_name
                .or(user.email)
                .unwrap_or_else(|| user.uid.to_string()),
            None => "Not signed in".to_string(),
        }
    }

    /// Sends a password-reset email to the signed-in user's address.
    pub async fn send_password_reset(&mut self) {
        self.error = None;
        self.info = None;

        let email = match self.identity.current_user().and_then(|user| user.email) {
            Some(email) => email,
            None => {
                self.error = Some(ValidationError::SignedInRequired.to_string());
                return;
            }
        };

        match self.identity.send_password_reset(&email).await {
            Ok(()) => self.info = Some("Password reset email sent".to_string()),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Signs out. Auth listeners take the UI back to the entry flow.
    pub fn sign_out(&mut self) {
        self.identity.sign_out();
        self.error = None;
        self.info = None;
    }
}
