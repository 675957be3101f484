//! Entry-flow screen: sign in, register, or reset a password.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::ValidationError;
use crate::ports::{Credentials, IdentityProvider};

/// Whether the entry form signs in to an existing account or creates a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    Register,
}

/// Controller for the entry flow.
///
/// Email and password checks run locally before the identity provider is
/// contacted; provider failures render through the same error slot.
pub struct LoginScreen {
    identity: Arc<dyn IdentityProvider>,
    /// Active form mode.
    pub mode: LoginMode,
    /// Email field.
    pub email: String,
    /// Password field; cleared after a successful submission.
    pub password: String,
    busy: bool,
    error: Option<String>,
    info: Option<String>,
}

impl LoginScreen {
    /// Creates the screen in sign-in mode.
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            mode: LoginMode::SignIn,
            email: String::new(),
            password: String::new(),
            busy: false,
            error: None,
            info: None,
        }
    }

    /// True while a submission is in flight.
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// User-facing error text.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// User-facing confirmation text.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Switches between sign-in and registration, clearing messages.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::Register,
            LoginMode::Register => LoginMode::SignIn,
        };
        self.error = None;
        self.info = None;
    }

    fn validate_email(&self) -> Result<&str, ValidationError> {
        let email = self.email.trim();
        if email.contains('@') && email.contains('.') {
            Ok(email)
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }

    fn validate(&self) -> Result<&str, ValidationError> {
        let email = self.validate_email()?;
        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(email)
    }

    /// Submits the form in its current mode. Returns true when a session
    /// was established.
    pub async fn submit(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.error = None;
        self.info = None;

        let email = match self.validate() {
            Ok(email) => email.to_string(),
            Err(err) => {
                self.error = Some(err.to_string());
                return false;
            }
        };

        self.busy = true;
        let result = match self.mode {
            LoginMode::SignIn => {
                self.identity
                    .sign_in(Credentials::Password {
                        email,
                        password: SecretString::new(self.password.clone()),
                    })
                    .await
            }
            LoginMode::Register => self.identity.create_account(&email, &self.password).await,
        };
        self.busy = false;

        match result {
            Ok(_) => {
                self.password.clear();
                true
            }
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Signs in with a token from an upstream provider.
    pub async fn sign_in_federated(
        &mut self,
        provider_id: impl Into<String>,
        id_token: SecretString,
    ) -> bool {
        if self.busy {
            return false;
        }
        self.error = None;
        self.info = None;
        self.busy = true;

        let result = self
            .identity
            .sign_in(Credentials::Federated {
                provider_id: provider_id.into(),
                id_token,
            })
            .await;
        self.busy = false;

        match result {
            Ok(_) => true,
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Sends a password-reset email to the entered address.
    pub async fn send_password_reset(&mut self) {
        self.error = None;
        self.info = None;

        let email = match self.validate_email() {
            Ok(email) => email.to_string(),
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };

        match self.identity.send_password_reset(&email).await {
            Ok(()) => self.info = Some("Password reset email sent".to_string()),
            Err(err) => self.error = Some(err.to_string()),
        }
    }
}
