//! Firebase Auth adapter for the identity provider port.
//!
//! Talks to the Identity Toolkit REST surface
//! (`accounts:signInWithPassword`, `accounts:signUp`,
//! `accounts:signInWithIdp`, `accounts:sendOobCode`) and holds the
//! signed-in session in memory. Tokens are not refreshed: `id_token`
//! returns the token issued at sign-in, and an expired token surfaces as
//! a gateway rejection whose recovery path is re-signing in.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::config::IdentityConfig;
use crate::domain::UserId;
use crate::ports::{
    AuthError, AuthListener, AuthSubscription, Credentials, IdentityProvider, ListenerRegistry,
    UserHandle,
};

/// Identity Toolkit configuration.
#[derive(Clone)]
pub struct FirebaseIdentityConfig {
    web_api_key: SecretString,
    base_url: String,
}

impl FirebaseIdentityConfig {
    /// Creates a configuration against the public Identity Toolkit endpoint.
    pub fn new(web_api_key: SecretString) -> Self {
        Self {
            web_api_key,
            base_url: "https://identitytoolkit.googleapis.com/v1".to_string(),
        }
    }

    /// Sets a custom base URL (for tests or emulators).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.base_url,
            action,
            self.web_api_key.expose_secret()
        )
    }
}

impl From<&IdentityConfig> for FirebaseIdentityConfig {
    fn from(config: &IdentityConfig) -> Self {
        Self {
            web_api_key: config.web_api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl std::fmt::Debug for FirebaseIdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseIdentityConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: ErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

struct SessionState {
    user: UserHandle,
    id_token: SecretString,
}

/// Firebase Auth implementation of `IdentityProvider`.
pub struct FirebaseIdentity {
    config: FirebaseIdentityConfig,
    http: reqwest::Client,
    session: Mutex<Option<SessionState>>,
    listeners: Arc<ListenerRegistry>,
}

impl FirebaseIdentity {
    /// Creates an identity adapter with no active session.
    pub fn new(config: FirebaseIdentityConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: Mutex::new(None),
            listeners: Arc::new(ListenerRegistry::new()),
        }
    }

    async fn post_account(
        &self,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, AuthError> {
        let response = self
            .http
            .post(self.config.endpoint(action))
            .json(&payload)
            .send()
            .await
            .map_err(|err| AuthError::ServiceUnavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), action, "identity request rejected");
            return Err(map_rejection(status.as_u16(), &body.error.message));
        }

        response
            .json()
            .await
            .map_err(|err| AuthError::ServiceUnavailable(format!("malformed response: {}", err)))
    }

    fn establish_session(&self, body: serde_json::Value) -> Result<UserHandle, AuthError> {
        let account: AccountResponse = serde_json::from_value(body)
            .map_err(|err| AuthError::ServiceUnavailable(format!("malformed response: {}", err)))?;

        let user = UserHandle::new(
            UserId::new(account.local_id),
            account.email,
            account.display_name,
        );
        *self.session.lock().expect("session lock poisoned") = Some(SessionState {
            user: user.clone(),
            id_token: SecretString::new(account.id_token),
        });
        self.listeners.notify(Some(&user));
        tracing::debug!("session established");
        Ok(user)
    }
}

// Credential mistakes render as a friendly message; anything else keeps
// the backend's diagnostic text.
fn map_rejection(status: u16, message: &str) -> AuthError {
    const CREDENTIAL_FAILURES: [&str; 4] = [
        "EMAIL_NOT_FOUND",
        "INVALID_PASSWORD",
        "INVALID_LOGIN_CREDENTIALS",
        "USER_DISABLED",
    ];
    if CREDENTIAL_FAILURES
        .iter()
        .any(|code| message.starts_with(code))
    {
        AuthError::InvalidCredentials
    } else {
        AuthError::Rejected(format!("HTTP {}: {}", status, message))
    }
}

// The (action, payload) pair for each credential kind.
fn credentials_payload(credentials: &Credentials) -> (&'static str, serde_json::Value) {
    match credentials {
        Credentials::Password { email, password } => (
            "signInWithPassword",
            json!({
                "email": email,
                "password": password.expose_secret(),
                "returnSecureToken": true,
            }),
        ),
        Credentials::Federated {
            provider_id,
            id_token,
        } => (
            "signInWithIdp",
            json!({
                "postBody": format!(
                    "id_token={}&providerId={}",
                    id_token.expose_secret(),
                    provider_id
                ),
                "requestUri": "http://localhost",
                "returnSecureToken": true,
            }),
        ),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    fn current_user(&self) -> Option<UserHandle> {
        self.session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.user.clone())
    }

    fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        ListenerRegistry::subscribe(&self.listeners, listener)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<UserHandle, AuthError> {
        let (action, payload) = credentials_payload(&credentials);
        let body = self.post_account(action, payload).await?;
        self.establish_session(body)
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserHandle, AuthError> {
        let body = self
            .post_account(
                "signUp",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        self.establish_session(body)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.post_account(
            "sendOobCode",
            json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }),
        )
        .await?;
        Ok(())
    }

    async fn id_token(&self) -> Result<SecretString, AuthError> {
        self.session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.id_token.clone())
            .ok_or(AuthError::NotSignedIn)
    }

    fn sign_out(&self) {
        *self.session.lock().expect("session lock poisoned") = None;
        self.listeners.notify(None);
        tracing::debug!("signed out");
    }
}
