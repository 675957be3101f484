//! In-memory identity provider for tests and demos.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::UserId;
use crate::ports::{
    AuthError, AuthListener, AuthSubscription, Credentials, IdentityProvider, ListenerRegistry,
    UserHandle,
};

/// Deterministic `IdentityProvider` backed by an account map.
///
/// Tokens are `mock-token-{uid}` so assertions can predict them, and
/// `with_error` forces the next operations to fail with a fixed error.
#[derive(Default)]
pub struct MockIdentity {
    accounts: Mutex<HashMap<String, String>>,
    session: Mutex<Option<UserHandle>>,
    listeners: Arc<ListenerRegistry>,
    forced_error: Mutex<Option<AuthError>>,
}

impl MockIdentity {
    /// Creates a provider with no accounts and no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account that `sign_in` will accept.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts
            .lock()
            .expect("accounts lock poisoned")
            .insert(email.into(), password.into());
        self
    }

    /// Starts with the given user already signed in.
    pub fn with_signed_in(self, user: UserHandle) -> Self {
        *self.session.lock().expect("session lock poisoned") = Some(user);
        self
    }

    /// Makes every subsequent fallible operation return `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.forced_error.lock().expect("error lock poisoned") = Some(error);
        self
    }

    /// Clears a previously forced error.
    pub fn clear_error(&self) {
        *self.forced_error.lock().expect("error lock poisoned") = None;
    }

    fn check_forced(&self) -> Result<(), AuthError> {
        match self.forced_error.lock().expect("error lock poisoned").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn establish(&self, user: UserHandle) -> UserHandle {
        *self.session.lock().expect("session lock poisoned") = Some(user.clone());
        self.listeners.notify(Some(&user));
        user
    }

    fn uid_for(email: &str) -> String {
        format!("uid-{}", email.split('@').next().unwrap_or(email))
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    fn current_user(&self) -> Option<UserHandle> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        ListenerRegistry::subscribe(&self.listeners, listener)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<UserHandle, AuthError> {
        self.check_forced()?;
        match credentials {
            Credentials::Password { email, password } => {
                let accounts = self.accounts.lock().expect("accounts lock poisoned");
                match accounts.get(&email) {
                    Some(stored) if stored == password.expose_secret() => {}
                    _ => return Err(AuthError::InvalidCredentials),
                }
                drop(accounts);
                Ok(self.establish(UserHandle::new(
                    UserId::new(Self::uid_for(&email)),
                    Some(email),
                    None,
                )))
            }
            Credentials::Federated { provider_id, .. } => Ok(self.establish(UserHandle::new(
                UserId::new(format!("uid-{}", provider_id)),
                None,
                None,
            ))),
        }
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserHandle, AuthError> {
        self.check_forced()?;
        let mut accounts = self.accounts.lock().expect("accounts lock poisoned");
        if accounts.contains_key(email) {
            return Err(AuthError::Rejected("EMAIL_EXISTS".to_string()));
        }
        accounts.insert(email.to_string(), password.to_string());
        drop(accounts);
        Ok(self.establish(UserHandle::new(
            UserId::new(Self::uid_for(email)),
            Some(email.to_string()),
            None,
        )))
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.check_forced()?;
        if self
            .accounts
            .lock()
            .expect("accounts lock poisoned")
            .contains_key(email)
        {
            Ok(())
        } else {
            Err(AuthError::Rejected("EMAIL_NOT_FOUND".to_string()))
        }
    }

    async fn id_token(&self) -> Result<SecretString, AuthError> {
        self.check_forced()?;
        self.session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|user| SecretString::new(format!("mock-token-{}", user.uid)))
            .ok_or(AuthError::NotSignedIn)
    }

    fn sign_out(&self) {
        *self.session.lock().expect("session lock poisoned") = None;
        self.listeners.notify(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    fn password_credentials(email: &str, password: &str) -> Credentials {
        Credentials::Password {
            email: email.to_string(),
            password: SecretString::new(password.to_string()),
        }
    }

    #[test]
    fn sign_in_accepts_registered_account() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let user = run(identity.sign_in(password_credentials("a@example.com", "secret1")))
            .expect("sign-in should succeed");
        assert_eq!(user.uid.as_str(), "uid-a");
        assert_eq!(identity.current_user(), Some(user));
    }

    #[test]
    fn sign_in_rejects_wrong_password() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let result = run(identity.sign_in(password_credentials("a@example.com", "wrong")));
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(identity.current_user().is_none());
    }

    #[test]
    fn create_account_rejects_duplicate_email() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let result = run(identity.create_account("a@example.com", "other"));
        assert!(matches!(result, Err(AuthError::Rejected(_))));
    }

    #[test]
    fn listeners_observe_sign_in_and_sign_out() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let changes = Arc::new(AtomicUsize::new(0));

        let changes_in_listener = Arc::clone(&changes);
        let _sub = identity.subscribe(Arc::new(move |_| {
            changes_in_listener.fetch_add(1, Ordering::SeqCst);
        }));

        run(identity.sign_in(password_credentials("a@example.com", "secret1")))
            .expect("sign-in should succeed");
        identity.sign_out();

        assert_eq!(changes.load(Ordering::SeqCst), 2);
        assert!(identity.current_user().is_none());
    }

    #[test]
    fn id_token_is_deterministic_per_user() {
        let identity = MockIdentity::new()
            .with_signed_in(UserHandle::new(UserId::new("u9"), None, None));
        let token = run(identity.id_token()).expect("token should issue");
        assert_eq!(token.expose_secret(), "mock-token-u9");
    }

    #[test]
    fn forced_error_fails_operations_until_cleared() {
        let identity = MockIdentity::new()
            .with_account("a@example.com", "secret1")
            .with_error(AuthError::ServiceUnavailable("down".to_string()));

        let result = run(identity.sign_in(password_credentials("a@example.com", "secret1")));
        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));

        identity.clear_error();
        run(identity.sign_in(password_credentials("a@example.com", "secret1")))
            .expect("sign-in should succeed after clearing");
    }
}
