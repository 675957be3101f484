//! Identity provider port - the external auth collaborator.
//!
//! The application consumes the identity provider through this trait
//! only: credential sign-in, account creation, password reset, the
//! current-user handle, change notifications, and bearer-token issuance
//! for authenticated gateway calls.
//!
//! Change notifications are modeled as a subscribe capability returning
//! a cancellation handle; dropping the handle unregisters the listener
//! exactly once, so the session gate cannot leak its subscription.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::UserId;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHandle {
    /// The provider-assigned user identifier.
    pub uid: UserId,
    /// Email address, if the provider shared one.
    pub email: Option<String>,
    /// Display name, if set on the account.
    pub display_name: Option<String>,
}

impl UserHandle {
    /// Creates a user handle.
    pub fn new(uid: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            uid,
            email,
            display_name,
        }
    }
}

/// Credentials accepted by `sign_in`.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Email/password sign-in.
    Password {
        email: String,
        password: SecretString,
    },
    /// Federated sign-in with a token issued by an upstream provider
    /// (for example `google.com`).
    Federated {
        provider_id: String,
        id_token: SecretString,
    },
}

/// Failures surfaced by identity operations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in")]
    NotSignedIn,

    #[error("identity service rejected the request: {0}")]
    Rejected(String),

    #[error("identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Callback invoked with the new current-user handle (or `None` after
/// sign-out or token revocation).
pub type AuthListener = Arc<dyn Fn(Option<UserHandle>) + Send + Sync>;

/// Registry of auth-state listeners, shared by identity adapters.
///
/// Adapters hold an `Arc<ListenerRegistry>` and call [`notify`] on every
/// auth-state change. Subscriptions hold a `Weak` reference back, so a
/// handle outliving its provider degrades to a no-op on drop.
///
/// [`notify`]: ListenerRegistry::notify
#[derive(Default)]
pub struct ListenerRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: HashMap<u64, AuthListener>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its cancellation handle.
    pub fn subscribe(registry: &Arc<Self>, listener: AuthListener) -> AuthSubscription {
        let id = {
            let mut inner = registry.inner.lock().expect("listener registry poisoned");
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, listener);
            id
        };
        AuthSubscription {
            registry: Arc::downgrade(registry),
            id,
        }
    }

    /// Notifies every registered listener of the new auth state.
    pub fn notify(&self, user: Option<&UserHandle>) {
        let listeners: Vec<AuthListener> = {
            let inner = self.inner.lock().expect("listener registry poisoned");
            inner.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener(user.cloned());
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("listener registry poisoned")
            .listeners
            .len()
    }

    /// True when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn unregister(&self, id: u64) {
        self.inner
            .lock()
            .expect("listener registry poisoned")
            .listeners
            .remove(&id);
    }
}

/// Cancellation handle for an auth-state subscription.
///
/// Dropping the handle unregisters the listener exactly once.
#[must_use = "dropping the subscription immediately unregisters the listener"]
pub struct AuthSubscription {
    registry: Weak<ListenerRegistry>,
    id: u64,
}

impl AuthSubscription {
    /// Explicitly cancels the subscription. Equivalent to dropping it.
    pub fn cancel(self) {}
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(self.id);
        }
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription").field("id", &self.id).finish()
    }
}

/// External identity collaborator.
///
/// # Contract
///
/// Implementations must:
/// - Report `current_user` synchronously from locally held session state.
/// - Invoke every subscribed listener on each auth-state change,
///   including the `None` notification after `sign_out`.
/// - Return `AuthError::NotSignedIn` from `id_token` when no session is
///   active.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current signed-in user, if any.
    fn current_user(&self) -> Option<UserHandle>;

    /// Subscribes to auth-state changes for the lifetime of the handle.
    fn subscribe(&self, listener: AuthListener) -> AuthSubscription;

    /// Signs in with password or federated credentials.
    async fn sign_in(&self, credentials: Credentials) -> Result<UserHandle, AuthError>;

    /// Creates a new account and signs it in.
    async fn create_account(&self, email: &str, password: &str)
        -> Result<UserHandle, AuthError>;

    /// Dispatches a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Issues a bearer token for the signed-in user, used as the
    /// `idToken` on authenticated gateway calls.
    async fn id_token(&self) -> Result<SecretString, AuthError>;

    /// Signs out and notifies listeners with `None`.
    fn sign_out(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn handle(uid: &str) -> UserHandle {
        UserHandle::new(UserId::new(uid), None, None)
    }

    #[test]
    fn notify_reaches_every_listener() {
        let registry = Arc::new(ListenerRegistry::new());
        let count = Arc::new(AtomicUsize::new(0));

        let subs: Vec<_> = (0..3)
            .map(|_| {
                let count = Arc::clone(&count);
                ListenerRegistry::subscribe(
                    &registry,
                    Arc::new(move |_| {
                        count.fetch_add(1, Ordering::SeqCst);
                    }),
                )
            })
            .collect();

        registry.notify(Some(&handle("u1")));
        assert_eq!(count.load(Ordering::SeqCst), 3);
        drop(subs);
    }

    #[test]
    fn listener_receives_the_new_state() {
        let registry = Arc::new(ListenerRegistry::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_by_listener = Arc::clone(&seen);
        let _sub = ListenerRegistry::subscribe(
            &registry,
            Arc::new(move |user| {
                seen_by_listener.lock().unwrap().push(user);
            }),
        );

        registry.notify(Some(&handle("u1")));
        registry.notify(None);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].as_ref().map(|u| u.uid.as_str().to_string()), Some("u1".into()));
        assert!(seen[1].is_none());
    }

    #[test]
    fn dropping_subscription_unregisters_listener() {
        let registry = Arc::new(ListenerRegistry::new());
        let sub = ListenerRegistry::subscribe(&registry, Arc::new(|_| {}));
        assert_eq!(registry.len(), 1);

        drop(sub);
        assert!(registry.is_empty());
    }

    #[test]
    fn cancel_unregisters_listener() {
        let registry = Arc::new(ListenerRegistry::new());
        let sub = ListenerRegistry::subscribe(&registry, Arc::new(|_| {}));
        sub.cancel();
        assert!(registry.is_empty());
    }

    #[test]
    fn subscription_outliving_registry_is_a_noop_on_drop() {
        let registry = Arc::new(ListenerRegistry::new());
        let sub = ListenerRegistry::subscribe(&registry, Arc::new(|_| {}));
        drop(registry);
        drop(sub); // must not panic
    }

    #[test]
    fn unregistered_listener_no_longer_fires() {
        let registry = Arc::new(ListenerRegistry::new());
        let count = Arc::new(AtomicUsize::new(0));

        let count_in_listener = Arc::clone(&count);
        let sub = ListenerRegistry::subscribe(
            &registry,
            Arc::new(move |_| {
                count_in_listener.fetch_add(1, Ordering::SeqCst);
            }),
        );

        registry.notify(None);
        drop(sub);
        registry.notify(None);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn identity_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn IdentityProvider) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn IdentityProvider>>();
    }
}
