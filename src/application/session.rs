//! Session gate: auth state decides entry flow versus signed-in shell.

use std::sync::{Arc, Mutex};

use crate::ports::{AuthSubscription, IdentityProvider, UserHandle};

/// Top-level navigation destinations of the signed-in shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Tutors,
    Bookings,
    Messages,
    Settings,
}

impl Destination {
    /// All destinations, in navigation-bar order.
    pub const ALL: [Destination; 5] = [
        Destination::Home,
        Destination::Tutors,
        Destination::Bookings,
        Destination::Messages,
        Destination::Settings,
    ];

    /// Label shown in the navigation bar.
    pub fn label(&self) -> &'static str {
        match self {
            Destination::Home => "Home",
            Destination::Tutors => "Tutors",
            Destination::Bookings => "Bookings",
            Destination::Messages => "Messages",
            Destination::Settings => "Settings",
        }
    }
}

/// What the UI should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// No session: render the entry flow.
    EntryFlow,
    /// Signed in: render the shell at the selected destination.
    Shell {
        user: UserHandle,
        destination: Destination,
    },
}

struct SessionState {
    user: Option<UserHandle>,
    destination: Destination,
}

/// Gates the UI on auth state.
///
/// Subscribes to the identity provider on construction; the subscription
/// is dropped with the controller, so the listener is unregistered
/// exactly once. Sign-out resets the destination, so the next session
/// starts at Home rather than wherever the last one ended.
pub struct SessionController {
    state: Arc<Mutex<SessionState>>,
    _subscription: AuthSubscription,
}

impl SessionController {
    /// Creates the controller, seeded with the current auth state.
    pub fn new(identity: &dyn IdentityProvider) -> Self {
        let state = Arc::new(Mutex::new(SessionState {
            user: identity.current_user(),
            destination: Destination::Home,
        }));

        let listener_state = Arc::clone(&state);
        let subscription = identity.subscribe(Arc::new(move |user| {
            tracing::debug!(signed_in = user.is_some(), "auth state changed");
            let mut state = listener_state.lock().expect("session state poisoned");
            if user.is_none() {
                state.destination = Destination::Home;
            }
            state.user = user;
        }));

        Self {
            state,
            _subscription: subscription,
        }
    }

    /// The view to render for the current auth state.
    pub fn view(&self) -> SessionView {
        let state = self.state.lock().expect("session state poisoned");
        match &state.user {
            Some(user) => SessionView::Shell {
                user: user.clone(),
                destination: state.destination,
            },
            None => SessionView::EntryFlow,
        }
    }

    /// Selects a shell destination. Has no visible effect until a
    /// session is active.
    pub fn select(&self, destination: Destination) {
        self.state
            .lock()
            .expect("session state poisoned")
            .destination = destination;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockIdentity;
    use crate::domain::UserId;
    use crate::ports::Credentials;
    use secrecy::SecretString;

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    fn sign_in(identity: &MockIdentity) {
        run(identity.sign_in(Credentials::Password {
            email: "a@example.com".to_string(),
            password: SecretString::new("secret1".to_string()),
        }))
        .expect("sign-in should succeed");
    }

    #[test]
    fn starts_in_the_entry_flow_without_a_session() {
        let identity = MockIdentity::new();
        let controller = SessionController::new(&identity);
        assert_eq!(controller.view(), SessionView::EntryFlow);
    }

    #[test]
    fn existing_session_is_picked_up_at_construction() {
        let identity = MockIdentity::new().with_signed_in(UserHandle::new(
            UserId::new("u1"),
            None,
            None,
        ));
        let controller = SessionController::new(&identity);
        assert!(matches!(
            controller.view(),
            SessionView::Shell {
                destination: Destination::Home,
                ..
            }
        ));
    }

    #[test]
    fn sign_in_moves_to_the_shell_at_home() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let controller = SessionController::new(&identity);

        sign_in(&identity);

        match controller.view() {
            SessionView::Shell { user, destination } => {
                assert_eq!(user.uid.as_str(), "uid-a");
                assert_eq!(destination, Destination::Home);
            }
            SessionView::EntryFlow => panic!("expected the shell"),
        }
    }

    #[test]
    fn sign_out_returns_to_entry_and_resets_the_destination() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let controller = SessionController::new(&identity);

        sign_in(&identity);
        controller.select(Destination::Bookings);
        identity.sign_out();
        assert_eq!(controller.view(), SessionView::EntryFlow);

        sign_in(&identity);
        assert!(matches!(
            controller.view(),
            SessionView::Shell {
                destination: Destination::Home,
                ..
            }
        ));
    }

    #[test]
    fn destinations_keep_navigation_bar_order() {
        let labels: Vec<&str> = Destination::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            vec!["Home", "Tutors", "Bookings", "Messages", "Settings"]
        );
    }

    #[test]
    fn dropped_controller_stops_tracking_auth_changes() {
        let identity = MockIdentity::new().with_account("a@example.com", "secret1");
        let controller = SessionController::new(&identity);
        drop(controller);

        // Must not panic: the listener was unregistered on drop.
        sign_in(&identity);
        identity.sign_out();
    }
}
