//! The signed-in user's booking history screen.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::domain::{Booking, StateMachine, ValidationError};
use crate::ports::{BookingGateway, IdentityProvider};

use super::ScreenPhase;

/// Controller for the booking history of the signed-in user.
///
/// Refreshing without a session fails locally with the sign-in message
/// and never reaches the gateway.
pub struct BookingsScreen {
    gateway: Arc<dyn BookingGateway>,
    identity: Arc<dyn IdentityProvider>,
    phase: ScreenPhase,
    bookings: Vec<Booking>,
    error: Option<String>,
}

impl BookingsScreen {
    /// Creates the screen in its idle phase.
    pub fn new(gateway: Arc<dyn BookingGateway>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            gateway,
            identity,
            phase: ScreenPhase::Idle,
            bookings: Vec::new(),
            error: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// The loaded bookings, newest first.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// User-facing error text from the last failed refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loads or reloads the user's bookings. A refresh that arrives
    /// while one is already in flight is dropped.
    pub async fn refresh(&mut self) {
        if !self.phase.can_transition_to(&ScreenPhase::Loading) {
            return;
        }
        self.phase = ScreenPhase::Loading;
        self.error = None;

        let Some(user) = self.identity.current_user() else {
            self.error = Some(ValidationError::SignedInRequired.to_string());
            self.phase = ScreenPhase::Failed;
            return;
        };

        // A token failure degrades to an unauthenticated query; open
        // security rules still answer it, locked-down rules reject it
        // remotely with the store's own diagnostics.
        let token = self.identity.id_token().await.ok();
        let result = self
            .gateway
            .list_bookings_for_user(&user.uid, token.as_ref().map(|t| t.expose_secret().as_str()))
            .await;

        match result {
            Ok(bookings) => {
                self.bookings = bookings;
                self.phase = ScreenPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking refresh failed");
                self.error = Some(err.to_string());
                self.phase = ScreenPhase::Failed;
            }
        }
    }
}
