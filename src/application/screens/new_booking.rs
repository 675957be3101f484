//! New-booking form.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::domain::{BookingDraft, StateMachine, Timestamp, Tutor, TutorId, ValidationError};
use crate::ports::{BookingGateway, IdentityProvider, UserHandle};

use super::FormPhase;

/// Controller for the booking form.
///
/// Validation runs before any network call: a signed-in user, a selected
/// tutor, and a non-blank subject are required. The user-facing message
/// of whichever check fails first fills the error slot.
pub struct NewBookingForm {
    gateway: Arc<dyn BookingGateway>,
    identity: Arc<dyn IdentityProvider>,
    tutors: Vec<Tutor>,
    tutors_loading: bool,
    /// The selected tutor, if any.
    pub tutor_id: Option<TutorId>,
    /// Subject field; surrounding whitespace is trimmed on submit.
    pub subject: String,
    /// Notes field; a blank value is omitted from the booking.
    pub notes: String,
    /// Requested session time.
    pub booking_time: Timestamp,
    phase: FormPhase,
    error: Option<String>,
    info: Option<String>,
}

impl NewBookingForm {
    /// Creates an empty form.
    pub fn new(gateway: Arc<dyn BookingGateway>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            gateway,
            identity,
            tutors: Vec::new(),
            tutors_loading: false,
            tutor_id: None,
            subject: String::new(),
            notes: String::new(),
            booking_time: Timestamp::now(),
            phase: FormPhase::Editing,
            error: None,
            info: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Tutors offered in the selection list.
    pub fn tutors(&self) -> &[Tutor] {
        &self.tutors
    }

    /// True while the tutor list is loading.
    pub fn tutors_loading(&self) -> bool {
        self.tutors_loading
    }

    /// User-facing error text, local or remote.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// User-facing confirmation text after a successful submission.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Loads the tutor list for the selector. `preselected` wins when it
    /// names a listed tutor; otherwise the first tutor is selected.
    pub async fn load_tutors(&mut self, preselected: Option<TutorId>) {
        self.tutors_loading = true;
        match self.gateway.list_tutors().await {
            Ok(tutors) => {
                self.tutors = tutors;
                self.tutor_id = preselected
                    .filter(|id| self.tutors.iter().any(|tutor| &tutor.id == id))
                    .or_else(|| self.tutors.first().map(|tutor| tutor.id.clone()));
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.tutors_loading = false;
    }

    fn validate(&self) -> Result<(UserHandle, TutorId), ValidationError> {
        let user = self
            .identity
            .current_user()
            .ok_or(ValidationError::SignedInRequired)?;
        let tutor_id = self
            .tutor_id
            .clone()
            .ok_or_else(|| ValidationError::missing_selection("tutor"))?;
        if self.subject.trim().is_empty() {
            return Err(ValidationError::empty_field("subject"));
        }
        Ok((user, tutor_id))
    }

    /// Submits the form. Returns true when the booking was created; the
    /// form is then in its terminal `Submitted` phase and the caller
    /// navigates away.
    pub async fn submit(&mut self) -> bool {
        if !self.phase.can_transition_to(&FormPhase::Submitting) {
            return false;
        }
        self.error = None;
        self.info = None;

        let (user, tutor_id) = match self.validate() {
            Ok(validated) => validated,
            Err(err) => {
                self.error = Some(err.to_string());
                return false;
            }
        };

        self.phase = FormPhase::Submitting;

        let token = match self.identity.id_token().await {
            Ok(token) => token,
            Err(err) => {
                self.error = Some(err.to_string());
                self.phase = FormPhase::Editing;
                return false;
            }
        };

        let notes = self.notes.trim();
        let draft = BookingDraft {
            tutor_name: self
                .tutors
                .iter()
                .find(|tutor| tutor.id == tutor_id)
                .map(|tutor| tutor.name.clone()),
            tutor_id,
            user_id: user.uid,
            subject: self.subject.trim().to_string(),
            booking_time: self.booking_time,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        };

        match self.gateway.create_booking(&draft, token.expose_secret()).await {
            Ok(id) => {
                self.info = Some(format!("Booking created (#{})", id));
                self.phase = FormPhase::Submitted;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking submission failed");
                self.error = Some(err.to_string());
                self.phase = FormPhase::Editing;
                false
            }
        }
    }
}
