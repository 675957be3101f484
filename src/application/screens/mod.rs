//! Per-screen controllers and their phase machines.
//!
//! Each screen owns its own phase, data, and error slot; controllers
//! mutate themselves and the UI re-renders from accessor state. Remote
//! failures and local validation failures land in the same error slot.

pub mod bookings;
pub mod login;
pub mod new_booking;
pub mod settings;
pub mod tutors;

pub use bookings::BookingsScreen;
pub use login::{LoginMode, LoginScreen};
pub use new_booking::NewBookingForm;
pub use settings::SettingsScreen;
pub use tutors::TutorsScreen;

use crate::domain::StateMachine;

/// Lifecycle of a read-only screen's data load.
///
/// `Loading` has no outgoing edge to itself, which is what makes the
/// re-entry guard in each screen's `refresh` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    /// Nothing loaded yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed; previously loaded data is retained.
    Failed,
}

impl StateMachine for ScreenPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ScreenPhase::*;
        matches!(
            (self, target),
            (Idle, Loading) | (Loading, Ready) | (Loading, Failed) | (Ready, Loading) | (Failed, Loading)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ScreenPhase::*;
        match self {
            Idle => vec![Loading],
            Loading => vec![Ready, Failed],
            Ready => vec![Loading],
            Failed => vec![Loading],
        }
    }
}

/// Lifecycle of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Fields are editable.
    Editing,
    /// A submission is in flight.
    Submitting,
    /// The submission succeeded; the form is done.
    Submitted,
}

impl StateMachine for FormPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FormPhase::*;
        matches!(
            (self, target),
            (Editing, Submitting) | (Submitting, Editing) | (Submitting, Submitted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FormPhase::*;
        match self {
            Editing => vec![Submitting],
            Submitting => vec![Editing, Submitted],
            Submitted => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_cannot_reenter_itself() {
        assert!(!ScreenPhase::Loading.can_transition_to(&ScreenPhase::Loading));
    }

    #[test]
    fn failed_screens_can_retry() {
        assert!(ScreenPhase::Failed.can_transition_to(&ScreenPhase::Loading));
        assert!(ScreenPhase::Ready.can_transition_to(&ScreenPhase::Loading));
    }

    #[test]
    fn screen_phase_has_no_terminal_state() {
        for phase in [
            ScreenPhase::Idle,
            ScreenPhase::Loading,
            ScreenPhase::Ready,
            ScreenPhase::Failed,
        ] {
            assert!(!phase.is_terminal());
        }
    }

    #[test]
    fn submitted_form_is_terminal() {
        assert!(FormPhase::Submitted.is_terminal());
        assert!(!FormPhase::Editing.is_terminal());
    }

    #[test]
    fn failed_submission_returns_to_editing() {
        assert!(FormPhase::Submitting.can_transition_to(&FormPhase::Editing));
        assert!(!FormPhase::Editing.can_transition_to(&FormPhase::Submitted));
    }
}
