//! Error types for local precondition failures.

use thiserror::Error;

/// Errors raised by client-side validation, before any network call.
///
/// Screens render these through the same error slot used for remote
/// failures, so the `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You must be signed in.")]
    SignedInRequired,

    #[error("Please select a {field}.")]
    MissingSelection { field: &'static str },

    #[error("Please enter a {field}.")]
    EmptyField { field: &'static str },

    #[error("Enter a valid email")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl ValidationError {
    /// Creates a missing-selection error for a form field.
    pub fn missing_selection(field: &'static str) -> Self {
        ValidationError::MissingSelection { field }
    }

    /// Creates an empty-field error for a form field.
    pub fn empty_field(field: &'static str) -> Self {
        ValidationError::EmptyField { field }
    }

    /// Creates an invalid state transition error.
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        ValidationError::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_selection_displays_user_facing_message() {
        let err = ValidationError::missing_selection("tutor");
        assert_eq!(format!("{}", err), "Please select a tutor.");
    }

    #[test]
    fn empty_field_displays_user_facing_message() {
        let err = ValidationError::empty_field("subject");
        assert_eq!(format!("{}", err), "Please enter a subject.");
    }

    #[test]
    fn signed_in_required_displays_user_facing_message() {
        assert_eq!(
            format!("{}", ValidationError::SignedInRequired),
            "You must be signed in."
        );
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let err = ValidationError::invalid_transition("Submitted", "Submitting");
        let text = format!("{}", err);
        assert!(text.contains("Submitted"));
        assert!(text.contains("Submitting"));
    }
}
