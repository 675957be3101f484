//! State machine trait for status enums.
//!
//! Screen and form phases follow fixed transition graphs; implementing
//! this trait gives them validated transitions with a uniform error.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the valid transitions; `transition_to` then
/// rejects anything outside the graph.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition, failing if it is not in the graph.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(
                format!("{:?}", self),
                format!("{:?}", target),
            ))
        }
    }

    /// Checks if the current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
