//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{BookingId, TutorId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
