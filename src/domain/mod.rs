//! Domain layer - plain records and shared value objects.
//!
//! Tutors and bookings are read-side projections of remote documents; the
//! only locally constructed record is the [`BookingDraft`] used to create
//! a booking.

pub mod booking;
pub mod foundation;
pub mod tutor;

pub use booking::{Booking, BookingDraft, BookingStatus};
pub use foundation::{BookingId, StateMachine, Timestamp, TutorId, UserId, ValidationError};
pub use tutor::Tutor;
