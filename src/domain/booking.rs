//! Booking records and the creation draft.

use serde::{Deserialize, Serialize};

use super::foundation::{BookingId, Timestamp, TutorId, UserId};

/// Booking lifecycle status.
///
/// An open string enumeration: this system only ever produces
/// `"requested"`, but the field round-trips arbitrary values written by
/// other backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Requested,
    Other(String),
}

impl BookingStatus {
    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Requested => "requested",
            BookingStatus::Other(value) => value,
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(value: &str) -> Self {
        if value == "requested" {
            BookingStatus::Requested
        } else {
            BookingStatus::Other(value.to_string())
        }
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        BookingStatus::from(value.as_str())
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking as read back from the remote store.
///
/// Created once from a [`BookingDraft`], then only listed; there is no
/// update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Store-assigned document identifier.
    pub id: BookingId,
    /// Owning user.
    pub user_id: UserId,
    /// Booked tutor.
    pub tutor_id: TutorId,
    /// Tutor display name denormalized at creation time for easy display.
    /// May be absent on older documents.
    pub tutor_name: Option<String>,
    /// Subject text.
    pub subject: String,
    /// Booking time, timezone-normalized to UTC.
    pub booking_time: Timestamp,
    /// Lifecycle status; the store assigns `"requested"` on creation.
    pub status: BookingStatus,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Input for creating a booking.
///
/// Carries no status field: the store always assigns `"requested"`.
/// Callers normalize blank notes to `None` before constructing a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub tutor_id: TutorId,
    pub tutor_name: Option<String>,
    pub user_id: UserId,
    pub subject: String,
    pub booking_time: Timestamp,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_requested_maps_to_wire_string() {
        assert_eq!(BookingStatus::Requested.as_str(), "requested");
        assert_eq!(BookingStatus::from("requested"), BookingStatus::Requested);
    }

    #[test]
    fn status_round_trips_arbitrary_values() {
        let status = BookingStatus::from("confirmed");
        assert_eq!(status, BookingStatus::Other("confirmed".to_string()));
        assert_eq!(status.as_str(), "confirmed");
    }

    #[test]
    fn status_serde_uses_plain_strings() {
        let json = serde_json::to_string(&BookingStatus::Requested).unwrap();
        assert_eq!(json, "\"requested\"");
        let back: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, BookingStatus::Other("cancelled".to_string()));
    }
}
