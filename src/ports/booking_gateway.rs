//! Booking gateway port for the remote document store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Booking, BookingDraft, BookingId, Tutor, UserId};

/// Failures surfaced by gateway operations.
///
/// Callers do not distinguish subkinds; they render the `Display` text
/// verbatim in the screen's error slot. No layer retries.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request could not complete at the transport level.
    #[error("network error: {0}")]
    Network(String),

    /// The remote store answered with a non-success status. The body is
    /// included because it carries the store's actionable diagnostics
    /// (for example missing-index hints on structured queries).
    #[error("HTTP {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    /// A success status arrived with a body that is not parsable JSON.
    #[error("malformed {context} response: {message}")]
    MalformedResponse {
        context: &'static str,
        message: String,
    },
}

impl GatewayError {
    /// Wraps a transport-level failure.
    pub fn network(err: impl std::fmt::Display) -> Self {
        GatewayError::Network(err.to_string())
    }

    /// Wraps an unparsable success response.
    pub fn malformed(context: &'static str, err: impl std::fmt::Display) -> Self {
        GatewayError::MalformedResponse {
            context,
            message: err.to_string(),
        }
    }
}

/// The three supported round trips against the remote store.
///
/// # Contract
///
/// Implementations must:
/// - Be stateless between calls: no cache, no retry, no coalescing of
///   concurrent identical requests.
/// - Return an empty `Vec` (not an error) when a listing succeeds with
///   no documents.
/// - Return bookings newest first, with ties kept in response order.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Lists every tutor in the store.
    async fn list_tutors(&self) -> Result<Vec<Tutor>, GatewayError>;

    /// Creates a booking from the draft, authorized as the signed-in
    /// user, and returns the store-assigned identifier.
    ///
    /// The store sets `status = "requested"`. A malformed success
    /// response soft-degrades to the placeholder id `"(unknown-id)"`
    /// rather than failing, so callers can still treat the operation as
    /// having succeeded.
    async fn create_booking(
        &self,
        draft: &BookingDraft,
        id_token: &str,
    ) -> Result<BookingId, GatewayError>;

    /// Lists the user's bookings, newest first.
    ///
    /// The token is optional: anonymous queries are allowed by this
    /// interface, though the store's access rules may reject them.
    async fn list_bookings_for_user(
        &self,
        user_id: &UserId,
        id_token: Option<&str>,
    ) -> Result<Vec<Booking>, GatewayError>;
}
