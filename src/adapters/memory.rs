//! In-memory booking gateway for tests and demos.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Booking, BookingDraft, BookingId, BookingStatus, Tutor, UserId};
use crate::ports::{BookingGateway, GatewayError};

/// `BookingGateway` backed by in-process vectors.
///
/// Records every call so tests can assert that an operation did or did
/// not reach the gateway, and can be forced to fail via `with_error`.
#[derive(Default)]
pub struct InMemoryGateway {
    tutors: Mutex<Vec<Tutor>>,
    bookings: Mutex<Vec<Booking>>,
    next_id: Mutex<u64>,
    forced_error: Mutex<Option<GatewayError>>,
    calls: Mutex<Vec<&'static str>>,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a tutor.
    pub fn with_tutor(self, tutor: Tutor) -> Self {
        self.tutors.lock().expect("tutors lock poisoned").push(tutor);
        self
    }

    /// Seeds an existing booking.
    pub fn with_booking(self, booking: Booking) -> Self {
        self.bookings
            .lock()
            .expect("bookings lock poisoned")
            .push(booking);
        self
    }

    /// Makes every subsequent operation return `error`.
    pub fn with_error(self, error: GatewayError) -> Self {
        *self.forced_error.lock().expect("error lock poisoned") = Some(error);
        self
    }

    /// Makes every subsequent operation return `error`, on an already
    /// shared gateway.
    pub fn fail_with(&self, error: GatewayError) {
        *self.forced_error.lock().expect("error lock poisoned") = Some(error);
    }

    /// Clears a previously forced error.
    pub fn clear_error(&self) {
        *self.forced_error.lock().expect("error lock poisoned") = None;
    }

    /// The operations invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Snapshot of the stored bookings, in insertion order.
    pub fn stored_bookings(&self) -> Vec<Booking> {
        self.bookings.lock().expect("bookings lock poisoned").clone()
    }

    fn record(&self, operation: &'static str) -> Result<(), GatewayError> {
        self.calls.lock().expect("calls lock poisoned").push(operation);
        match self.forced_error.lock().expect("error lock poisoned").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookingGateway for InMemoryGateway {
    async fn list_tutors(&self) -> Result<Vec<Tutor>, GatewayError> {
        self.record("list_tutors")?;
        Ok(self.tutors.lock().expect("tutors lock poisoned").clone())
    }

    async fn create_booking(
        &self,
        draft: &BookingDraft,
        _id_token: &str,
    ) -> Result<BookingId, GatewayError> {
        self.record("create_booking")?;

        let id = {
            let mut next = self.next_id.lock().expect("id lock poisoned");
            *next += 1;
            BookingId::new(format!("bk-{}", next))
        };
        self.bookings
            .lock()
            .expect("bookings lock poisoned")
            .push(Booking {
                id: id.clone(),
                user_id: draft.user_id.clone(),
                tutor_id: draft.tutor_id.clone(),
                tutor_name: draft.tutor_name.clone(),
                subject: draft.subject.clone(),
                booking_time: draft.booking_time,
                status: BookingStatus::Requested,
                notes: draft.notes.clone(),
            });
        Ok(id)
    }

    async fn list_bookings_for_user(
        &self,
        user_id: &UserId,
        _id_token: Option<&str>,
    ) -> Result<Vec<Booking>, GatewayError> {
        self.record("list_bookings_for_user")?;

        let mut bookings: Vec<Booking> = self
            .bookings
            .lock()
            .expect("bookings lock poisoned")
            .iter()
            .filter(|booking| &booking.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.booking_time.cmp(&a.booking_time));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, TutorId};

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    fn draft(user: &str, subject: &str, secs: i64) -> BookingDraft {
        BookingDraft {
            tutor_id: TutorId::new("t1"),
            tutor_name: None,
            user_id: UserId::new(user),
            subject: subject.to_string(),
            booking_time: Timestamp::from_unix_secs(secs).expect("in-range timestamp"),
            notes: None,
        }
    }

    #[test]
    fn created_bookings_get_sequential_ids() {
        let gateway = InMemoryGateway::new();
        let first = run(gateway.create_booking(&draft("u1", "maths", 100), "tok")).unwrap();
        let second = run(gateway.create_booking(&draft("u1", "physics", 200), "tok")).unwrap();
        assert_eq!(first.as_str(), "bk-1");
        assert_eq!(second.as_str(), "bk-2");
    }

    #[test]
    fn listing_filters_by_user_and_sorts_newest_first() {
        let gateway = InMemoryGateway::new();
        run(gateway.create_booking(&draft("u1", "older", 100), "tok")).unwrap();
        run(gateway.create_booking(&draft("u2", "theirs", 150), "tok")).unwrap();
        run(gateway.create_booking(&draft("u1", "newer", 200), "tok")).unwrap();

        let subjects: Vec<String> = run(gateway.list_bookings_for_user(&UserId::new("u1"), None))
            .unwrap()
            .into_iter()
            .map(|b| b.subject)
            .collect();
        assert_eq!(subjects, vec!["newer", "older"]);
    }

    #[test]
    fn forced_error_propagates_and_calls_are_recorded() {
        let gateway = InMemoryGateway::new()
            .with_error(GatewayError::Network("offline".to_string()));

        let result = run(gateway.list_tutors());
        assert!(matches!(result, Err(GatewayError::Network(_))));
        assert_eq!(gateway.calls(), vec!["list_tutors"]);

        gateway.clear_error();
        assert!(run(gateway.list_tutors()).is_ok());
        assert_eq!(gateway.calls(), vec!["list_tutors", "list_tutors"]);
    }
}
