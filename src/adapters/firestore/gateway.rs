//! Firestore REST gateway.
//!
//! Implements the `BookingGateway` port over the document store's REST
//! surface. Every operation is a single, independent round trip: no
//! retries, no caching, no coalescing of concurrent identical calls.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::FirestoreConfig;
use crate::domain::{Booking, BookingDraft, BookingId, Tutor, UserId};
use crate::ports::{BookingGateway, GatewayError};

use super::document::{
    CreateDocumentRequest, CreatedDocument, ListDocumentsResponse, RunQueryEntry, RunQueryRequest,
};
use super::mapper::{build_user_bookings_query, decode_booking, decode_tutor, document_id};

/// Placeholder identifier returned when a creation succeeds but the
/// response carries no usable resource name.
const UNKNOWN_BOOKING_ID: &str = "(unknown-id)";

/// Gateway configuration: project addressing plus an optional API key.
#[derive(Clone)]
pub struct FirestoreGatewayConfig {
    project_id: String,
    api_key: Option<SecretString>,
    base_url: String,
}

impl FirestoreGatewayConfig {
    /// Creates a configuration for the given project against the public
    /// Firestore endpoint.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            base_url: "https://firestore.googleapis.com/v1".to_string(),
        }
    }

    /// Attaches a web API key, appended as `?key=` to every request.
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets a custom base URL (for tests or emulators).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The documents root, used as the structured-query parent.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    fn collection_url(&self, collection: &str) -> String {
        self.keyed(format!(
            "{}/{}/{}",
            self.base_url,
            self.documents_root(),
            collection
        ))
    }

    fn run_query_url(&self) -> String {
        self.keyed(format!("{}/{}:runQuery", self.base_url, self.documents_root()))
    }

    fn keyed(&self, url: String) -> String {
        match &self.api_key {
            Some(key) => format!("{}?key={}", url, key.expose_secret()),
            None => url,
        }
    }
}

impl From<&FirestoreConfig> for FirestoreGatewayConfig {
    fn from(config: &FirestoreConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl std::fmt::Debug for FirestoreGatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreGatewayConfig")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Reqwest-backed implementation of the `BookingGateway` port.
#[derive(Debug)]
pub struct FirestoreGateway {
    config: FirestoreGatewayConfig,
    http: reqwest::Client,
}

impl FirestoreGateway {
    /// Creates a gateway with the given configuration.
    pub fn new(config: FirestoreGatewayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BookingGateway for FirestoreGateway {
    async fn list_tutors(&self) -> Result<Vec<Tutor>, GatewayError> {
        tracing::debug!(collection = "tutors", "listing documents");

        let response = self
            .http
            .get(self.config.collection_url("tutors"))
            .send()
            .await
            .map_err(GatewayError::network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "tutor listing rejected");
            return Err(GatewayError::RemoteRejected {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or("request rejected").to_string(),
            });
        }

        let listing: ListDocumentsResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::malformed("tutor listing", err))?;

        Ok(tutors_from_response(listing))
    }

    async fn create_booking(
        &self,
        draft: &BookingDraft,
        id_token: &str,
    ) -> Result<BookingId, GatewayError> {
        tracing::debug!(collection = "bookings", tutor = %draft.tutor_id, "creating document");

        let body = CreateDocumentRequest {
            fields: super::mapper::encode_booking_fields(draft),
        };
        let response = self
            .http
            .post(self.config.collection_url("bookings"))
            .bearer_auth(id_token)
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "booking creation rejected");
            return Err(GatewayError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        // A malformed success body soft-degrades to a placeholder id:
        // the document was created, so the caller still sees success.
        let created: CreatedDocument = response.json().await.unwrap_or_default();
        Ok(created_booking_id(&created))
    }

    async fn list_bookings_for_user(
        &self,
        user_id: &UserId,
        id_token: Option<&str>,
    ) -> Result<Vec<Booking>, GatewayError> {
        tracing::debug!(collection = "bookings", "running structured query");

        let body = RunQueryRequest {
            parent: self.config.documents_root(),
            structured_query: build_user_bookings_query(user_id),
        };

        let mut request = self.http.post(self.config.run_query_url()).json(&body);
        if let Some(token) = id_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(GatewayError::network)?;

        let status = response.status();
        if !status.is_success() {
            // The full body is surfaced: runQuery rejections carry the
            // store's actionable diagnostics, e.g. missing-index hints.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "booking query rejected");
            return Err(GatewayError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let entries: Vec<RunQueryEntry> = response
            .json()
            .await
            .map_err(|err| GatewayError::malformed("booking query", err))?;

        Ok(bookings_from_entries(entries))
    }
}

fn tutors_from_response(listing: ListDocumentsResponse) -> Vec<Tutor> {
    listing.documents.iter().map(decode_tutor).collect()
}

fn created_booking_id(created: &CreatedDocument) -> BookingId {
    match created.name.as_deref() {
        Some(name) if !name.is_empty() => BookingId::new(document_id(name)),
        _ => BookingId::new(UNKNOWN_BOOKING_ID),
    }
}

// Client-side ordering stands in for the orderBy clause the query omits
// (no composite index provisioned on the remote project). The sort must
// be stable: the store gives no secondary sort key, so ties keep their
// response order.
fn bookings_from_entries(entries: Vec<RunQueryEntry>) -> Vec<Booking> {
    let mut bookings: Vec<Booking> = entries
        .into_iter()
        .filter_map(|entry| entry.document)
        .map(|doc| decode_booking(&doc))
        .collect();
    bookings.sort_by(|a, b| b.booking_time.cmp(&a.booking_time));
    bookings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::firestore::document::Document;
    use proptest::prelude::*;
    use serde_json::json;

    fn booking_entry(time: &str, subject: &str) -> RunQueryEntry {
        let document: Document = serde_json::from_value(json!({
            "name": format!("projects/p/databases/(default)/documents/bookings/{}", subject),
            "fields": {
                "subject": {"stringValue": subject},
                "bookingTime": {"timestampValue": time}
            }
        }))
        .expect("test document should deserialize");
        RunQueryEntry {
            document: Some(document),
        }
    }

    #[test]
    fn empty_listing_yields_empty_sequence() {
        assert!(tutors_from_response(ListDocumentsResponse::default()).is_empty());
    }

    #[test]
    fn created_id_is_trailing_path_segment() {
        let created = CreatedDocument {
            name: Some("projects/p/databases/(default)/documents/bookings/bk42".to_string()),
        };
        assert_eq!(created_booking_id(&created).as_str(), "bk42");
    }

    #[test]
    fn created_id_soft_degrades_on_missing_name() {
        assert_eq!(
            created_booking_id(&CreatedDocument::default()).as_str(),
            "(unknown-id)"
        );
        let blank = CreatedDocument {
            name: Some(String::new()),
        };
        assert_eq!(created_booking_id(&blank).as_str(), "(unknown-id)");
    }

    #[test]
    fn bookings_are_sorted_newest_first() {
        let entries = vec![
            booking_entry("2025-03-01T08:00:00Z", "t1"),
            booking_entry("2025-03-01T09:00:00Z", "t2"),
            booking_entry("2025-03-01T10:00:00Z", "t3"),
        ];
        let subjects: Vec<String> = bookings_from_entries(entries)
            .into_iter()
            .map(|b| b.subject)
            .collect();
        assert_eq!(subjects, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn equal_times_keep_response_order() {
        let entries = vec![
            booking_entry("2025-03-01T09:00:00Z", "first"),
            booking_entry("2025-03-01T09:00:00Z", "second"),
        ];
        let subjects: Vec<String> = bookings_from_entries(entries)
            .into_iter()
            .map(|b| b.subject)
            .collect();
        assert_eq!(subjects, vec!["first", "second"]);
    }

    #[test]
    fn entries_without_document_payload_are_discarded() {
        let entries = vec![
            RunQueryEntry::default(),
            booking_entry("2025-03-01T09:00:00Z", "kept"),
            RunQueryEntry::default(),
        ];
        let bookings = bookings_from_entries(entries);
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].subject, "kept");
    }

    #[test]
    fn config_urls_address_the_project() {
        let config = FirestoreGatewayConfig::new("skolar-test")
            .with_base_url("http://localhost:8089/v1");
        assert_eq!(
            config.collection_url("tutors"),
            "http://localhost:8089/v1/projects/skolar-test/databases/(default)/documents/tutors"
        );
        assert_eq!(
            config.run_query_url(),
            "http://localhost:8089/v1/projects/skolar-test/databases/(default)/documents:runQuery"
        );
    }

    #[test]
    fn api_key_is_appended_as_query_parameter() {
        let config = FirestoreGatewayConfig::new("skolar-test")
            .with_base_url("http://localhost:8089/v1")
            .with_api_key(SecretString::new("k123".to_string()));
        assert!(config.collection_url("tutors").ends_with("/tutors?key=k123"));
    }

    proptest! {
        // The descending sort must hold for any input, and ties must
        // preserve response order exactly.
        #[test]
        fn sort_is_descending_and_stable(times in proptest::collection::vec(0i64..500, 0..40)) {
            let entries: Vec<RunQueryEntry> = times
                .iter()
                .enumerate()
                .map(|(index, secs)| {
                    let time = crate::domain::Timestamp::from_unix_secs(*secs)
                        .expect("in-range timestamp");
                    booking_entry(&time.to_rfc3339_utc(), &index.to_string())
                })
                .collect();

            let bookings = bookings_from_entries(entries);
            prop_assert_eq!(bookings.len(), times.len());

            for pair in bookings.windows(2) {
                prop_assert!(pair[0].booking_time >= pair[1].booking_time);
                if pair[0].booking_time == pair[1].booking_time {
                    let first: usize = pair[0].subject.parse().unwrap();
                    let second: usize = pair[1].subject.parse().unwrap();
                    prop_assert!(first < second);
                }
            }
        }
    }
}
