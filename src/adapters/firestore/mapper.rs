//! Document mapper - domain records to and from the wire format.
//!
//! Decoding favors availability over completeness: a field that is
//! missing or carries an unexpected tag degrades to its type-appropriate
//! zero value (empty string, 0.0, empty sequence, Unix epoch) instead of
//! failing the document. A partially populated record is more useful to
//! the UI than a fetch failure. The same policy applies on both the
//! tutor and booking paths.

use crate::domain::{Booking, BookingDraft, BookingStatus, Timestamp, Tutor, TutorId, UserId};

use super::document::{
    CollectionSelector, Document, DocumentFields, FieldFilter, FieldReference, Filter, FilterOp,
    StructuredQuery, Value,
};

/// Extracts the trailing path segment of a document resource name.
///
/// `projects/p/databases/(default)/documents/tutors/t1` yields `t1`.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Decodes a tutor document.
pub fn decode_tutor(doc: &Document) -> Tutor {
    let fields = &doc.fields;
    Tutor {
        id: TutorId::new(document_id(&doc.name)),
        name: string_field(fields, "name"),
        expertise: string_array_field(fields, "expertise"),
        qualifications: string_field(fields, "qualifications"),
        rate: rate_field(fields, "rate"),
        location: string_field(fields, "location"),
    }
}

/// Decodes a booking document.
pub fn decode_booking(doc: &Document) -> Booking {
    let fields = &doc.fields;
    Booking {
        id: document_id(&doc.name).into(),
        user_id: string_field(fields, "userId").into(),
        tutor_id: string_field(fields, "tutorId").into(),
        tutor_name: optional_string_field(fields, "tutorName"),
        subject: string_field(fields, "subject"),
        booking_time: timestamp_field(fields, "bookingTime"),
        status: optional_string_field(fields, "status")
            .map(BookingStatus::from)
            .unwrap_or(BookingStatus::Requested),
        notes: optional_string_field(fields, "notes"),
    }
}

/// Encodes a booking draft into document fields.
///
/// Optional values are omitted entirely rather than written as nulls;
/// blank-notes normalization is the caller's responsibility. Status is
/// always written as `"requested"`.
pub fn encode_booking_fields(draft: &BookingDraft) -> DocumentFields {
    let mut fields = DocumentFields::new();
    fields.insert("userId".to_string(), Value::string(draft.user_id.as_str()));
    fields.insert("tutorId".to_string(), Value::string(draft.tutor_id.as_str()));
    if let Some(tutor_name) = &draft.tutor_name {
        fields.insert("tutorName".to_string(), Value::string(tutor_name));
    }
    fields.insert("subject".to_string(), Value::string(&draft.subject));
    fields.insert("bookingTime".to_string(), Value::timestamp(draft.booking_time));
    fields.insert(
        "status".to_string(),
        Value::string(BookingStatus::Requested.as_str()),
    );
    if let Some(notes) = &draft.notes {
        fields.insert("notes".to_string(), Value::string(notes));
    }
    fields
}

/// Builds the structured query selecting one user's bookings.
///
/// Deliberately carries no ordering clause: the remote project has no
/// composite index provisioned for filter+order on this collection, so
/// the gateway sorts client-side instead.
pub fn build_user_bookings_query(user_id: &UserId) -> StructuredQuery {
    StructuredQuery {
        from: vec![CollectionSelector {
            collection_id: "bookings".to_string(),
        }],
        filter: Some(Filter {
            field_filter: FieldFilter {
                field: FieldReference {
                    field_path: "userId".to_string(),
                },
                op: FilterOp::Equal,
                value: Value::string(user_id.as_str()),
            },
        }),
    }
}

fn string_field(fields: &DocumentFields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_string_field(fields: &DocumentFields, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

// Prefers a double tag, falls back to parsing an integer tag.
fn rate_field(fields: &DocumentFields, key: &str) -> f64 {
    let Some(value) = fields.get(key) else {
        return 0.0;
    };
    value
        .as_f64()
        .or_else(|| value.as_integer_str().and_then(|raw| raw.parse().ok()))
        .unwrap_or(0.0)
}

fn string_array_field(fields: &DocumentFields, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn timestamp_field(fields: &DocumentFields, key: &str) -> Timestamp {
    fields
        .get(key)
        .and_then(Value::as_timestamp_str)
        .and_then(|raw| Timestamp::parse_rfc3339(raw).ok())
        .unwrap_or(Timestamp::UNIX_EPOCH)
}
