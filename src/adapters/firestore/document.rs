//! Firestore REST wire types.
//!
//! The document store wraps every scalar in a tagged union on the wire:
//! `{"stringValue": ...}`, `{"doubleValue": ...}`, and so on; arrays are
//! `{"arrayValue": {"values": [...]}}` and timestamps are RFC 3339 UTC
//! strings. These types model that encoding plus the structured-query
//! request format used by `documents:runQuery`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;

/// The `fields` map of a document.
pub type DocumentFields = BTreeMap<String, Value>;

/// A tagged scalar or array value.
///
/// The `Unknown` catch-all absorbs tags this crate does not model
/// (`booleanValue`, `mapValue`, ...) so that one exotic field degrades to
/// its zero value at decode time instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    DoubleValue(f64),
    /// Firestore transmits 64-bit integers as decimal strings.
    IntegerValue(String),
    /// RFC 3339 UTC instant.
    TimestampValue(String),
    ArrayValue(ArrayValue),
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

impl Value {
    /// Wraps a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Value::StringValue(value.into())
    }

    /// Wraps a double scalar.
    pub fn double(value: f64) -> Self {
        Value::DoubleValue(value)
    }

    /// Wraps an integer scalar in its decimal-string transport form.
    pub fn integer(value: i64) -> Self {
        Value::IntegerValue(value.to_string())
    }

    /// Wraps a timestamp in its RFC 3339 UTC transport form.
    pub fn timestamp(value: Timestamp) -> Self {
        Value::TimestampValue(value.to_rfc3339_utc())
    }

    /// Wraps an array of tagged values.
    pub fn array(values: Vec<Value>) -> Self {
        Value::ArrayValue(ArrayValue { values })
    }

    /// The string payload, if this is a string-tagged value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) => Some(s),
            _ => None,
        }
    }

    /// The double payload, if this is a double-tagged value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::DoubleValue(d) => Some(*d),
            _ => None,
        }
    }

    /// The integer payload in decimal-string form, if integer-tagged.
    pub fn as_integer_str(&self) -> Option<&str> {
        match self {
            Value::IntegerValue(s) => Some(s),
            _ => None,
        }
    }

    /// The raw timestamp string, if this is a timestamp-tagged value.
    pub fn as_timestamp_str(&self) -> Option<&str> {
        match self {
            Value::TimestampValue(s) => Some(s),
            _ => None,
        }
    }

    /// The element values, if this is an array-tagged value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::ArrayValue(array) => Some(&array.values),
            _ => None,
        }
    }
}

/// The `arrayValue` wrapper.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

/// A stored document: full resource name plus its field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name, e.g.
    /// `projects/{p}/databases/(default)/documents/tutors/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: DocumentFields,
}

/// Response to a collection listing (`GET .../documents/{collection}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Response to a document creation. The name may be missing on a
/// malformed body; the gateway soft-degrades in that case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedDocument {
    #[serde(default)]
    pub name: Option<String>,
}

/// Body sent to a document creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDocumentRequest {
    pub fields: DocumentFields,
}

/// One entry of a `documents:runQuery` response. The stream interleaves
/// non-document entries (read times, partial progress) that carry no
/// `document` payload and must be discarded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunQueryEntry {
    #[serde(default)]
    pub document: Option<Document>,
}

/// Body of a `documents:runQuery` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    /// Documents root the query runs under, e.g.
    /// `projects/{p}/databases/(default)/documents`.
    pub parent: String,
    pub structured_query: StructuredQuery,
}

/// The document store's JSON-encoded filter request format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

/// Selects the collection a query runs over.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

/// A single-field filter clause.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_filter: FieldFilter,
}

/// Field comparison against a tagged value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: FilterOp,
    pub value: Value,
}

/// Dotted path of the filtered field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

/// Comparison operators this crate emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOp {
    #[serde(rename = "EQUAL")]
    Equal,
}
