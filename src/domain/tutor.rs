//! Tutor record.

use serde::{Deserialize, Serialize};

use super::foundation::TutorId;

/// A tutor profile, fetched fresh from the remote store on every screen
/// entry. Immutable once decoded; there is no local mutation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    /// Store-assigned document identifier.
    pub id: TutorId,
    /// Display name.
    pub name: String,
    /// Expertise tags; order on the wire is preserved but carries no
    /// domain meaning.
    pub expertise: Vec<String>,
    /// Free-text qualifications.
    pub qualifications: String,
    /// Hourly rate. Non-negative by provenance; missing on the wire
    /// decodes to 0.0.
    pub rate: f64,
    /// Free-text location.
    pub location: String,
}
