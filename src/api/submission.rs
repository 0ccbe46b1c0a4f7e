//! Pure transform from the wizard draft to the backend's multipart shape.
//!
//! The mapper produces an inspectable [`SubmissionBody`] instead of a
//! transport-specific form so the rename and serialization rules stay
//! testable; the gateway turns it into an actual multipart request.

use std::path::PathBuf;

use crate::listing::ListingDraft;

use super::models::SharingTypeRecord;

/// Flat multipart body: named text fields plus named file parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, PathBuf)>,
}

impl SubmissionBody {
    fn push(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push((name.to_string(), value.into()));
    }

    /// First value of a named field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Map a draft onto the backend's request shape.
///
/// Scalar fields keep their values under the backend's snake_case names;
/// collections (`sharing_types`, `amenities`, `nearby_places`) are serialized
/// as JSON text fields; booleans become "1"/"0". Pending images turn into
/// file parts while already-persisted references are skipped as files and
/// carried in `existing_images` so an edit does not drop them.
pub fn to_submission(draft: &ListingDraft) -> SubmissionBody {
    let mut body = SubmissionBody::default();

    body.push("pg_name", draft.pg_name.trim());
    body.push("address", draft.address.trim());
    body.push("city", draft.city.trim());
    body.push("area", draft.area.trim());
    if let Some(category) = draft.category {
        body.push("category", category.wire());
    }
    if let Some(preferred) = draft.preferred_for {
        body.push("preferred_for", preferred.wire());
    }
    body.push("phone_number", draft.phone_number.trim());
    body.push("whatsapp_number", draft.effective_whatsapp().trim());
    let map_location = draft.map_location.trim();
    if !map_location.is_empty() {
        body.push("map_location", map_location);
    }

    body.push("sharing_types", sharing_types_json(draft));
    body.push("amenities", json_array(draft.amenities.iter()));
    body.push("nearby_places", json_array(draft.nearby_places.iter()));

    body.push("security_deposit", draft.security_deposit.trim());
    body.push("notice_period", draft.notice_period.trim());
    body.push("refundable_on_exit", bool_field(draft.refundable_on_exit));

    let youtube = draft.youtube_link.trim();
    if !youtube.is_empty() {
        body.push("youtube_link", youtube);
    }

    let existing: Vec<&str> = draft.persisted_images().collect();
    if !existing.is_empty() {
        body.push("existing_images", json_array(existing.iter()));
    }

    for path in draft.pending_images() {
        body.files.push(("images[]".to_string(), path.clone()));
    }

    body
}

/// All five sharing rows as `[{type, enabled, rent}]` with canonical word
/// keys. Disabled rows are included with an empty rent so the backend sees a
/// complete picture.
fn sharing_types_json(draft: &ListingDraft) -> String {
    let records: Vec<SharingTypeRecord> = draft
        .sharing
        .iter()
        .map(|(kind, entry)| SharingTypeRecord {
            kind: kind.key().to_string(),
            enabled: entry.enabled,
            rent: if entry.enabled {
                entry.rent.trim().to_string()
            } else {
                String::new()
            },
        })
        .collect();
    // Serializing a plain struct vec cannot fail.
    serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
}

fn json_array<I, S>(items: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let values: Vec<String> = items.map(|item| item.as_ref().to_string()).collect();
    serde_json::to_string(&values).unwrap_or_else(|_| "[]".to_string())
}

fn bool_field(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
