//! Backend record shapes and the mapping onto the wizard's draft.
//!
//! The backend speaks snake_case and is loose about scalar types (rents and
//! deposits arrive as strings or numbers depending on the code path that
//! wrote them), so the deserializers here normalize rather than trust.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};

use crate::listing::{
    Category, ImageEntry, ListingDraft, PreferredFor, SharingEntry, SharingKind,
};

/// Standard response envelope: `{ "success": bool, "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

/// One sharing row as the backend stores it, keyed by the canonical word key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharingTypeRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "de_flexible_bool", default)]
    pub enabled: bool,
    #[serde(deserialize_with = "de_stringly", default)]
    pub rent: String,
}

/// A listing as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRecord {
    pub id: Option<u64>,
    #[serde(default)]
    pub pg_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub area: String,
    pub category: Option<Category>,
    pub preferred_for: Option<PreferredFor>,
    #[serde(deserialize_with = "de_stringly", default)]
    pub phone_number: String,
    #[serde(deserialize_with = "de_stringly", default)]
    pub whatsapp_number: String,
    pub map_location: Option<String>,
    #[serde(default)]
    pub sharing_types: Vec<SharingTypeRecord>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub nearby_places: Vec<String>,
    #[serde(deserialize_with = "de_stringly", default)]
    pub security_deposit: String,
    #[serde(deserialize_with = "de_stringly", default)]
    pub notice_period: String,
    #[serde(deserialize_with = "de_flexible_bool", default)]
    pub refundable_on_exit: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub youtube_link: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ListingRecord {
    /// Rebuild a wizard draft from the remote record (edit-mode hydration).
    ///
    /// The sharing map is reconstructed from the `{type, enabled, rent}` entry
    /// list keyed by type; unknown keys are dropped and kinds the record does
    /// not mention stay disabled. Images hydrate as persisted references.
    pub fn into_draft(self) -> ListingDraft {
        let mut draft = ListingDraft::new();

        draft.pg_name = self.pg_name;
        draft.address = self.address;
        draft.city = self.city;
        draft.area = self.area;
        draft.category = self.category;
        draft.preferred_for = self.preferred_for;
        draft.phone_number = self.phone_number;
        draft.same_as_phone =
            self.whatsapp_number.is_empty() || self.whatsapp_number == draft.phone_number;
        draft.whatsapp_number = self.whatsapp_number;
        draft.map_location = self.map_location.unwrap_or_default();

        let mut sharing: BTreeMap<SharingKind, SharingEntry> = draft.sharing.clone();
        for record in self.sharing_types {
            if let Some(kind) = SharingKind::from_key(&record.kind) {
                sharing.insert(
                    kind,
                    SharingEntry {
                        enabled: record.enabled,
                        rent: record.rent,
                    },
                );
            }
        }
        draft.sharing = sharing;

        draft.amenities = self.amenities.into_iter().collect();
        draft.nearby_places = self.nearby_places;
        draft.security_deposit = self.security_deposit;
        draft.notice_period = self.notice_period;
        draft.refundable_on_exit = self.refundable_on_exit;
        draft.images = self.images.into_iter().map(ImageEntry::Persisted).collect();
        draft.youtube_link = self.youtube_link.unwrap_or_default();

        draft
    }
}

/// Accept a string, integer, or float and normalize to its string form.
fn de_stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(value) => value,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Null => String::new(),
    })
}

/// Accept `true`/`false`, 1/0, or "1"/"0"/"true"/"false".
fn de_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Flag(value) => Ok(value),
        Raw::Int(value) => Ok(value != 0),
        Raw::Text(value) => match value.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(DeError::custom(format!("not a boolean: {other:?}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringly_fields_accept_numbers() {
        let record: SharingTypeRecord =
            serde_json::from_str(r#"{"type":"double","enabled":1,"rent":9000}"#).unwrap();
        assert_eq!(record.rent, "9000");
        assert!(record.enabled);
    }

    #[test]
    fn flexible_bool_accepts_strings() {
        let record: SharingTypeRecord =
            serde_json::from_str(r#"{"type":"single","enabled":"1","rent":"7500"}"#).unwrap();
        assert!(record.enabled);

        let record: SharingTypeRecord =
            serde_json::from_str(r#"{"type":"single","enabled":"false","rent":"7500"}"#).unwrap();
        assert!(!record.enabled);
    }

    #[test]
    fn unknown_sharing_keys_are_dropped_on_hydration() {
        let record: ListingRecord = serde_json::from_str(
            r#"{
                "id": 5,
                "pg_name": "Green View PG",
                "sharing_types": [
                    {"type": "double", "enabled": true, "rent": "9000"},
                    {"type": "dorm", "enabled": true, "rent": "2000"}
                ]
            }"#,
        )
        .unwrap();

        let draft = record.into_draft();
        assert!(draft.sharing[&SharingKind::Double].enabled);
        assert_eq!(draft.enabled_sharing().count(), 1);
    }
}
