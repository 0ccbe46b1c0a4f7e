//! Shared test fixtures
#![allow(dead_code)]

use std::path::PathBuf;

use pgnest::listing::{
    Category, DraftPatch, ImageEntry, ListingDraft, PreferredFor, SharingEntry, SharingKind,
};

/// A draft that passes every step's validation.
///
/// Double sharing enabled at 9000, one pending photo, deposit and notice set.
pub fn complete_draft() -> ListingDraft {
    let mut draft = ListingDraft::new();
    draft.apply(DraftPatch {
        pg_name: Some("Green View PG".to_string()),
        address: Some("12 MG Road".to_string()),
        city: Some("Pune".to_string()),
        area: Some("Kothrud".to_string()),
        category: Some(Category::Gents),
        preferred_for: Some(PreferredFor::Students),
        phone_number: Some("9876543210".to_string()),
        map_location: Some("https://maps.google.com/?q=green+view".to_string()),
        amenities: Some(["wifi".to_string(), "laundry".to_string()].into()),
        nearby_places: Some(vec!["Metro Station".to_string()]),
        security_deposit: Some("5000".to_string()),
        notice_period: Some("30".to_string()),
        refundable_on_exit: Some(true),
        images: Some(vec![ImageEntry::Pending(PathBuf::from("photos/front.jpg"))]),
        ..Default::default()
    });

    let mut sharing = draft.sharing.clone();
    sharing.insert(
        SharingKind::Double,
        SharingEntry {
            enabled: true,
            rent: "9000".to_string(),
        },
    );
    draft.apply(DraftPatch {
        sharing: Some(sharing),
        ..Default::default()
    });

    draft
}

/// A listing as the backend would return it for edit-mode hydration.
pub fn sample_record_json() -> &'static str {
    r#"{
        "id": 42,
        "pg_name": "Sunrise Stay",
        "address": "7 Hill Street",
        "city": "Pune",
        "area": "Baner",
        "category": "ladies",
        "preferred_for": "professionals",
        "phone_number": "9876543210",
        "whatsapp_number": "9123456780",
        "map_location": "https://maps.google.com/?q=sunrise",
        "sharing_types": [
            {"type": "single", "enabled": true, "rent": "7500"},
            {"type": "double", "enabled": "1", "rent": 6500},
            {"type": "triple", "enabled": false, "rent": ""}
        ],
        "amenities": ["wifi", "cctv"],
        "nearby_places": ["Bus Stop", "City Mall"],
        "security_deposit": 10000,
        "notice_period": "30",
        "refundable_on_exit": "1",
        "images": ["https://cdn.example.com/pg/42/a.jpg", "https://cdn.example.com/pg/42/b.jpg"],
        "youtube_link": "https://youtu.be/abc123",
        "created_at": "2026-05-14T09:30:00Z"
    }"#
}
