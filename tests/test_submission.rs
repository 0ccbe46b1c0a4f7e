//! Draft to multipart-body mapping

mod common;

use std::path::PathBuf;

use common::complete_draft;
use pgnest::api::to_submission;
use pgnest::listing::{DraftPatch, ImageEntry};

#[test]
fn scalar_fields_use_backend_names() {
    let body = to_submission(&complete_draft());

    assert_eq!(body.field("pg_name"), Some("Green View PG"));
    assert_eq!(body.field("address"), Some("12 MG Road"));
    assert_eq!(body.field("city"), Some("Pune"));
    assert_eq!(body.field("area"), Some("Kothrud"));
    assert_eq!(body.field("category"), Some("gents"));
    assert_eq!(body.field("preferred_for"), Some("students"));
    assert_eq!(body.field("phone_number"), Some("9876543210"));
    assert_eq!(body.field("security_deposit"), Some("5000"));
    assert_eq!(body.field("notice_period"), Some("30"));
}

#[test]
fn booleans_become_one_and_zero() {
    let mut draft = complete_draft();
    let body = to_submission(&draft);
    assert_eq!(body.field("refundable_on_exit"), Some("1"));

    draft.apply(DraftPatch {
        refundable_on_exit: Some(false),
        ..Default::default()
    });
    let body = to_submission(&draft);
    assert_eq!(body.field("refundable_on_exit"), Some("0"));
}

#[test]
fn mirrored_whatsapp_publishes_the_phone_number() {
    let mut draft = complete_draft();
    draft.apply(DraftPatch {
        whatsapp_number: Some("1112223334".to_string()),
        same_as_phone: Some(true),
        ..Default::default()
    });

    let body = to_submission(&draft);
    assert_eq!(body.field("whatsapp_number"), Some("9876543210"));

    draft.apply(DraftPatch {
        same_as_phone: Some(false),
        ..Default::default()
    });
    let body = to_submission(&draft);
    assert_eq!(body.field("whatsapp_number"), Some("1112223334"));
}

#[test]
fn sharing_types_serialize_all_rows_with_word_keys() {
    let body = to_submission(&complete_draft());
    let json = body.field("sharing_types").unwrap();
    let rows: serde_json::Value = serde_json::from_str(json).unwrap();
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 5);
    let keys: Vec<&str> = rows
        .iter()
        .map(|row| row["type"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["single", "double", "triple", "four", "five_plus"]);

    let double = rows.iter().find(|r| r["type"] == "double").unwrap();
    assert_eq!(double["enabled"], true);
    assert_eq!(double["rent"], "9000");

    // Disabled rows ship with an empty rent, whatever was typed
    let single = rows.iter().find(|r| r["type"] == "single").unwrap();
    assert_eq!(single["enabled"], false);
    assert_eq!(single["rent"], "");
}

#[test]
fn collections_are_json_text_fields() {
    let body = to_submission(&complete_draft());

    let amenities: Vec<String> =
        serde_json::from_str(body.field("amenities").unwrap()).unwrap();
    assert_eq!(amenities, ["laundry", "wifi"]);

    let places: Vec<String> =
        serde_json::from_str(body.field("nearby_places").unwrap()).unwrap();
    assert_eq!(places, ["Metro Station"]);
}

#[test]
fn pending_images_become_file_parts() {
    let body = to_submission(&complete_draft());
    assert_eq!(body.files.len(), 1);
    assert_eq!(body.files[0].0, "images[]");
    assert_eq!(body.files[0].1, PathBuf::from("photos/front.jpg"));
    assert_eq!(body.field("existing_images"), None);
}

#[test]
fn persisted_images_ride_in_existing_images() {
    let mut draft = complete_draft();
    draft.apply(DraftPatch {
        images: Some(vec![
            ImageEntry::Persisted("https://cdn.example.com/pg/42/a.jpg".to_string()),
            ImageEntry::Pending(PathBuf::from("new.jpg")),
        ]),
        ..Default::default()
    });

    let body = to_submission(&draft);
    let existing: Vec<String> =
        serde_json::from_str(body.field("existing_images").unwrap()).unwrap();
    assert_eq!(existing, ["https://cdn.example.com/pg/42/a.jpg"]);
    assert_eq!(body.files.len(), 1);
    assert_eq!(body.files[0].1, PathBuf::from("new.jpg"));
}

#[test]
fn empty_optionals_are_omitted() {
    let mut draft = complete_draft();
    draft.apply(DraftPatch {
        map_location: Some(String::new()),
        youtube_link: Some("   ".to_string()),
        ..Default::default()
    });

    let body = to_submission(&draft);
    assert_eq!(body.field("map_location"), None);
    assert_eq!(body.field("youtube_link"), None);
}

#[test]
fn mapping_does_not_mutate_the_draft() {
    let draft = complete_draft();
    let before = draft.clone();
    let _ = to_submission(&draft);
    assert_eq!(draft, before);
}

#[test]
fn values_are_trimmed_on_the_way_out() {
    let mut draft = complete_draft();
    draft.apply(DraftPatch {
        pg_name: Some("  Green View PG  ".to_string()),
        ..Default::default()
    });

    let body = to_submission(&draft);
    assert_eq!(body.field("pg_name"), Some("Green View PG"));
}
