//! Wizard controller transitions and edit-mode hydration

mod common;

use common::{complete_draft, sample_record_json};
use pgnest::api::{ApiError, ListingRecord};
use pgnest::cli::{Step, WizardMode, WizardState};
use pgnest::listing::{DraftPatch, SharingKind};

#[test]
fn forward_walk_with_a_complete_draft() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.draft = complete_draft();

    for expected in [
        Step::BasicInfo,
        Step::SharingRent,
        Step::Amenities,
        Step::PricingMedia,
        Step::Preview,
    ] {
        assert_eq!(wizard.current_step(), expected);
        wizard.next();
    }
    // Already on the last step; next() stays put
    assert_eq!(wizard.current_step(), Step::Preview);
}

#[test]
fn invalid_step_blocks_and_records_errors() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.next();

    assert_eq!(wizard.current_step(), Step::BasicInfo);
    assert!(wizard.errors.contains_key("pg_name"));
    assert!(wizard.errors.contains_key("city"));
}

#[test]
fn errors_clear_on_a_successful_transition() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.next();
    assert!(!wizard.errors.is_empty());

    wizard.draft = complete_draft();
    wizard.next();
    assert!(wizard.errors.is_empty());
    assert_eq!(wizard.current_step(), Step::SharingRent);
}

#[test]
fn backward_needs_no_validation() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.draft = complete_draft();
    wizard.next();

    // Break the draft, then walk back freely
    wizard.update(DraftPatch {
        pg_name: Some(String::new()),
        ..Default::default()
    });
    wizard.prev();
    assert_eq!(wizard.current_step(), Step::BasicInfo);
    wizard.prev();
    assert_eq!(wizard.current_step(), Step::BasicInfo);
}

#[test]
fn preview_jump_bypasses_intermediate_validators() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.go_to(Step::Preview.position());
    assert_eq!(wizard.current_step(), Step::Preview);

    // And jumping back into a section works on an incomplete draft too
    wizard.go_to(Step::SharingRent.position());
    assert_eq!(wizard.current_step(), Step::SharingRent);
}

#[test]
fn patch_merge_leaves_other_sections_alone() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.draft = complete_draft();

    wizard.update(DraftPatch {
        city: Some("Mumbai".to_string()),
        ..Default::default()
    });

    assert_eq!(wizard.draft.city, "Mumbai");
    assert_eq!(wizard.draft.pg_name, "Green View PG");
    assert!(wizard.draft.sharing[&SharingKind::Double].enabled);
    assert_eq!(wizard.draft.images.len(), 1);
}

#[test]
fn edit_mode_hydrates_the_full_draft() {
    let record: ListingRecord = serde_json::from_str(sample_record_json()).unwrap();
    let mut wizard = WizardState::new(WizardMode::Edit {
        id: 42,
        user_id: 3,
    });

    wizard.hydrate(|| Ok(record)).unwrap();

    let draft = &wizard.draft;
    assert_eq!(draft.pg_name, "Sunrise Stay");
    assert_eq!(draft.area, "Baner");
    assert_eq!(draft.phone_number, "9876543210");
    // WhatsApp differs from phone, so the mirror flag is off
    assert!(!draft.same_as_phone);
    assert_eq!(draft.whatsapp_number, "9123456780");

    assert!(draft.sharing[&SharingKind::Single].enabled);
    assert!(draft.sharing[&SharingKind::Double].enabled);
    assert_eq!(draft.sharing[&SharingKind::Double].rent, "6500");
    assert!(!draft.sharing[&SharingKind::Triple].enabled);

    assert_eq!(draft.security_deposit, "10000");
    assert!(draft.refundable_on_exit);
    assert_eq!(draft.persisted_images().count(), 2);
    assert_eq!(draft.pending_images().count(), 0);

    // The hydrated draft passes every validator as-is
    for step in Step::ALL {
        assert!(pgnest::listing::validate_step(step, draft).is_empty());
    }
}

#[test]
fn hydration_runs_once_and_never_clobbers_edits() {
    let record: ListingRecord = serde_json::from_str(sample_record_json()).unwrap();
    let mut wizard = WizardState::new(WizardMode::Edit {
        id: 42,
        user_id: 3,
    });
    let mut calls = 0;

    assert!(wizard
        .hydrate(|| {
            calls += 1;
            Ok(record.clone())
        })
        .unwrap());

    wizard.update(DraftPatch {
        pg_name: Some("Renamed Stay".to_string()),
        ..Default::default()
    });

    assert!(!wizard
        .hydrate(|| {
            calls += 1;
            Ok(record.clone())
        })
        .unwrap());
    assert_eq!(calls, 1);
    assert_eq!(wizard.draft.pg_name, "Renamed Stay");
}

#[test]
fn failed_hydration_does_not_retry() {
    let mut wizard = WizardState::new(WizardMode::Edit { id: 42, user_id: 3 });
    assert!(wizard.hydrate(|| Err(ApiError::TimedOut)).is_err());

    let mut calls = 0;
    let ran = wizard
        .hydrate(|| {
            calls += 1;
            Err(ApiError::TimedOut)
        })
        .unwrap();
    assert!(!ran);
    assert_eq!(calls, 0);
}

#[test]
fn remote_rejection_lands_back_on_preview_with_the_message() {
    let mut wizard = WizardState::new(WizardMode::Create);
    wizard.draft = complete_draft();
    wizard.go_to(Step::Preview.position());

    wizard.set_remote_error("request failed with HTTP 500, please try again".to_string());

    assert_eq!(wizard.current_step(), Step::Preview);
    assert!(wizard
        .remote_error
        .as_deref()
        .unwrap()
        .contains("HTTP 500"));
    // The draft is untouched and still submittable
    assert_eq!(wizard.draft.pg_name, "Green View PG");
}
