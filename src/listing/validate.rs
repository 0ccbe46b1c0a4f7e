//! Per-step validation of the listing draft.
//!
//! Each step has a pure function taking the current draft and returning a
//! field-to-message map. An empty map means the step passes and the wizard may
//! advance; a non-empty map blocks the transition and the messages are shown
//! inline next to their fields. Validation never touches the network.

use std::collections::BTreeMap;

use url::Url;

use super::draft::ListingDraft;
use crate::cli::wizard::Step;

/// Field name to human-readable message. Recomputed fresh on every transition
/// attempt; never persisted.
pub type ValidationErrors = BTreeMap<String, String>;

/// Run the validator for the given step.
pub fn validate_step(step: Step, draft: &ListingDraft) -> ValidationErrors {
    match step {
        Step::BasicInfo => validate_basic_info(draft),
        Step::SharingRent => validate_sharing(draft),
        // Amenities and nearby places are optional; Preview submits instead.
        Step::Amenities | Step::Preview => ValidationErrors::new(),
        Step::PricingMedia => validate_pricing_media(draft),
    }
}

/// Step 1: identity and contact fields.
pub fn validate_basic_info(draft: &ListingDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    require(&mut errors, "pg_name", &draft.pg_name, "PG name is required");
    require(&mut errors, "address", &draft.address, "Address is required");
    require(&mut errors, "city", &draft.city, "City is required");
    require(&mut errors, "area", &draft.area, "Area is required");

    if draft.category.is_none() {
        errors.insert("category".to_string(), "Category is required".to_string());
    }
    if draft.preferred_for.is_none() {
        errors.insert(
            "preferred_for".to_string(),
            "Preferred tenants is required".to_string(),
        );
    }

    if draft.phone_number.trim().is_empty() {
        errors.insert(
            "phone_number".to_string(),
            "Phone number is required".to_string(),
        );
    } else if !is_ten_digit_phone(draft.phone_number.trim()) {
        errors.insert(
            "phone_number".to_string(),
            "Phone number must be exactly 10 digits".to_string(),
        );
    }

    if !draft.same_as_phone && draft.whatsapp_number.trim().is_empty() {
        errors.insert(
            "whatsapp_number".to_string(),
            "WhatsApp number is required".to_string(),
        );
    }

    let map_location = draft.map_location.trim();
    if !map_location.is_empty() && !is_http_url(map_location) {
        errors.insert(
            "map_location".to_string(),
            "Map location must be a valid http(s) link".to_string(),
        );
    }

    errors
}

/// Step 2: at least one sharing category offered, and every offered category
/// must carry a usable rent.
pub fn validate_sharing(draft: &ListingDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.enabled_sharing().next().is_none() {
        errors.insert(
            "sharing".to_string(),
            "Enable at least one sharing type".to_string(),
        );
        return errors;
    }

    for (kind, entry) in draft.enabled_sharing() {
        let rent = entry.rent.trim();
        let valid = rent.parse::<u64>().map(|value| value > 0).unwrap_or(false);
        if !valid {
            errors.insert(
                format!("rent_{}", kind.key()),
                format!("Enter a rent for {}", kind.label().to_lowercase()),
            );
        }
    }

    errors
}

/// Step 4: pricing policy and media.
pub fn validate_pricing_media(draft: &ListingDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let deposit = draft.security_deposit.trim();
    if deposit.is_empty() {
        errors.insert(
            "security_deposit".to_string(),
            "Security deposit is required".to_string(),
        );
    } else if deposit.parse::<u64>().is_err() {
        errors.insert(
            "security_deposit".to_string(),
            "Security deposit must be a number".to_string(),
        );
    }

    let notice = draft.notice_period.trim();
    if notice.is_empty() {
        errors.insert(
            "notice_period".to_string(),
            "Notice period is required".to_string(),
        );
    } else if notice.parse::<u32>().is_err() {
        errors.insert(
            "notice_period".to_string(),
            "Notice period must be a whole number of days".to_string(),
        );
    }

    if draft.images.is_empty() {
        errors.insert("images".to_string(), "Add at least one photo".to_string());
    }

    let youtube = draft.youtube_link.trim();
    if !youtube.is_empty() && !is_youtube_url(youtube) {
        errors.insert(
            "youtube_link".to_string(),
            "Enter a valid YouTube link".to_string(),
        );
    }

    errors
}

fn require(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

/// Exactly 10 ASCII digits, nothing else.
pub fn is_ten_digit_phone(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Absolute http(s) URL.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// http(s) URL on a known YouTube host.
pub fn is_youtube_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    matches!(
        url.host_str(),
        Some("youtube.com" | "www.youtube.com" | "m.youtube.com" | "youtu.be")
    )
}
