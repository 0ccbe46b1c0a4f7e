//! In-memory model of a not-yet-submitted PG listing.
//!
//! The draft is the single source of truth while the wizard runs. It is only
//! ever mutated through [`ListingDraft::apply`], which merges a statically
//! typed partial patch: fields a patch does not set are left untouched, so
//! updating one section of the wizard can never clobber another.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Listing audience category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ladies,
    Gents,
    Coliving,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ladies, Category::Gents, Category::Coliving];

    /// Wire value used by the backend.
    pub fn wire(&self) -> &'static str {
        match self {
            Category::Ladies => "ladies",
            Category::Gents => "gents",
            Category::Coliving => "coliving",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Ladies => "Ladies",
            Category::Gents => "Gents",
            Category::Coliving => "Co-living",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who the listing is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredFor {
    Students,
    Professionals,
    Anyone,
}

impl PreferredFor {
    pub const ALL: [PreferredFor; 3] = [
        PreferredFor::Students,
        PreferredFor::Professionals,
        PreferredFor::Anyone,
    ];

    pub fn wire(&self) -> &'static str {
        match self {
            PreferredFor::Students => "students",
            PreferredFor::Professionals => "professionals",
            PreferredFor::Anyone => "anyone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreferredFor::Students => "Students",
            PreferredFor::Professionals => "Professionals",
            PreferredFor::Anyone => "Anyone",
        }
    }
}

impl fmt::Display for PreferredFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five room-sharing categories a PG can offer.
///
/// The word forms (`single`, `double`, ...) are the canonical keys end to end:
/// the wizard steps, the draft, and the submission body all use them, so no
/// key remapping happens at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingKind {
    Single,
    Double,
    Triple,
    Four,
    FivePlus,
}

impl SharingKind {
    pub const ALL: [SharingKind; 5] = [
        SharingKind::Single,
        SharingKind::Double,
        SharingKind::Triple,
        SharingKind::Four,
        SharingKind::FivePlus,
    ];

    /// Canonical key, shared between the wizard and the wire format.
    pub fn key(&self) -> &'static str {
        match self {
            SharingKind::Single => "single",
            SharingKind::Double => "double",
            SharingKind::Triple => "triple",
            SharingKind::Four => "four",
            SharingKind::FivePlus => "five_plus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SharingKind::Single => "Single sharing",
            SharingKind::Double => "Double sharing",
            SharingKind::Triple => "Triple sharing",
            SharingKind::Four => "Four sharing",
            SharingKind::FivePlus => "Five+ sharing",
        }
    }

    /// Parse a canonical key back into a kind.
    pub fn from_key(key: &str) -> Option<SharingKind> {
        SharingKind::ALL.iter().copied().find(|k| k.key() == key)
    }
}

/// Per-sharing-kind offer: whether the category is available and at what rent.
///
/// A rent value is only meaningful while `enabled` is true; disabling a row
/// keeps the typed rent around so re-enabling does not lose input, but the
/// validator and the submission mapper ignore rents of disabled rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharingEntry {
    pub enabled: bool,
    pub rent: String,
}

/// One image attached to the listing.
///
/// Create mode only ever holds `Pending` paths; edit mode hydrates the
/// already-uploaded images as `Persisted` references and new attachments are
/// appended as `Pending`. The tag decides whether the submission mapper emits
/// a file part or keeps the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEntry {
    /// Local file waiting to be uploaded.
    Pending(PathBuf),
    /// Reference to an image the backend already stores.
    Persisted(String),
}

impl ImageEntry {
    pub fn is_pending(&self) -> bool {
        matches!(self, ImageEntry::Pending(_))
    }

    /// Short name for display in the wizard.
    pub fn display_name(&self) -> String {
        match self {
            ImageEntry::Pending(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageEntry::Persisted(url) => {
                url.rsplit('/').next().unwrap_or(url.as_str()).to_string()
            }
        }
    }
}

/// Amenity catalog offered by the wizard. Identifiers are what the backend
/// stores; labels are display only.
pub const AMENITY_CATALOG: &[(&str, &str)] = &[
    ("wifi", "Wi-Fi"),
    ("food", "Food / mess"),
    ("laundry", "Laundry"),
    ("parking", "Parking"),
    ("ac", "Air conditioning"),
    ("power_backup", "Power backup"),
    ("cctv", "CCTV security"),
    ("housekeeping", "Housekeeping"),
    ("hot_water", "Hot water"),
    ("fridge", "Refrigerator"),
    ("tv", "TV lounge"),
    ("attached_bathroom", "Attached bathroom"),
];

/// Look up the display label for an amenity id.
pub fn amenity_label(id: &str) -> &str {
    AMENITY_CATALOG
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
        .unwrap_or(id)
}

/// The mutable aggregate the wizard builds up step by step.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    // Basic info
    pub pg_name: String,
    pub address: String,
    pub city: String,
    pub area: String,
    pub category: Option<Category>,
    pub preferred_for: Option<PreferredFor>,
    pub phone_number: String,
    pub whatsapp_number: String,
    pub same_as_phone: bool,
    pub map_location: String,

    // Sharing & rent - always carries all five kinds
    pub sharing: BTreeMap<SharingKind, SharingEntry>,

    // Amenities & surroundings (both optional)
    pub amenities: BTreeSet<String>,
    pub nearby_places: Vec<String>,

    // Pricing policy
    pub security_deposit: String,
    pub notice_period: String,
    pub refundable_on_exit: bool,

    // Media
    pub images: Vec<ImageEntry>,
    pub youtube_link: String,
}

impl Default for ListingDraft {
    fn default() -> Self {
        let sharing = SharingKind::ALL
            .iter()
            .map(|kind| (*kind, SharingEntry::default()))
            .collect();
        Self {
            pg_name: String::new(),
            address: String::new(),
            city: String::new(),
            area: String::new(),
            category: None,
            preferred_for: None,
            phone_number: String::new(),
            whatsapp_number: String::new(),
            same_as_phone: true,
            map_location: String::new(),
            sharing,
            amenities: BTreeSet::new(),
            nearby_places: Vec::new(),
            security_deposit: String::new(),
            notice_period: String::new(),
            refundable_on_exit: false,
            images: Vec::new(),
            youtube_link: String::new(),
        }
    }
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial patch into the draft.
    ///
    /// Only fields the patch sets are written; everything else keeps its
    /// current value. Nearby places are deduplicated on assignment, preserving
    /// first-seen order.
    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(value) = patch.pg_name {
            self.pg_name = value;
        }
        if let Some(value) = patch.address {
            self.address = value;
        }
        if let Some(value) = patch.city {
            self.city = value;
        }
        if let Some(value) = patch.area {
            self.area = value;
        }
        if let Some(value) = patch.category {
            self.category = Some(value);
        }
        if let Some(value) = patch.preferred_for {
            self.preferred_for = Some(value);
        }
        if let Some(value) = patch.phone_number {
            self.phone_number = value;
        }
        if let Some(value) = patch.whatsapp_number {
            self.whatsapp_number = value;
        }
        if let Some(value) = patch.same_as_phone {
            self.same_as_phone = value;
        }
        if let Some(value) = patch.map_location {
            self.map_location = value;
        }
        if let Some(value) = patch.sharing {
            self.sharing = value;
        }
        if let Some(value) = patch.amenities {
            self.amenities = value;
        }
        if let Some(value) = patch.nearby_places {
            self.nearby_places = dedup_preserving_order(value);
        }
        if let Some(value) = patch.security_deposit {
            self.security_deposit = value;
        }
        if let Some(value) = patch.notice_period {
            self.notice_period = value;
        }
        if let Some(value) = patch.refundable_on_exit {
            self.refundable_on_exit = value;
        }
        if let Some(value) = patch.images {
            self.images = value;
        }
        if let Some(value) = patch.youtube_link {
            self.youtube_link = value;
        }
    }

    /// WhatsApp number that should actually be published: mirrors the phone
    /// number while `same_as_phone` is set.
    pub fn effective_whatsapp(&self) -> &str {
        if self.same_as_phone {
            &self.phone_number
        } else {
            &self.whatsapp_number
        }
    }

    /// Sharing rows that are currently offered.
    pub fn enabled_sharing(&self) -> impl Iterator<Item = (SharingKind, &SharingEntry)> {
        self.sharing
            .iter()
            .filter(|(_, entry)| entry.enabled)
            .map(|(kind, entry)| (*kind, entry))
    }

    pub fn pending_images(&self) -> impl Iterator<Item = &PathBuf> {
        self.images.iter().filter_map(|entry| match entry {
            ImageEntry::Pending(path) => Some(path),
            ImageEntry::Persisted(_) => None,
        })
    }

    pub fn persisted_images(&self) -> impl Iterator<Item = &str> {
        self.images.iter().filter_map(|entry| match entry {
            ImageEntry::Persisted(url) => Some(url.as_str()),
            ImageEntry::Pending(_) => None,
        })
    }
}

/// Statically typed partial update for [`ListingDraft`].
///
/// Each wizard step builds one of these for the fields it owns and hands it to
/// the controller; unset fields are never touched by the merge.
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub pg_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub category: Option<Category>,
    pub preferred_for: Option<PreferredFor>,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub same_as_phone: Option<bool>,
    pub map_location: Option<String>,
    pub sharing: Option<BTreeMap<SharingKind, SharingEntry>>,
    pub amenities: Option<BTreeSet<String>>,
    pub nearby_places: Option<Vec<String>>,
    pub security_deposit: Option<String>,
    pub notice_period: Option<String>,
    pub refundable_on_exit: Option<bool>,
    pub images: Option<Vec<ImageEntry>>,
    pub youtube_link: Option<String>,
}

fn dedup_preserving_order(places: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    places
        .into_iter()
        .filter(|place| seen.insert(place.trim().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_carries_all_sharing_kinds() {
        let draft = ListingDraft::new();
        assert_eq!(draft.sharing.len(), 5);
        assert!(draft.sharing.values().all(|entry| !entry.enabled));
    }

    #[test]
    fn nearby_places_deduplicate_case_insensitively() {
        let mut draft = ListingDraft::new();
        draft.apply(DraftPatch {
            nearby_places: Some(vec![
                "Metro Station".to_string(),
                "metro station".to_string(),
                "City Mall".to_string(),
            ]),
            ..Default::default()
        });
        assert_eq!(draft.nearby_places, vec!["Metro Station", "City Mall"]);
    }

    #[test]
    fn effective_whatsapp_mirrors_phone_when_flagged() {
        let mut draft = ListingDraft::new();
        draft.apply(DraftPatch {
            phone_number: Some("9876543210".to_string()),
            whatsapp_number: Some("1112223334".to_string()),
            same_as_phone: Some(true),
            ..Default::default()
        });
        assert_eq!(draft.effective_whatsapp(), "9876543210");

        draft.apply(DraftPatch {
            same_as_phone: Some(false),
            ..Default::default()
        });
        assert_eq!(draft.effective_whatsapp(), "1112223334");
    }

    #[test]
    fn image_entry_display_names() {
        let pending = ImageEntry::Pending(PathBuf::from("/tmp/photos/front.jpg"));
        assert_eq!(pending.display_name(), "front.jpg");

        let persisted = ImageEntry::Persisted("https://cdn.example.com/pg/42/room.png".to_string());
        assert_eq!(persisted.display_name(), "room.png");
    }

    #[test]
    fn sharing_kind_keys_round_trip() {
        for kind in SharingKind::ALL {
            assert_eq!(SharingKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(SharingKind::from_key("2"), None);
    }
}
