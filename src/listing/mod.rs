//! Listing domain: the in-progress draft and its per-step validators.

pub mod draft;
pub mod validate;

pub use draft::{
    amenity_label, Category, DraftPatch, ImageEntry, ListingDraft, PreferredFor, SharingEntry,
    SharingKind, AMENITY_CATALOG,
};
pub use validate::{validate_step, ValidationErrors};
