//! Remote listing gateway: records, submission mapping, and the HTTP client.

pub mod client;
pub mod error;
pub mod models;
pub mod submission;

pub use client::ListingClient;
pub use error::{classify_response, ApiError};
pub use models::{ApiEnvelope, ListingRecord, SharingTypeRecord};
pub use submission::{to_submission, SubmissionBody};
