//! Remote listing gateway.
//!
//! One blocking HTTP request per user action, no retries: the user resubmits
//! explicitly after a failure. Every response is classified into an
//! [`ApiError`] at this boundary; nothing above it sees raw transport errors.

use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::session::Session;

use super::error::{classify_response, ApiError};
use super::models::{ApiEnvelope, ListingRecord};
use super::submission::SubmissionBody;

/// Hard deadline for both hydration fetches and submissions.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ListingClient {
    base_url: String,
    http: Client,
    session: Session,
}

impl ListingClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    /// `GET /listings/{id}?user_id={uid}`
    pub fn fetch_one(&self, id: u64, user_id: u64) -> Result<ListingRecord, ApiError> {
        let url = format!("{}/listings/{}", self.base_url, id);
        let response = self
            .authorize(self.http.get(url).query(&[("user_id", user_id)]))
            .send()?;
        read_enveloped(response)
    }

    /// `GET /user-listings?user_id={uid}`
    pub fn fetch_mine(&self, user_id: u64) -> Result<Vec<ListingRecord>, ApiError> {
        let url = format!("{}/user-listings", self.base_url);
        let response = self
            .authorize(self.http.get(url).query(&[("user_id", user_id)]))
            .send()?;
        read_enveloped(response)
    }

    /// Single-record fetch with the overview as fallback: when the primary
    /// path fails for a reason other than authorization, scan the owner's
    /// listings for the id before giving up with `NotFound`.
    pub fn fetch_one_or_fallback(&self, id: u64, user_id: u64) -> Result<ListingRecord, ApiError> {
        resolve_fallback(self.fetch_one(id, user_id), id, || self.fetch_mine(user_id))
    }

    /// `POST /pg-listings` (multipart)
    pub fn create(&self, body: &SubmissionBody) -> Result<ListingRecord, ApiError> {
        let url = format!("{}/pg-listings", self.base_url);
        let form = build_form(body)?;
        // No explicit content-type: the transport sets the multipart boundary.
        let response = self.authorize(self.http.post(url)).multipart(form).send()?;
        read_record(response)
    }

    /// `PUT /listings/{id}?user_id={uid}` (multipart)
    pub fn update(
        &self,
        id: u64,
        user_id: u64,
        body: &SubmissionBody,
    ) -> Result<ListingRecord, ApiError> {
        let url = format!("{}/listings/{}", self.base_url, id);
        let form = build_form(body)?;
        let response = self
            .authorize(self.http.put(url).query(&[("user_id", user_id)]))
            .multipart(form)
            .send()?;
        read_record(response)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Fallback selection for a single-record fetch.
///
/// A successful primary result wins outright and `Unauthorized` passes
/// through untouched; any other primary failure triggers the overview scan,
/// which resolves to the matching record or `NotFound`.
fn resolve_fallback<F>(
    primary: Result<ListingRecord, ApiError>,
    id: u64,
    fetch_mine: F,
) -> Result<ListingRecord, ApiError>
where
    F: FnOnce() -> Result<Vec<ListingRecord>, ApiError>,
{
    match primary {
        Ok(record) => Ok(record),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        Err(_) => fetch_mine()?
            .into_iter()
            .find(|record| record.id == Some(id))
            .ok_or(ApiError::NotFound),
    }
}

fn build_form(body: &SubmissionBody) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    for (name, path) in &body.files {
        form = form.file(name.clone(), path).map_err(|err| {
            ApiError::Transport(format!("could not read {}: {}", path.display(), err))
        })?;
    }
    Ok(form)
}

/// Read a `{ success, data }` envelope.
fn read_enveloped<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let text = response.text()?;
    if !(200..300).contains(&status) {
        return Err(classify_response(status, &text));
    }
    serde_json::from_str::<ApiEnvelope<T>>(&text)
        .map(|envelope| envelope.data)
        .map_err(|err| ApiError::Transport(format!("unexpected response body: {err}")))
}

/// Create/update responses may arrive enveloped or as the bare record.
fn read_record(response: Response) -> Result<ListingRecord, ApiError> {
    let status = response.status().as_u16();
    let text = response.text()?;
    if !(200..300).contains(&status) {
        return Err(classify_response(status, &text));
    }
    serde_json::from_str::<ApiEnvelope<ListingRecord>>(&text)
        .map(|envelope| envelope.data)
        .or_else(|_| serde_json::from_str::<ListingRecord>(&text))
        .map_err(|err| ApiError::Transport(format!("unexpected response body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> ListingRecord {
        serde_json::from_str(&format!(r#"{{"id": {id}, "pg_name": "Stay {id}"}}"#)).unwrap()
    }

    #[test]
    fn primary_success_skips_the_overview_scan() {
        let mut scanned = false;
        let result = resolve_fallback(Ok(record(5)), 5, || {
            scanned = true;
            Ok(vec![])
        });
        assert_eq!(result.unwrap().id, Some(5));
        assert!(!scanned);
    }

    #[test]
    fn unauthorized_passes_through_without_scanning() {
        let mut scanned = false;
        let result = resolve_fallback(Err(ApiError::Unauthorized), 5, || {
            scanned = true;
            Ok(vec![record(5)])
        });
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert!(!scanned);
    }

    #[test]
    fn other_primary_failures_scan_the_overview() {
        let result = resolve_fallback(Err(ApiError::Http { status: 500 }), 5, || {
            Ok(vec![record(4), record(5), record(6)])
        });
        assert_eq!(result.unwrap().id, Some(5));
    }

    #[test]
    fn id_absent_from_the_overview_is_not_found() {
        let result = resolve_fallback(Err(ApiError::TimedOut), 5, || Ok(vec![record(4)]));
        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[test]
    fn overview_failure_propagates() {
        let result = resolve_fallback(Err(ApiError::TimedOut), 5, || Err(ApiError::TimedOut));
        assert!(matches!(result, Err(ApiError::TimedOut)));
    }
}
