//! Error taxonomy for the listings backend.
//!
//! Every remote failure is caught at the gateway boundary, classified into one
//! [`ApiError`] variant and handed upward as a single discriminated value. The
//! caller decides whether the class is terminal for the current screen
//! (redirect away) or recoverable (display inline and let the user resubmit).

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Structured validation body the backend sends on 422 rejections.
#[derive(Debug, Deserialize)]
struct ValidationBody {
    errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Session is missing, expired, or not an owner account. Terminal: the
    /// user has to sign in before managing listings.
    #[error("you need to sign in with an owner account to manage listings")]
    Unauthorized,

    /// The listing id resolved through neither the primary nor the fallback
    /// fetch path. Terminal: fall back to the listings overview.
    #[error("listing not found")]
    NotFound,

    /// Backend rejected the submission with per-field messages. Recoverable:
    /// edit the flagged fields and resubmit.
    #[error("the server rejected the listing: {}", format_field_errors(errors))]
    Validation {
        errors: BTreeMap<String, Vec<String>>,
    },

    /// Non-2xx response without a structured body. Recoverable by resubmitting.
    #[error("request failed with HTTP {status}, please try again")]
    Http { status: u16 },

    /// The request hit the explicit 30s deadline.
    #[error("the request timed out, please try again")]
    TimedOut,

    /// Network-level failure with no response at all.
    #[error("could not reach the server: {0}")]
    Transport(String),
}

impl ApiError {
    /// Recoverable errors keep the user in the wizard; terminal ones redirect
    /// away from it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ApiError::Validation { .. }
                | ApiError::Http { .. }
                | ApiError::TimedOut
                | ApiError::Transport(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::TimedOut
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Classify a non-2xx response into an [`ApiError`].
///
/// 401/403 and 404 map to their terminal classes; anything else first tries
/// the structured `{ errors: { field: [messages] } }` shape and falls back to
/// a generic HTTP failure.
pub fn classify_response(status: u16, body: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound,
        _ => match serde_json::from_str::<ValidationBody>(body) {
            Ok(parsed) if !parsed.errors.is_empty() => ApiError::Validation {
                errors: parsed.errors,
            },
            _ => ApiError::Http { status },
        },
    }
}

/// Consolidate per-field messages into one line without losing field detail:
/// `city: City is required; phone_number: Phone number is invalid`.
fn format_field_errors(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses() {
        assert!(matches!(classify_response(401, ""), ApiError::Unauthorized));
        assert!(matches!(
            classify_response(403, "{}"),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn not_found_status() {
        assert!(matches!(classify_response(404, ""), ApiError::NotFound));
    }

    #[test]
    fn structured_validation_body() {
        let body =
            r#"{"errors":{"city":["City is required"],"phone_number":["Must be 10 digits"]}}"#;
        let err = classify_response(422, body);
        let message = err.to_string();
        assert!(message.contains("city: City is required"));
        assert!(message.contains("phone_number: Must be 10 digits"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn unstructured_body_falls_back_to_http() {
        let err = classify_response(500, "<html>Internal Server Error</html>");
        assert!(matches!(err, ApiError::Http { status: 500 }));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn empty_errors_object_is_not_validation() {
        let err = classify_response(422, r#"{"errors":{}}"#);
        assert!(matches!(err, ApiError::Http { status: 422 }));
    }

    #[test]
    fn terminal_classes_are_not_recoverable() {
        assert!(!ApiError::Unauthorized.is_recoverable());
        assert!(!ApiError::NotFound.is_recoverable());
        assert!(ApiError::TimedOut.is_recoverable());
        assert!(ApiError::Transport("connection refused".to_string()).is_recoverable());
    }
}
