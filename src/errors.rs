//! Typed error hierarchy for the tracker client.
//!
//! Three enums cover the three failure domains:
//! - `ApiError` — transport, status, and decode failures from the backend
//! - `SessionError` — missing, expired, or unreadable local session state
//! - `DraftError` — payload assembly attempted on an incomplete draft
//!
//! The command layer collapses all of these into a single printed message;
//! the typed variants exist so library code can match on causes.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the HTTP API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend rejected the request with an `{error}` body.
    #[error("{0}")]
    Rejected(String),
}

/// Errors from the local session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in. Run `teamctl login` first.")]
    NotLoggedIn,

    #[error("Session expired. Run `teamctl login` again.")]
    Expired,

    #[error("Failed to access session file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Errors from assembling a payload out of an incomplete draft.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_status_carries_code_and_message() {
        let err = ApiError::Status {
            status: 404,
            message: "not found".to_string(),
        };
        match &err {
            ApiError::Status { status, message } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "not found");
            }
            _ => panic!("Expected Status variant"),
        }
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn api_error_rejected_displays_backend_message_verbatim() {
        let err = ApiError::Rejected("email already registered".to_string());
        assert_eq!(err.to_string(), "email already registered");
    }

    #[test]
    fn session_error_not_logged_in_mentions_login() {
        let err = SessionError::NotLoggedIn;
        assert!(err.to_string().contains("teamctl login"));
    }

    #[test]
    fn session_error_io_carries_path() {
        let err = SessionError::Io {
            path: PathBuf::from("/home/u/.teamctl/session.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        match &err {
            SessionError::Io { path, source } => {
                assert!(path.ends_with("session.json"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn draft_error_names_the_field() {
        let err = DraftError::MissingField("title");
        assert_eq!(err.to_string(), "Missing required field: title");
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&ApiError::Rejected("x".into()));
        assert_std_error(&SessionError::NotLoggedIn);
        assert_std_error(&DraftError::MissingField("name"));
    }
}
