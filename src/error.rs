//! Error types for the Soundslice client library.

use thiserror::Error;

/// The main error type for all Soundslice client operations.
#[derive(Error, Debug)]
pub enum SoundsliceError {
    /// The API answered 403: the credentials may not access this resource.
    #[error("Permission denied")]
    PermissionDenied,

    /// The API answered 422 and rejected the submitted data.
    ///
    /// `detail` holds the raw response body exactly as received.
    #[error("Validation error: {}", String::from_utf8_lossy(.detail))]
    Validation {
        /// Raw response body
        detail: Vec<u8>,
    },

    /// The API answered 429. No retry is attempted by the client.
    #[error("Rate limited by the Soundslice API")]
    RateLimited,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Reading local media failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built from the given arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The pre-signed upload target rejected the transferred bytes
    #[error("Upload failed with HTTP {status}: {body}")]
    UploadFailed {
        /// Status returned by the upload target
        status: u16,
        /// Response body returned by the upload target
        body: String,
    },

    /// A recording record was created but transferring its media failed.
    ///
    /// The record stays on the server without media; `recording_id` lets the
    /// caller delete it or retry the transfer.
    #[error("Recording {recording_id} created but its media upload failed: {source}")]
    UploadIncomplete {
        /// Id of the recording record left without media
        recording_id: u64,
        /// Error from the failed media step
        #[source]
        source: Box<SoundsliceError>,
    },

    /// Missing required credentials
    #[error("Missing credentials: application id and password required")]
    MissingCredentials,
}

impl SoundsliceError {
    /// Validation detail decoded as UTF-8, if this is a validation error.
    pub fn validation_detail(&self) -> Option<String> {
        match self {
            SoundsliceError::Validation { detail } => {
                Some(String::from_utf8_lossy(detail).into_owned())
            }
            _ => None,
        }
    }

    /// Id of a recording record left behind by a failed media upload.
    pub fn orphaned_recording_id(&self) -> Option<u64> {
        match self {
            SoundsliceError::UploadIncomplete { recording_id, .. } => Some(*recording_id),
            _ => None,
        }
    }

    /// Check if this error is one of the statuses the API reports explicitly.
    pub fn is_api_status(&self) -> bool {
        matches!(
            self,
            SoundsliceError::PermissionDenied
                | SoundsliceError::Validation { .. }
                | SoundsliceError::RateLimited
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_includes_body() {
        let error = SoundsliceError::Validation {
            detail: br#"{"name":["This field is required."]}"#.to_vec(),
        };
        assert_eq!(
            error.to_string(),
            r#"Validation error: {"name":["This field is required."]}"#
        );
        assert_eq!(
            error.validation_detail().as_deref(),
            Some(r#"{"name":["This field is required."]}"#)
        );
    }

    #[test]
    fn test_api_status_classification() {
        assert!(SoundsliceError::PermissionDenied.is_api_status());
        assert!(SoundsliceError::RateLimited.is_api_status());
        assert!(!SoundsliceError::MissingCredentials.is_api_status());
        assert!(SoundsliceError::RateLimited.validation_detail().is_none());
    }

    #[test]
    fn test_upload_incomplete_keeps_recording_id_and_cause() {
        let error = SoundsliceError::UploadIncomplete {
            recording_id: 42,
            source: Box::new(SoundsliceError::RateLimited),
        };
        assert_eq!(error.orphaned_recording_id(), Some(42));
        assert!(!error.is_api_status());
        assert_eq!(
            error.to_string(),
            "Recording 42 created but its media upload failed: Rate limited by the Soundslice API"
        );
        let cause = std::error::Error::source(&error).map(|e| e.to_string());
        assert_eq!(cause.as_deref(), Some("Rate limited by the Soundslice API"));
        assert_eq!(SoundsliceError::MissingCredentials.orphaned_recording_id(), None);
    }
}
