use std::time::Duration;

use thiserror::Error;

use crate::models::JobStatus;

/// All errors that can occur when using the Sidearm SDK.
#[derive(Error, Debug)]
pub enum SidearmError {
    /// The client could not be configured (missing API key, unusable base URL).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The API answered with a non-2xx status.
    ///
    /// `message` is the body's `message` field, else its `error` field, else
    /// the raw response text. `body` holds the parsed JSON when there was any.
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// [`Job::wait`](crate::Job::wait) ran out of time before the job finished.
    #[error("job {job_id} did not complete within {timeout:?} (last status: {last_status})")]
    Timeout {
        job_id: String,
        timeout: Duration,
        last_status: JobStatus,
    },

    /// [`Job::wait`](crate::Job::wait) was cancelled through its token.
    #[error("wait for job {job_id} was cancelled")]
    Cancelled { job_id: String },

    /// A transport-level HTTP error from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API key cannot be sent as an HTTP header value.
    #[error("API key contains characters not allowed in a header")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl SidearmError {
    /// HTTP status of an [`Api`](Self::Api) error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// A convenience alias for `Result<T, SidearmError>`.
pub type Result<T> = std::result::Result<T, SidearmError>;
