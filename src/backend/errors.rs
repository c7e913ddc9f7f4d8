use std::collections::HashMap;

use thiserror::Error;

/// Per-field validation messages in the backend's error body.
pub type FieldErrors = HashMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/transport failure before any response arrived.
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx (or `success: false`) response with a JSON error body.
    #[error("backend error ({status}): {message}")]
    Status {
        status: u16,
        message: String,
        errors: Option<FieldErrors>,
    },

    /// Response body that was not the JSON we expected; the snippet is
    /// truncated raw text for the generic error message.
    #[error("unexpected backend response ({status}): {snippet}")]
    Unexpected { status: u16, snippet: String },
}

impl ApiError {
    /// Field errors when the backend reported validation failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Status { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
