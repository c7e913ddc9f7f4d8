//! Business logic between the routes and the backend traits.

use thiserror::Error;

use crate::backend::errors::{ApiError, FieldErrors};

pub mod auth;
pub mod house;
pub mod listings;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Whole-form problem surfaced as a flash message.
    #[error("{0}")]
    Form(String),

    /// Backend validation failure mapped field-by-field onto a form.
    #[error("{message}")]
    Validation {
        message: String,
        errors: FieldErrors,
    },

    /// Backend call failed for reasons the visitor cannot fix.
    #[error("backend error: {0}")]
    Api(#[from] ApiError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Collapses a backend error, promoting field errors to `Validation`.
    pub fn from_api(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                message,
                errors: Some(errors),
                ..
            } => ServiceError::Validation { message, errors },
            other => ServiceError::Api(other),
        }
    }
}
