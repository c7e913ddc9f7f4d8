//! Login and registration against the backend's auth endpoints.

use validator::Validate;

use crate::backend::AuthApi;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::services::{ServiceError, ServiceResult};

/// Validates credentials and exchanges them for the backend's opaque
/// bearer token.
pub async fn login<A>(api: &A, form: LoginForm) -> ServiceResult<String>
where
    A: AuthApi + ?Sized,
{
    if let Err(err) = form.validate() {
        log::debug!("Login form rejected: {err}");
        return Err(ServiceError::Form(
            "Please enter a valid email and password.".to_string(),
        ));
    }

    let session = api
        .login(&form.into_payload())
        .await
        .map_err(ServiceError::from_api)?;

    session.token.filter(|token| !token.is_empty()).ok_or_else(|| {
        ServiceError::Form("Login succeeded but no session token was issued.".to_string())
    })
}

/// Validates the registration form and creates the account. The visitor
/// still logs in afterwards; registration issues no token.
pub async fn register<A>(api: &A, form: RegisterForm) -> ServiceResult<()>
where
    A: AuthApi + ?Sized,
{
    if let Err(err) = form.validate() {
        log::debug!("Registration form rejected: {err}");
        return Err(ServiceError::Validation {
            message: "Please fix the highlighted fields.".to_string(),
            errors: form_field_errors(&err),
        });
    }

    api.register(&form.into_payload())
        .await
        .map_err(ServiceError::from_api)?;

    Ok(())
}

fn form_field_errors(errors: &validator::ValidationErrors) -> crate::backend::FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, messages)| {
            (
                field.to_string(),
                messages
                    .iter()
                    .map(|m| {
                        m.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for {field}."))
                    })
                    .collect(),
            )
        })
        .collect()
}
