use serde::Deserialize;
use validator::Validate;

use crate::backend::{AccountRole, LoginPayload, RegisterPayload};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Enter your password."))]
    pub password: String,
}

impl LoginForm {
    pub fn into_payload(self) -> LoginPayload {
        LoginPayload {
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Enter your name."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub password_confirmation: String,
    /// `Host` or `Traveller`; anything else registers a traveller.
    #[serde(default)]
    pub role: String,
}

impl RegisterForm {
    pub fn account_role(&self) -> AccountRole {
        if self.role.eq_ignore_ascii_case("host") {
            AccountRole::Host
        } else {
            AccountRole::Traveller
        }
    }

    pub fn into_payload(self) -> RegisterPayload {
        let role = self.account_role();
        RegisterPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            password_confirmation: self.password_confirmation,
            role,
        }
    }
}
