//! Thin route guards around the backend's opaque bearer token.
//!
//! Authentication itself is the backend's business; this app only parks
//! the token in the cookie session and gates a handful of pages on its
//! presence.

use std::fmt;
use std::future::{Ready, ready};

use actix_session::SessionExt;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};

/// Session key holding the backend token.
pub const TOKEN_SESSION_KEY: &str = "token";

/// Extractor for pages that require a logged-in visitor; missing token
/// redirects to the login page.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub token: String,
}

/// Extractor for public pages that merely pass the token along when
/// present.
#[derive(Clone, Debug, Default)]
pub struct MaybeUser {
    pub token: Option<String>,
}

impl MaybeUser {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug)]
pub struct NotAuthenticated;

impl fmt::Display for NotAuthenticated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not authenticated")
    }
}

impl ResponseError for NotAuthenticated {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/login"))
            .finish()
    }
}

fn session_token(req: &HttpRequest) -> Option<String> {
    req.get_session()
        .get::<String>(TOKEN_SESSION_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

impl FromRequest for CurrentUser {
    type Error = NotAuthenticated;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(match session_token(req) {
            Some(token) => Ok(CurrentUser { token }),
            None => Err(NotAuthenticated),
        })
    }
}

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser {
            token: session_token(req),
        }))
    }
}
