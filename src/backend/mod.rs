//! Remote backend access.
//!
//! The backend owns availability, pricing authority, persistence, and
//! payment; this crate only calls it over HTTP. Services depend on the
//! traits here, not on [`client::RestBackend`], so tests can substitute
//! [`stub::StubBackend`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::errors::ApiResult;
use crate::domain::activity::ActivitiesPage;
use crate::domain::house::{House, HousesPage};
use crate::domain::types::{HostId, HouseId};
use crate::filters::FilterState;

pub mod client;
pub mod errors;
pub mod stub;

pub use client::RestBackend;
pub use errors::{ApiError, FieldErrors};

/// Search parameters for the house collection endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HouseListQuery {
    pub city: Option<String>,
    pub country: Option<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub guests: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub property_types: Vec<String>,
}

impl HouseListQuery {
    /// Maps the listings-page filter state onto the backend's parameters.
    /// Free-text search is forwarded as `city`; the explicit city field
    /// only goes out when no search text shadows it.
    pub fn from_filters(filters: &FilterState) -> Self {
        let search = filters.search.trim();
        Self {
            city: if !search.is_empty() {
                Some(search.to_string())
            } else if !filters.city.is_empty() {
                Some(filters.city.clone())
            } else {
                None
            },
            country: (!filters.country.is_empty()).then(|| filters.country.clone()),
            min_price: filters.min_price,
            max_price: filters.max_price,
            guests: (filters.guests > 1).then_some(filters.guests),
            bedrooms: (filters.bedrooms > 1).then_some(filters.bedrooms),
            bathrooms: (filters.bathrooms > 1).then_some(filters.bathrooms),
            start_date: filters.start_date.map(crate::filters::dates::format_iso_date),
            end_date: filters.end_date.map(crate::filters::dates::format_iso_date),
            page: (filters.page > 1).then_some(filters.page),
            property_types: filters.property_types.clone(),
        }
    }

    /// Wire pairs in the order the backend documents them; property types
    /// use the `property_type[]` array convention.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let mut push = |key: &str, value: String| pairs.push((key.to_string(), value));

        if let Some(city) = &self.city {
            push("city", city.clone());
        }
        if let Some(country) = &self.country {
            push("country", country.clone());
        }
        if let Some(min_price) = self.min_price {
            push("min_price", min_price.to_string());
        }
        if let Some(max_price) = self.max_price {
            push("max_price", max_price.to_string());
        }
        if let Some(guests) = self.guests {
            push("guests", guests.to_string());
        }
        if let Some(bedrooms) = self.bedrooms {
            push("bedrooms", bedrooms.to_string());
        }
        if let Some(bathrooms) = self.bathrooms {
            push("bathrooms", bathrooms.to_string());
        }
        if let Some(start_date) = &self.start_date {
            push("start_date", start_date.clone());
        }
        if let Some(end_date) = &self.end_date {
            push("end_date", end_date.clone());
        }
        if let Some(page) = self.page {
            push("page", page.to_string());
        }
        for property_type in &self.property_types {
            push("property_type[]", property_type.clone());
        }

        pairs
    }
}

/// Credentials for `POST /login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Account flavor chosen at registration; selects the endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Host,
    Traveller,
}

impl AccountRole {
    pub fn register_endpoint(self) -> &'static str {
        match self {
            AccountRole::Host => "/register-host",
            AccountRole::Traveller => "/register-traveller",
        }
    }
}

/// Body for the registration endpoints; the role never goes on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(skip)]
    pub role: AccountRole,
}

/// Successful auth response: an opaque bearer token (login) and/or the
/// created user record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthSession {
    pub token: Option<String>,
    pub user: Option<serde_json::Value>,
}

#[async_trait]
pub trait HouseReader: Send + Sync {
    async fn list_houses(
        &self,
        query: &HouseListQuery,
        token: Option<&str>,
    ) -> ApiResult<HousesPage>;

    /// `None` when the listing does not exist.
    async fn get_house(&self, id: HouseId, token: Option<&str>) -> ApiResult<Option<House>>;
}

#[async_trait]
pub trait ActivityReader: Send + Sync {
    async fn list_host_activities(
        &self,
        host_id: HostId,
        token: Option<&str>,
    ) -> ApiResult<ActivitiesPage>;
}

#[async_trait]
pub trait FavoriteWriter: Send + Sync {
    async fn set_favorite(&self, id: HouseId, favorite: bool, token: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginPayload) -> ApiResult<AuthSession>;
    async fn register(&self, registration: &RegisterPayload) -> ApiResult<AuthSession>;
}

/// Everything the handlers need from the backend, as one shareable
/// trait object.
pub trait BackendApi: HouseReader + ActivityReader + FavoriteWriter + AuthApi {}

impl<T> BackendApi for T where T: HouseReader + ActivityReader + FavoriteWriter + AuthApi {}
