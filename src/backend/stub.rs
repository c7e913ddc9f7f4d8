//! Canned backend used by service and route tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::errors::{ApiError, ApiResult};
use crate::backend::{
    ActivityReader, AuthApi, AuthSession, FavoriteWriter, HouseListQuery, HouseReader,
    LoginPayload, RegisterPayload,
};
use crate::domain::activity::{ActivitiesPage, Activity};
use crate::domain::house::{House, HousesPage};
use crate::domain::types::{HostId, HouseId};

/// Sample listing with the given id, hosted by user 1.
pub fn sample_house(id: i64) -> House {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("House #{id}"),
        "description": "A sample listing",
        "country": "Portugal",
        "city": "Lisbon",
        "address": format!("{id} Sample Street"),
        "price_per_night": "50.00",
        "property_type": "apartment",
        "guests": 4,
        "bedrooms": 2,
        "beds": 3,
        "bathrooms": 1,
        "created_by": { "id": 1, "name": "Ana Host" },
        "images": [
            { "id": id * 10 + 2, "path": "houses/b.jpg", "order": 2 },
            { "id": id * 10 + 1, "path": "houses/a.jpg", "order": 1 }
        ]
    }))
    .expect("sample house payload")
}

/// Sample activity with the given id and decimal price string.
pub fn sample_activity(id: i64, payment_amount: &str) -> Activity {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "user_id": 1,
        "title": format!("Activity #{id}"),
        "description": "A sample activity",
        "start_time": "10:00",
        "end_time": "12:00",
        "location": "Old Town",
        "payment_amount": payment_amount,
        "is_active": true,
        "images": [
            { "id": id * 10, "image_url": "activities/a.jpg" }
        ]
    }))
    .expect("sample activity payload")
}

/// In-memory backend with canned data and per-endpoint failure switches.
#[derive(Default)]
pub struct StubBackend {
    pub houses: Vec<House>,
    pub activities: Vec<Activity>,
    pub fail_listing: bool,
    pub fail_favorite: bool,
    /// Token handed out on any successful login.
    pub token: Option<String>,
    /// Queries seen by `list_houses`, for assertions.
    pub seen_queries: Mutex<Vec<HouseListQuery>>,
}

impl StubBackend {
    pub fn with_houses(count: i64) -> Self {
        Self {
            houses: (1..=count).map(sample_house).collect(),
            token: Some("stub-token".to_string()),
            ..Self::default()
        }
    }

    fn unreachable_error() -> ApiError {
        ApiError::Unexpected {
            status: 503,
            snippet: "stub backend set to fail".to_string(),
        }
    }
}

#[async_trait]
impl HouseReader for StubBackend {
    async fn list_houses(
        &self,
        query: &HouseListQuery,
        _token: Option<&str>,
    ) -> ApiResult<HousesPage> {
        if self.fail_listing {
            return Err(Self::unreachable_error());
        }
        self.seen_queries
            .lock()
            .expect("stub lock poisoned")
            .push(query.clone());

        let per_page = 10;
        let page = query.page.unwrap_or(1) as usize;
        let total = self.houses.len();
        let data = self
            .houses
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Ok(HousesPage {
            data,
            current_page: page,
            last_page: total.div_ceil(per_page).max(1),
            per_page,
            total,
        })
    }

    async fn get_house(&self, id: HouseId, _token: Option<&str>) -> ApiResult<Option<House>> {
        Ok(self.houses.iter().find(|h| h.id == id).cloned())
    }
}

#[async_trait]
impl ActivityReader for StubBackend {
    async fn list_host_activities(
        &self,
        host_id: HostId,
        _token: Option<&str>,
    ) -> ApiResult<ActivitiesPage> {
        let data: Vec<Activity> = self
            .activities
            .iter()
            .filter(|a| a.host_id == host_id)
            .cloned()
            .collect();
        Ok(ActivitiesPage {
            total: data.len(),
            data,
            current_page: 1,
            last_page: 1,
        })
    }
}

#[async_trait]
impl FavoriteWriter for StubBackend {
    async fn set_favorite(&self, _id: HouseId, _favorite: bool, _token: &str) -> ApiResult<()> {
        if self.fail_favorite {
            return Err(ApiError::Status {
                status: 422,
                message: "Favorite update rejected".to_string(),
                errors: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for StubBackend {
    async fn login(&self, credentials: &LoginPayload) -> ApiResult<AuthSession> {
        if credentials.password == "wrong" {
            return Err(ApiError::Status {
                status: 422,
                message: "Validation failed".to_string(),
                errors: Some(
                    [(
                        "password".to_string(),
                        vec!["The provided credentials are incorrect.".to_string()],
                    )]
                    .into(),
                ),
            });
        }
        Ok(AuthSession {
            token: self.token.clone(),
            user: Some(serde_json::json!({ "email": credentials.email })),
        })
    }

    async fn register(&self, registration: &RegisterPayload) -> ApiResult<AuthSession> {
        Ok(AuthSession {
            token: None,
            user: Some(serde_json::json!({ "email": registration.email })),
        })
    }
}
