//! `reqwest` implementation of the backend traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::errors::{ApiError, ApiResult, FieldErrors};
use crate::backend::{
    ActivityReader, AuthApi, AuthSession, FavoriteWriter, HouseListQuery, HouseReader,
    LoginPayload, RegisterPayload,
};
use crate::domain::activity::ActivitiesPage;
use crate::domain::house::{House, HousesPage};
use crate::domain::types::{HostId, HouseId};

/// Longest snippet of a non-JSON body surfaced in an error message.
const ERROR_SNIPPET_LEN: usize = 200;

pub struct RestBackend {
    base_url: String,
    http: Client,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Decodes a backend response, mapping the three failure shapes:
    /// transport errors bubble up as [`ApiError::Transport`], JSON error
    /// bodies (non-2xx or `success: false`) become [`ApiError::Status`]
    /// with any per-field messages attached, and anything that is not
    /// JSON surfaces a truncated snippet.
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let is_json = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        if !is_json {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(ERROR_SNIPPET_LEN).collect();
            return Err(ApiError::Unexpected {
                status: status.as_u16(),
                snippet,
            });
        }

        let body: Value = response.json().await.map_err(ApiError::Transport)?;

        let explicit_failure = body.get("success").and_then(Value::as_bool) == Some(false);
        if !status.is_success() || explicit_failure {
            return Err(status_error(status, &body));
        }

        serde_json::from_value(body).map_err(|err| ApiError::Unexpected {
            status: status.as_u16(),
            snippet: err.to_string(),
        })
    }
}

fn status_error(status: StatusCode, body: &Value) -> ApiError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Error {status}", status = status.as_u16()));

    let errors = body
        .get("errors")
        .and_then(|errors| serde_json::from_value::<FieldErrors>(errors.clone()).ok());

    ApiError::Status {
        status: status.as_u16(),
        message,
        errors,
    }
}

/// `{success, message}` body of the favorite endpoints.
#[derive(serde::Deserialize)]
struct FavoriteResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl HouseReader for RestBackend {
    async fn list_houses(
        &self,
        query: &HouseListQuery,
        token: Option<&str>,
    ) -> ApiResult<HousesPage> {
        let response = self
            .request(Method::GET, "/traveller/houses", token)
            .query(&query.to_pairs())
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_house(&self, id: HouseId, token: Option<&str>) -> ApiResult<Option<House>> {
        let response = self
            .request(Method::GET, &format!("/traveller/houses/{id}"), token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        // Some endpoints wrap the record in a `data` envelope.
        let body: Value = Self::decode(response).await?;
        let record = body.get("data").cloned().unwrap_or(body);
        let house = serde_json::from_value(record).map_err(|err| ApiError::Unexpected {
            status: 200,
            snippet: err.to_string(),
        })?;
        Ok(Some(house))
    }
}

#[async_trait]
impl ActivityReader for RestBackend {
    async fn list_host_activities(
        &self,
        host_id: HostId,
        token: Option<&str>,
    ) -> ApiResult<ActivitiesPage> {
        let response = self
            .request(
                Method::GET,
                &format!("/traveller/activities/user/{host_id}"),
                token,
            )
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl FavoriteWriter for RestBackend {
    async fn set_favorite(&self, id: HouseId, favorite: bool, token: &str) -> ApiResult<()> {
        let action = if favorite { "favorite" } else { "unfavorite" };
        let response = self
            .request(
                Method::POST,
                &format!("/traveller/houses/{id}/{action}"),
                Some(token),
            )
            .send()
            .await?;

        let outcome: FavoriteResponse = Self::decode(response).await?;
        if outcome.success {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: 200,
                message: outcome
                    .message
                    .unwrap_or_else(|| "Favorite update rejected".to_string()),
                errors: None,
            })
        }
    }
}

#[async_trait]
impl AuthApi for RestBackend {
    async fn login(&self, credentials: &LoginPayload) -> ApiResult<AuthSession> {
        let response = self
            .request(Method::POST, "/login", None)
            .json(credentials)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, registration: &RegisterPayload) -> ApiResult<AuthSession> {
        let response = self
            .request(Method::POST, registration.role.register_endpoint(), None)
            .json(registration)
            .send()
            .await?;
        Self::decode(response).await
    }
}
