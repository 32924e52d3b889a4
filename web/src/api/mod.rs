//! Typed client for the lair REST service.
//!
//! Endpoints: `GET /lair` (viewport search), `GET /lair/{id}` (detail),
//! `POST /lair` / `DELETE /lair/{id}` (bearer-authenticated mutations) and
//! `POST /user` / `POST /user/login` (account handling).

use serde::de::DeserializeOwned;
use shared_types::domain::NewLair;
use shared_types::{AccountCredentials, Lair, MapBounds, SessionGrant};

pub mod error;
pub mod http;

pub use error::ApiError;
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Base URL of the lair service, taken from `LAIR_API_URL` at build time.
pub fn configured_base_url() -> String {
    option_env!("LAIR_API_URL")
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

pub struct LairApi<C> {
    base_url: String,
    http: C,
}

impl Default for LairApi<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new(configured_base_url(), ReqwestHttpClient::default())
    }
}

impl<C: HttpClient> LairApi<C> {
    pub fn new(base_url: impl Into<String>, http: C) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Query URL for the listings visible in `bounds`, optionally narrowed
    /// by a search term.
    pub fn search_url(&self, bounds: &MapBounds, search: &str) -> String {
        let tl = bounds.top_left();
        let br = bounds.bottom_right();
        let mut url = format!(
            "{}/lair?tl_lat={}&tl_lng={}&br_lat={}&br_lng={}",
            self.base_url, tl.lat, tl.long, br.lat, br.long
        );

        let search = search.trim();
        if !search.is_empty() {
            url.push_str("&search=");
            url.push_str(&urlencoding::encode(search));
        }
        url
    }

    pub async fn lairs_in_view(
        &self,
        bounds: &MapBounds,
        search: &str,
    ) -> Result<Vec<Lair>, ApiError> {
        let response = self.http.get(&self.search_url(bounds, search)).await?;
        decode(response)
    }

    pub async fn lair_detail(&self, id: i64) -> Result<Lair, ApiError> {
        let url = format!("{}/lair/{}", self.base_url, id);
        let response = self.http.get(&url).await?;
        decode(response)
    }

    /// Posts a validated listing. Requires a session token; a missing token
    /// fails with `Validation` before any request goes out.
    pub async fn create_lair(&self, lair: NewLair, token: &str) -> Result<(), ApiError> {
        let token = require_token(token)?;
        let body = serde_json::to_string(&lair.into_payload())
            .map_err(|e| ApiError::Network(format!("encoding request body: {}", e)))?;

        let url = format!("{}/lair", self.base_url);
        let response = self.http.post_json(&url, &body, Some(token)).await?;
        expect_success(response)
    }

    pub async fn delete_lair(&self, id: i64, token: &str) -> Result<(), ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/lair/{}", self.base_url, id);
        let response = self.http.delete(&url, Some(token)).await?;
        expect_success(response)
    }

    pub async fn register(
        &self,
        credentials: &AccountCredentials,
    ) -> Result<SessionGrant, ApiError> {
        self.account_request("/user", credentials).await
    }

    pub async fn login(&self, credentials: &AccountCredentials) -> Result<SessionGrant, ApiError> {
        self.account_request("/user/login", credentials).await
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &C {
        &self.http
    }

    async fn account_request(
        &self,
        path: &str,
        credentials: &AccountCredentials,
    ) -> Result<SessionGrant, ApiError> {
        if credentials.full_name.trim().is_empty() || credentials.password.is_empty() {
            return Err(ApiError::Validation(
                "both the account name and the password are required.".to_string(),
            ));
        }

        let body = serde_json::to_string(credentials)
            .map_err(|e| ApiError::Network(format!("encoding request body: {}", e)))?;
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post_json(&url, &body, None).await?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    expect_success_status(&response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Network(format!("unexpected response body: {}", e)))
}

fn expect_success(response: HttpResponse) -> Result<(), ApiError> {
    expect_success_status(&response)
}

fn expect_success_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(ApiError::from_response(response.status, &response.body))
    }
}

fn require_token(token: &str) -> Result<&str, ApiError> {
    let token = token.trim();
    if token.is_empty() {
        Err(ApiError::Validation(
            "sign in before changing listings.".to_string(),
        ))
    } else {
        Ok(token)
    }
}
