//! API client for the upstream evaluation service.
//!
//! This module provides the `ApiClient` struct for requesting tokens and
//! making authenticated requests for number sequences and social data.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::debug;

use crate::auth::{Credential, Identity};
use crate::config::{Config, Endpoints};
use crate::models::Category;

use super::ApiError;

/// Upper bound for any request.
/// Token, number and social requests each set their own, shorter timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct NumbersResponse {
    numbers: Vec<i64>,
}

/// API client for the evaluation service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Arc<Endpoints>,
    fetch_timeout: Duration,
    social_timeout: Duration,
    auth_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoints: Arc::new(config.endpoints()),
            fetch_timeout: config.fetch_timeout(),
            social_timeout: config.social_timeout(),
            auth_timeout: config.auth_timeout(),
        })
    }

    /// Request a fresh token. Expiry is measured from the moment the request is sent.
    pub async fn authenticate(&self, identity: &Identity) -> Result<Credential, ApiError> {
        let requested_at = Utc::now();

        let response = self
            .client
            .post(self.endpoints.auth_url())
            .json(identity)
            .timeout(self.auth_timeout)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = Self::parse_body(response).await?;

        if auth.access_token.is_empty() {
            return Err(ApiError::InvalidResponse("empty access_token".to_string()));
        }
        let expires_at = TimeDelta::try_seconds(auth.expires_in)
            .filter(|lifetime| *lifetime >= TimeDelta::zero())
            .and_then(|lifetime| requested_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ApiError::InvalidResponse(format!("unusable expires_in: {}", auth.expires_in))
            })?;

        Ok(Credential::new(auth.access_token, expires_at))
    }

    /// Fetch the raw numbers for a category, bounded by the fetch timeout.
    pub async fn fetch_numbers(&self, category: Category, token: &str) -> Result<Vec<i64>, ApiError> {
        let url = self.endpoints.number_url(category);
        debug!(%category, url, "Fetching numbers");

        let body: NumbersResponse = self.get(url, token, self.fetch_timeout).await?;
        Ok(body.numbers)
    }

    /// Fetch a social endpoint (`users`, `users/{id}/posts`, `posts/{id}/comments`)
    /// and return the body untouched, bounded by the social timeout.
    pub async fn fetch_social(&self, path: &str, token: &str) -> Result<Value, ApiError> {
        let url = self.endpoints.social_url(path);
        debug!(url = %url, "Fetching social data");

        self.get(&url, token, self.social_timeout).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .timeout(timeout)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse_body(response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
