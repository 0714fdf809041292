//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use numcache_core::{ApiClient, Config, CredentialManager, Identity, WindowCache};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn identity() -> Identity {
    Identity {
        email: "ada@example.com".to_string(),
        name: "Ada Lovelace".to_string(),
        roll_no: "42".to_string(),
        access_code: "abc123".to_string(),
        client_id: "client-1".to_string(),
        client_secret: "s3cret".to_string(),
    }
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        fetch_timeout_ms: 300,
        social_timeout_ms: 300,
        auth_timeout_ms: 300,
        ..Config::default()
    }
}

pub fn token_response(token: &str, expires_in: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "token_type": "Bearer",
        "access_token": token,
        "expires_in": expires_in,
    }))
}

pub fn numbers_response(numbers: &[i64]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "numbers": numbers }))
}

/// Mount a token endpoint that always hands out `token`, valid for an hour.
pub async fn mount_auth(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(token_response(token, 3600))
        .mount(server)
        .await;
}

pub fn credential_manager(config: &Config) -> Arc<CredentialManager> {
    let api = ApiClient::new(config).expect("client should build");
    Arc::new(CredentialManager::new(api, identity()))
}

/// A cache whose credential manager already holds a valid token.
pub async fn authorized_cache(config: &Config) -> WindowCache {
    let credentials = credential_manager(config);
    credentials
        .ensure_valid()
        .await
        .expect("token endpoint should be mocked");
    let api = ApiClient::new(config).expect("client should build");
    WindowCache::new(api, credentials, config.window_size)
}
