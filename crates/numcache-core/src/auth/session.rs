use std::fmt;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use super::Identity;
use crate::api::ApiClient;
use crate::error::{Error, Result};

/// Bearer token plus the instant it stops being valid.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// A token is unusable from its expiry instant onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Owns the process-wide credential and refreshes it when absent or expired.
///
/// Readers take the `RwLock` briefly and clone the token out, so a refresh swaps
/// the whole `Credential` at once. Refreshes are single-flight: callers that find
/// the token unusable queue on `refresh_lock` and re-check before requesting.
pub struct CredentialManager {
    api: ApiClient,
    identity: Identity,
    credential: RwLock<Option<Credential>>,
    refresh_lock: Mutex<()>,
}

impl CredentialManager {
    pub fn new(api: ApiClient, identity: Identity) -> Self {
        Self {
            api,
            identity,
            credential: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return a usable token, requesting a new one if none is held or it expired.
    ///
    /// A failed token request is retried once. If the retry fails too,
    /// [`Error::Authentication`] is returned and the held credential is left as is.
    pub async fn ensure_valid(&self) -> Result<String> {
        if let Some(token) = self.current_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.current_token().await {
            debug!("Token refreshed by a concurrent request");
            return Ok(token);
        }

        let credential = self.request_with_retry().await?;
        let token = credential.token.clone();
        info!(
            expires_in_secs = credential.seconds_until_expiry(),
            "Authentication successful, token acquired"
        );
        *self.credential.write().await = Some(credential);
        Ok(token)
    }

    /// The held token, if it has not expired. Never triggers a refresh.
    pub async fn current_token(&self) -> Option<String> {
        self.credential
            .read()
            .await
            .as_ref()
            .filter(|c| !c.is_expired())
            .map(|c| c.token.clone())
    }

    /// The held credential, expired or not.
    pub async fn credential(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    async fn request_with_retry(&self) -> Result<Credential> {
        match self.api.authenticate(&self.identity).await {
            Ok(credential) => Ok(credential),
            Err(first) => {
                warn!(error = %first, "Token request failed, retrying");
                self.api.authenticate(&self.identity).await.map_err(|e| {
                    error!(error = %e, "Token request retry failed");
                    Error::Authentication(e)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let credential = Credential::new("tok".to_string(), now + Duration::seconds(30));

        assert!(!credential.is_expired_at(now));
        assert!(!credential.is_expired_at(now + Duration::seconds(29)));
        assert!(credential.is_expired_at(now + Duration::seconds(30)));
        assert!(credential.is_expired_at(now + Duration::seconds(31)));
    }

    #[test]
    fn test_seconds_until_expiry_never_negative() {
        let credential = Credential::new("tok".to_string(), Utc::now() - Duration::seconds(10));
        assert!(credential.is_expired());
        assert_eq!(credential.seconds_until_expiry(), 0);
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = Credential::new("very-secret-token".to_string(), Utc::now());
        assert!(!format!("{:?}", credential).contains("very-secret-token"));
    }
}
