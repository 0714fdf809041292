use std::fmt;

use serde::Serialize;

use crate::config::ConfigError;

/// Caller identity sent to the token endpoint.
///
/// Field names follow the upstream JSON contract.
#[derive(Clone, Serialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
    #[serde(rename = "rollNo")]
    pub roll_no: String,
    #[serde(rename = "accessCode")]
    pub access_code: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl Identity {
    /// Read the identity from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            email: require("EMAIL")?,
            name: require("NAME")?,
            roll_no: require("ROLL_NO")?,
            access_code: require("ACCESS_CODE")?,
            client_id: require("CLIENT_ID")?,
            client_secret: require("CLIENT_SECRET")?,
        })
    }
}

// Keep the access code and client secret out of logs
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("roll_no", &self.roll_no)
            .field("access_code", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(key: &str) -> Option<String> {
        let value = match key {
            "EMAIL" => "ada@example.com",
            "NAME" => "Ada",
            "ROLL_NO" => "42",
            "ACCESS_CODE" => "abc",
            "CLIENT_ID" => "client-1",
            "CLIENT_SECRET" => "s3cret",
            _ => return None,
        };
        Some(value.to_string())
    }

    #[test]
    fn test_from_lookup() {
        let identity = Identity::from_lookup(full_env).unwrap();
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.client_secret, "s3cret");
    }

    #[test]
    fn test_missing_variable_is_named() {
        let err = Identity::from_lookup(|key| {
            if key == "CLIENT_SECRET" {
                None
            } else {
                full_env(key)
            }
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CLIENT_SECRET")));
    }

    #[test]
    fn test_blank_variable_counts_as_missing() {
        let err = Identity::from_lookup(|key| {
            if key == "EMAIL" {
                Some("  ".to_string())
            } else {
                full_env(key)
            }
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("EMAIL")));
    }

    #[test]
    fn test_wire_field_names() {
        let identity = Identity::from_lookup(full_env).unwrap();
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["rollNo"], "42");
        assert_eq!(json["accessCode"], "abc");
        assert_eq!(json["clientID"], "client-1");
        assert_eq!(json["clientSecret"], "s3cret");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let identity = Identity::from_lookup(full_env).unwrap();
        let debug = format!("{:?}", identity);
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("\"abc\""));
    }
}
