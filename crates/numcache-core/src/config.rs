//! Service configuration.
//!
//! Tunables come from three layers, later ones winning:
//! built-in defaults, an optional JSON file at
//! `~/.config/numcache/config.json`, and `NUMCACHE_*` environment variables.
//! The caller identity used for the token endpoint lives in [`crate::Identity`].

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Category;

/// Application name used for the config directory path
const APP_NAME: &str = "numcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PORT: u16 = 9876;
pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_BASE_URL: &str = "http://20.244.56.144/evaluation-service";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_SOCIAL_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_AUTH_TIMEOUT_MS: u64 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub window_size: usize,
    pub base_url: String,
    pub fetch_timeout_ms: u64,
    pub social_timeout_ms: u64,
    pub auth_timeout_ms: u64,
    pub prime_url: Option<String>,
    pub fibonacci_url: Option<String>,
    pub even_url: Option<String>,
    pub random_url: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            window_size: DEFAULT_WINDOW_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            social_timeout_ms: DEFAULT_SOCIAL_TIMEOUT_MS,
            auth_timeout_ms: DEFAULT_AUTH_TIMEOUT_MS,
            prime_url: None,
            fibonacci_url: None,
            even_url: None,
            random_url: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply process environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply `NUMCACHE_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = parse_var(&lookup, "NUMCACHE_PORT")? {
            self.port = port;
        }
        if let Some(size) = parse_var(&lookup, "NUMCACHE_WINDOW_SIZE")? {
            self.window_size = size;
        }
        if let Some(ms) = parse_var(&lookup, "NUMCACHE_FETCH_TIMEOUT_MS")? {
            self.fetch_timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "NUMCACHE_SOCIAL_TIMEOUT_MS")? {
            self.social_timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "NUMCACHE_AUTH_TIMEOUT_MS")? {
            self.auth_timeout_ms = ms;
        }
        if let Some(url) = lookup("NUMCACHE_BASE_URL") {
            self.base_url = url;
        }
        self.prime_url = lookup("NUMCACHE_PRIME_URL").or(self.prime_url.take());
        self.fibonacci_url = lookup("NUMCACHE_FIBONACCI_URL").or(self.fibonacci_url.take());
        self.even_url = lookup("NUMCACHE_EVEN_URL").or(self.even_url.take());
        self.random_url = lookup("NUMCACHE_RANDOM_URL").or(self.random_url.take());
        self.log_dir = lookup("NUMCACHE_LOG_DIR").map(PathBuf::from).or(self.log_dir.take());

        self.validate()?;
        Ok(self)
    }

    /// Reject zero sizes and timeouts; a zero reqwest timeout fails every request.
    fn validate(&self) -> Result<(), ConfigError> {
        let must_be_positive = [
            ("window_size", self.window_size as u64),
            ("fetch_timeout_ms", self.fetch_timeout_ms),
            ("social_timeout_ms", self.social_timeout_ms),
            ("auth_timeout_ms", self.auth_timeout_ms),
        ];
        match must_be_positive.iter().find(|(_, value)| *value == 0) {
            Some((key, value)) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn social_timeout(&self) -> Duration {
        Duration::from_millis(self.social_timeout_ms)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms)
    }

    /// Resolve the upstream URLs, applying any per-category overrides.
    pub fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::from_base(&self.base_url);
        let overrides = [
            (Category::Prime, &self.prime_url),
            (Category::Fibonacci, &self.fibonacci_url),
            (Category::Even, &self.even_url),
            (Category::Random, &self.random_url),
        ];
        for (category, url) in overrides {
            if let Some(url) = url {
                endpoints.set_number_url(category, url.clone());
            }
        }
        endpoints
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

/// Upstream URLs for the token endpoint, the number endpoints and the social endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    auth_url: String,
    prime_url: String,
    fibonacci_url: String,
    even_url: String,
    random_url: String,
}

impl Endpoints {
    pub fn from_base(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = |path: &str| format!("{}/{}", base_url, path);
        Self {
            auth_url: url("auth"),
            prime_url: url(Category::Prime.upstream_path()),
            fibonacci_url: url(Category::Fibonacci.upstream_path()),
            even_url: url(Category::Even.upstream_path()),
            random_url: url(Category::Random.upstream_path()),
            base_url,
        }
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn number_url(&self, category: Category) -> &str {
        match category {
            Category::Prime => &self.prime_url,
            Category::Fibonacci => &self.fibonacci_url,
            Category::Even => &self.even_url,
            Category::Random => &self.random_url,
        }
    }

    pub fn set_number_url(&mut self, category: Category, url: String) {
        let slot = match category {
            Category::Prime => &mut self.prime_url,
            Category::Fibonacci => &mut self.fibonacci_url,
            Category::Even => &mut self.even_url,
            Category::Random => &mut self.random_url,
        };
        *slot = url;
    }

    /// URL of a social endpoint, `path` given without a leading slash.
    pub fn social_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
