//! numcache-core - upstream client, credential manager and sliding-window cache.
//!
//! The two moving parts are:
//! - [`CredentialManager`]: holds the bearer token and refreshes it when it expires
//! - [`WindowCache`]: one bounded, deduplicated window of numbers per [`Category`]
//!
//! Everything HTTP-facing on the inbound side lives in `numcache-server`.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{Credential, CredentialManager, Identity};
pub use cache::WindowCache;
pub use config::{Config, ConfigError, Endpoints};
pub use error::Error;
pub use models::{Category, Window, WindowSnapshot};
