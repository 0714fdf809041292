//! Authentication for the upstream evaluation service.
//!
//! This module provides:
//! - `Identity`: the fixed caller identity posted to the token endpoint
//! - `Credential`: a bearer token together with its expiry instant
//! - `CredentialManager`: holds the current credential and refreshes it on demand
//!
//! Credentials live in memory only and are re-requested after a restart.

pub mod identity;
pub mod session;

pub use identity::Identity;
pub use session::{Credential, CredentialManager};
