//! Upstream REST client.
//!
//! This module provides the `ApiClient` for talking to the evaluation
//! service: the token endpoint, the four number endpoints and the
//! social read-through endpoints.
//!
//! Every data endpoint expects `Authorization: Bearer <token>` obtained
//! from the token endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
