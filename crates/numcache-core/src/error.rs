use thiserror::Error;

use crate::api::ApiError;

/// Errors reported to callers of the core.
///
/// Upstream number-fetch failures are not part of this enum: they degrade to an
/// empty retrieved set inside [`crate::WindowCache::update`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid number category: {0}")]
    InvalidCategory(String),

    #[error("Authentication failure: {0}")]
    Authentication(#[source] ApiError),
}

pub type Result<T> = std::result::Result<T, Error>;
