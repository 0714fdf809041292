use std::sync::Arc;

use numcache_core::{ApiClient, ApiError, Config, CredentialManager, Identity, WindowCache};

/// Shared handles passed to every handler.
/// Clone is cheap - everything behind it is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub credentials: Arc<CredentialManager>,
    pub cache: Arc<WindowCache>,
}

impl AppState {
    pub fn new(config: &Config, identity: Identity) -> Result<Self, ApiError> {
        let api = ApiClient::new(config)?;
        let credentials = Arc::new(CredentialManager::new(api.clone(), identity));
        let cache = Arc::new(WindowCache::new(
            api.clone(),
            credentials.clone(),
            config.window_size,
        ));

        Ok(Self {
            api,
            credentials,
            cache,
        })
    }
}
