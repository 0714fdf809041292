use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::auth::CredentialManager;
use crate::error::{Error, Result};
use crate::models::{Category, Window, WindowSnapshot};

/// One window per category, each behind its own lock.
///
/// The lock is held for the whole update (snapshot, fetch, merge), so updates of
/// one category never interleave while different categories run in parallel.
pub struct WindowCache {
    api: ApiClient,
    credentials: Arc<CredentialManager>,
    window_size: usize,
    prime: Mutex<Window>,
    fibonacci: Mutex<Window>,
    even: Mutex<Window>,
    random: Mutex<Window>,
}

impl WindowCache {
    pub fn new(api: ApiClient, credentials: Arc<CredentialManager>, window_size: usize) -> Self {
        Self {
            api,
            credentials,
            window_size,
            prime: Mutex::new(Window::new()),
            fibonacci: Mutex::new(Window::new()),
            even: Mutex::new(Window::new()),
            random: Mutex::new(Window::new()),
        }
    }

    fn slot(&self, category: Category) -> &Mutex<Window> {
        match category {
            Category::Prime => &self.prime,
            Category::Fibonacci => &self.fibonacci,
            Category::Even => &self.even,
            Category::Random => &self.random,
        }
    }

    /// Update the window for a request code (`p`, `f`, `e`, `r`).
    pub async fn update_code(&self, code: &str) -> Result<WindowSnapshot> {
        let category =
            Category::from_code(code).ok_or_else(|| Error::InvalidCategory(code.to_string()))?;
        Ok(self.update(category).await)
    }

    /// Fetch fresh numbers for `category` and merge them into its window.
    ///
    /// Upstream failures leave the window untouched and report an empty
    /// `retrieved_numbers`.
    pub async fn update(&self, category: Category) -> WindowSnapshot {
        let mut window = self.slot(category).lock().await;

        let retrieved = self.retrieve(category).await;
        if retrieved.is_empty() {
            return window.unchanged();
        }

        let snapshot = window.merge(&retrieved, self.window_size);
        debug!(
            %category,
            retrieved = snapshot.retrieved_numbers.len(),
            window_len = snapshot.current_window.len(),
            average = snapshot.average,
            "Window updated"
        );
        snapshot
    }

    /// Copy of the current window state for `category`.
    pub async fn window(&self, category: Category) -> Window {
        self.slot(category).lock().await.clone()
    }

    async fn retrieve(&self, category: Category) -> Vec<i64> {
        let Some(token) = self.credentials.current_token().await else {
            warn!(%category, "No valid token held, skipping fetch");
            return Vec::new();
        };

        match self.api.fetch_numbers(category, &token).await {
            Ok(numbers) => numbers,
            Err(e) if e.is_timeout() => {
                warn!(%category, "Number fetch timed out");
                Vec::new()
            }
            Err(e) => {
                warn!(%category, error = %e, "Number fetch failed");
                Vec::new()
            }
        }
    }
}
