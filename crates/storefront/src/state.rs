//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{SeedError, seed};
use crate::store::Stores;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the shop's stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    stores: Stores,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the demo catalog and accounts when `config.seed_demo_data` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo data cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, SeedError> {
        let stores = Stores::new();
        if config.seed_demo_data {
            seed::demo_data(&stores)?;
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { config, stores }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shop's stores.
    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.inner.stores
    }
}
