//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::CommerceClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the commerce API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    commerce: CommerceClient,
}

impl AppState {
    /// Create a new application state with a client built from `config`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let commerce = CommerceClient::new(&config.commerce);
        Self::with_client(config, commerce)
    }

    /// Create a new application state around an existing client.
    #[must_use]
    pub fn with_client(config: StorefrontConfig, commerce: CommerceClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, commerce }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the commerce API client.
    #[must_use]
    pub fn commerce(&self) -> &CommerceClient {
        &self.inner.commerce
    }
}
