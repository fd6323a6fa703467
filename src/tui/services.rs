use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::api::{CatalogApi, HttpCatalogClient};
use crate::core::error::CatalogError;

/// Handle to the backend, passed by reference to views that fetch.
///
/// Holds no data: every view fetches on its own and keeps its own copy.
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn CatalogApi>,
}

impl Services {
    /// Build the HTTP client from config.
    ///
    /// Fails only on a malformed base URL or header; the service itself is
    /// not contacted until a view mounts.
    pub fn init(config: &AppConfig) -> Result<Self, CatalogError> {
        let client = HttpCatalogClient::new(&config.api)?;
        log::info!("Catalog client ready for {}", client.base_url());
        Ok(Self::with_api(Arc::new(client)))
    }

    /// Wrap an existing client (used by tests with stub backends).
    pub fn with_api(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }
}
