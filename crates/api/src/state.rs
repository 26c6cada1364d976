use std::sync::Arc;

use studio_core::assets::AssetStore;

use crate::config::ServerConfig;
use crate::services::{CategoryRegistry, DesignStore, TemplateCatalog, UserImages};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: studio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where template images, design previews and editor uploads live.
    pub assets: Arc<dyn AssetStore>,
}

impl AppState {
    pub fn categories(&self) -> CategoryRegistry {
        CategoryRegistry::new(self.pool.clone())
    }

    pub fn templates(&self) -> TemplateCatalog {
        TemplateCatalog::new(self.pool.clone(), Arc::clone(&self.assets))
    }

    pub fn designs(&self) -> DesignStore {
        DesignStore::new(self.pool.clone(), Arc::clone(&self.assets))
    }

    pub fn user_images(&self) -> UserImages {
        UserImages::new(self.pool.clone(), Arc::clone(&self.assets))
    }
}
