//! Domain services sitting between handlers and repositories.
//!
//! - [`CategoryRegistry`] -- get-or-create and listing of template categories.
//! - [`TemplateCatalog`] -- template uploads, lookup, listing and deletion.
//! - [`DesignStore`] -- atomic design saves and owner-scoped design access.
//! - [`UserImages`] -- the editor's per-user image pool.
//!
//! Each service is a cheap handle built from [`AppState`](crate::state::AppState)
//! per request; none of them hold mutable state of their own.

pub mod category_registry;
pub mod design_store;
pub mod template_catalog;
pub mod user_images;

pub use category_registry::CategoryRegistry;
pub use design_store::DesignStore;
pub use template_catalog::{TemplateCatalog, TemplateListing, TemplateUpload};
pub use user_images::UserImages;

use studio_core::assets::AssetStore;

/// Remove an asset written by a write path that then failed.
///
/// Failure to clean up is logged, never surfaced: the caller is already
/// returning the original error.
pub(crate) async fn discard_asset(assets: &dyn AssetStore, key: &str) {
    if let Err(e) = assets.delete(key).await {
        tracing::warn!(asset_key = %key, error = %e, "Failed to remove orphaned asset");
    }
}
