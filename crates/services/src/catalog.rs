use std::fmt;
use std::sync::Arc;

use memcard_core::model::Catalog;
use storage::repository::{CatalogSource, RuntimeStore};
use tracing::info;

use crate::error::CatalogServiceError;

//
// ─── CATALOG SERVICE ───────────────────────────────────────────────────────────
//

/// Rebuilds the runtime study resources from the card-list definition.
///
/// Initialization reads the card list, groups it by category, then replaces
/// the generated runtime area with one default-order file per category and a
/// sorted category index.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogSource>,
    runtime: Arc<dyn RuntimeStore>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogSource>, runtime: Arc<dyn RuntimeStore>) -> Self {
        Self { catalog, runtime }
    }

    /// Rebuild the category index and default orders from the card list.
    ///
    /// The runtime area is cleared only after the card list has been read and
    /// parsed, so a missing or malformed list leaves previous resources
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::CatalogUnavailable` if the card list
    /// cannot be read, `CatalogServiceError::Catalog` if it fails to parse,
    /// and `CatalogServiceError::Storage` for runtime write failures.
    pub async fn initialize(&self) -> Result<Catalog, CatalogServiceError> {
        let text = self
            .catalog
            .read_catalog()
            .await
            .map_err(CatalogServiceError::CatalogUnavailable)?;
        let catalog = Catalog::parse(&text)?;

        self.runtime.clear_all().await?;
        for (category, card_ids) in catalog.groups() {
            self.runtime
                .write_default_sequence(category, card_ids)
                .await?;
        }
        let sorted = catalog.sorted_categories();
        self.runtime.write_category_index(&sorted).await?;

        info!(
            "Catalog initialized: {} cards across {} categories",
            catalog.len(),
            sorted.len()
        );
        Ok(catalog)
    }
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
