//! Catalog Service - navigation, route resolution and bulk import over one backend
//!
//! Nothing is cached: every call reads current backend state.

use crate::core::{CoreConfig, TaxonomyFile};
use crate::import::{ImportPipeline, ImportReport, RawProductRow};
use crate::taxonomy::{
    CanonicalTaxonomy, ProductSelection, RouteResolution, SharedSubcategoryConfig,
    SubcategoryResolver, assemble_category_tree,
};
use serde::Serialize;
use shared::models::{ProductRecord, StructuredCategory};
use shared::{AppResult, CatalogStore, ImageStorage, StoreResult};
use std::io::Read;
use std::sync::Arc;

/// Products for a resolved route
#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    pub resolution: RouteResolution,
    pub selection: ProductSelection,
    pub products: Vec<ProductRecord>,
}

/// Storefront catalog facade
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    storage: Arc<dyn ImageStorage>,
    taxonomy: Arc<CanonicalTaxonomy>,
    shared: Arc<SharedSubcategoryConfig>,
    config: CoreConfig,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("groups_count", &self.taxonomy.len())
            .field("shared_count", &self.shared.entries().len())
            .field("image_prefix", &self.config.image_prefix)
            .finish()
    }
}

impl CatalogService {
    /// Create a service with an explicit taxonomy
    pub fn new(
        store: Arc<dyn CatalogStore>,
        storage: Arc<dyn ImageStorage>,
        taxonomy: TaxonomyFile,
        config: CoreConfig,
    ) -> Self {
        Self {
            store,
            storage,
            taxonomy: Arc::new(taxonomy.groups),
            shared: Arc::new(taxonomy.shared_subcategories),
            config,
        }
    }

    /// Create a service using the taxonomy named by `config`
    pub fn from_config(
        store: Arc<dyn CatalogStore>,
        storage: Arc<dyn ImageStorage>,
        config: CoreConfig,
    ) -> AppResult<Self> {
        let taxonomy = config.load_taxonomy()?;
        taxonomy.validate()?;
        Ok(Self::new(store, storage, taxonomy, config))
    }

    pub fn taxonomy(&self) -> &CanonicalTaxonomy {
        &self.taxonomy
    }

    pub fn shared_subcategories(&self) -> &SharedSubcategoryConfig {
        &self.shared
    }

    fn resolver(&self) -> SubcategoryResolver {
        SubcategoryResolver::new(self.store.clone(), self.shared.clone())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigation tree built from current backend rows
    pub async fn navigation_tree(&self) -> StoreResult<Vec<StructuredCategory>> {
        let (categories, subcategories) = tokio::try_join!(
            self.store.list_categories(),
            self.store.list_subcategories(None),
        )?;
        Ok(assemble_category_tree(
            &self.taxonomy,
            &categories,
            &subcategories,
        ))
    }

    // =========================================================================
    // Routes
    // =========================================================================

    /// Resolve a `(category, subcategory)` route
    pub async fn resolve_route(
        &self,
        category_slug: &str,
        subcategory_slug: &str,
    ) -> StoreResult<RouteResolution> {
        self.resolver()
            .resolve_category_and_subcategory(category_slug, subcategory_slug)
            .await
    }

    /// Products for a route; `None` renders as not found
    pub async fn products_for_route(
        &self,
        category_slug: &str,
        subcategory_slug: &str,
    ) -> StoreResult<Option<ProductListing>> {
        let resolver = self.resolver();
        let resolution = resolver
            .resolve_category_and_subcategory(category_slug, subcategory_slug)
            .await?;
        let Some(selection) = resolver.product_selection(&resolution).await? else {
            return Ok(None);
        };

        let products = self.store.list_products(&selection.filter).await?;
        if selection.is_approximate() {
            tracing::debug!(
                category = category_slug,
                subcategory = subcategory_slug,
                count = products.len(),
                "Listing products with approximate filter"
            );
        }
        Ok(Some(ProductListing {
            resolution,
            selection,
            products,
        }))
    }

    // =========================================================================
    // Import
    // =========================================================================

    fn pipeline(&self) -> ImportPipeline {
        ImportPipeline::new(
            self.store.clone(),
            self.storage.clone(),
            self.config.import_options(),
        )
    }

    /// Import products from CSV
    pub async fn import_csv<R: Read>(&self, reader: R) -> AppResult<ImportReport> {
        self.pipeline().import_csv(reader).await
    }

    /// Import already-parsed rows
    pub async fn import_rows<I>(&self, rows: I) -> AppResult<ImportReport>
    where
        I: IntoIterator<Item = RawProductRow>,
    {
        self.pipeline().import_rows(rows).await
    }
}
