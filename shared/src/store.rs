//! Catalog backend collaborator contracts
//!
//! The hosted backend (tables + object storage) is consumed only through these
//! traits. Lookups that find nothing return `Ok(None)` / an empty `Vec`; only
//! transport or backend failures are errors.

use crate::models::{
    CategoryRecord, NewProduct, ProductFilter, ProductRecord, SubcategoryRecord,
};
use async_trait::async_trait;
use thiserror::Error;

/// Backend failure
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend could not be reached
    #[error("Catalog backend unavailable: {0}")]
    Unavailable(String),

    /// Backend did not answer in time
    #[error("Catalog backend timed out: {0}")]
    Timeout(String),

    /// Backend answered with a non-success status
    #[error("Catalog backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Backend answered with something we could not decode
    #[error("Invalid response from catalog backend: {0}")]
    InvalidResponse(String),
}

/// Result type for backend operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Category, subcategory and product tables
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All categories
    async fn list_categories(&self) -> StoreResult<Vec<CategoryRecord>>;

    /// Subcategories, optionally restricted to one category
    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
    ) -> StoreResult<Vec<SubcategoryRecord>>;

    /// Category whose stored slug equals `slug`
    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRecord>>;

    /// Subcategory whose stored slug equals `slug`, optionally within one category
    async fn find_subcategory(
        &self,
        slug: &str,
        category_id: Option<&str>,
    ) -> StoreResult<Option<SubcategoryRecord>>;

    /// Products passing the filter
    async fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<ProductRecord>>;

    /// Get-or-create a category keyed by slug
    async fn upsert_category(&self, name: &str, slug: &str) -> StoreResult<CategoryRecord>;

    /// Get-or-create a subcategory keyed by slug
    async fn upsert_subcategory(
        &self,
        name: &str,
        slug: &str,
        category_id: Option<&str>,
    ) -> StoreResult<SubcategoryRecord>;

    /// Insert products, returning how many rows were written
    async fn insert_products(&self, products: &[NewProduct]) -> StoreResult<usize>;
}

/// Object storage holding product images
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// File names (without the prefix) stored under `prefix`
    async fn list_stored_image_filenames(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Public URL for a stored object path
    fn public_url(&self, path: &str) -> String;
}
