//! In-memory catalog backend
//!
//! Rows live in insertion order, which is also listing order. Used by tests
//! and local tooling; behaves like the hosted backend for every trait call,
//! including get-or-create upserts keyed by slug.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    CategoryRecord, NewProduct, ProductFilter, ProductRecord, SubcategoryRecord,
};
use shared::{CatalogStore, ImageStorage, StoreError, StoreResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<CategoryRecord>,
    subcategories: Vec<SubcategoryRecord>,
    products: Vec<ProductRecord>,
    /// Object paths in the image bucket
    objects: Vec<String>,
}

/// Catalog and image storage held in memory
#[derive(Clone)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
    next_id: Arc<AtomicU64>,
    unavailable: Arc<AtomicBool>,
    public_base: String,
}

impl std::fmt::Debug for MemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("MemoryCatalog")
            .field("categories_count", &tables.categories.len())
            .field("subcategories_count", &tables.subcategories.len())
            .field("products_count", &tables.products.len())
            .field("objects_count", &tables.objects.len())
            .finish()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new("memory://images")
    }
}

impl MemoryCatalog {
    /// Empty catalog whose public URLs start with `public_base`
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            next_id: Arc::new(AtomicU64::new(1)),
            unavailable: Arc::new(AtomicBool::new(false)),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn generate_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("memory catalog is offline".to_string()));
        }
        Ok(())
    }

    /// Make every call fail as if the backend were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    pub fn add_category(&self, category: CategoryRecord) {
        self.tables.write().categories.push(category);
    }

    pub fn add_subcategory(&self, subcategory: SubcategoryRecord) {
        self.tables.write().subcategories.push(subcategory);
    }

    pub fn add_product(&self, product: ProductRecord) {
        self.tables.write().products.push(product);
    }

    /// Store an object path in the image bucket
    pub fn add_object(&self, path: impl Into<String>) {
        self.tables.write().objects.push(path.into());
    }

    pub fn categories(&self) -> Vec<CategoryRecord> {
        self.tables.read().categories.clone()
    }

    pub fn subcategories(&self) -> Vec<SubcategoryRecord> {
        self.tables.read().subcategories.clone()
    }

    pub fn products(&self) -> Vec<ProductRecord> {
        self.tables.read().products.clone()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_categories(&self) -> StoreResult<Vec<CategoryRecord>> {
        self.check_available()?;
        Ok(self.categories())
    }

    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
    ) -> StoreResult<Vec<SubcategoryRecord>> {
        self.check_available()?;
        let tables = self.tables.read();
        Ok(tables
            .subcategories
            .iter()
            .filter(|s| category_id.is_none_or(|id| s.belongs_to(id)))
            .cloned()
            .collect())
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRecord>> {
        self.check_available()?;
        let tables = self.tables.read();
        Ok(tables
            .categories
            .iter()
            .find(|c| c.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn find_subcategory(
        &self,
        slug: &str,
        category_id: Option<&str>,
    ) -> StoreResult<Option<SubcategoryRecord>> {
        self.check_available()?;
        let tables = self.tables.read();
        Ok(tables
            .subcategories
            .iter()
            .find(|s| s.slug.as_deref() == Some(slug) && category_id.is_none_or(|id| s.belongs_to(id)))
            .cloned())
    }

    async fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<ProductRecord>> {
        self.check_available()?;
        let tables = self.tables.read();
        Ok(tables
            .products
            .iter()
            .filter(|p| p.matches(filter))
            .cloned()
            .collect())
    }

    async fn upsert_category(&self, name: &str, slug: &str) -> StoreResult<CategoryRecord> {
        self.check_available()?;
        let mut tables = self.tables.write();
        if let Some(existing) = tables.categories.iter_mut().find(|c| c.slug.as_deref() == Some(slug)) {
            existing.name = name.to_string();
            return Ok(existing.clone());
        }
        let created = CategoryRecord::new(self.generate_id(), name, Some(slug));
        tables.categories.push(created.clone());
        Ok(created)
    }

    async fn upsert_subcategory(
        &self,
        name: &str,
        slug: &str,
        category_id: Option<&str>,
    ) -> StoreResult<SubcategoryRecord> {
        self.check_available()?;
        let mut tables = self.tables.write();
        if let Some(existing) = tables
            .subcategories
            .iter_mut()
            .find(|s| s.slug.as_deref() == Some(slug))
        {
            existing.name = name.to_string();
            if category_id.is_some() {
                existing.category_id = category_id.map(str::to_string);
            }
            return Ok(existing.clone());
        }
        let created = SubcategoryRecord::new(self.generate_id(), name, Some(slug), category_id);
        tables.subcategories.push(created.clone());
        Ok(created)
    }

    async fn insert_products(&self, products: &[NewProduct]) -> StoreResult<usize> {
        self.check_available()?;
        let mut tables = self.tables.write();
        for product in products {
            tables.products.push(ProductRecord {
                id: self.generate_id(),
                name: product.name.clone(),
                description: product.description.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                category_id: product.category_id.clone(),
                subcategory_id: product.subcategory_id.clone(),
                is_visitor_sofa: product.is_visitor_sofa,
                is_featured: product.is_featured,
                is_new_arrival: product.is_new_arrival,
            });
        }
        Ok(products.len())
    }
}

#[async_trait]
impl ImageStorage for MemoryCatalog {
    async fn list_stored_image_filenames(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.check_available()?;
        let prefix = prefix.trim_matches('/');
        let tables = self.tables.read();
        Ok(tables
            .objects
            .iter()
            .filter_map(|path| {
                let name = if prefix.is_empty() {
                    path.as_str()
                } else {
                    path.strip_prefix(prefix)?.strip_prefix('/')?
                };
                (!name.is_empty() && !name.contains('/')).then(|| name.to_string())
            })
            .collect())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_is_get_or_create() {
        let store = MemoryCatalog::default();
        let first = store.upsert_category("Outdoor", "outdoor").await.unwrap();
        let second = store.upsert_category("Outdoor", "outdoor").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.categories().len(), 1);

        let sub = store
            .upsert_subcategory("Loungers", "loungers", Some(&first.id))
            .await
            .unwrap();
        assert!(sub.belongs_to(&first.id));
    }

    #[tokio::test]
    async fn test_lists_direct_children_of_prefix() {
        let store = MemoryCatalog::new("https://cdn.example/images/");
        store.add_object("products/a.jpg");
        store.add_object("products/archive/b.jpg");
        store.add_object("banners/c.jpg");

        let names = store.list_stored_image_filenames("products").await.unwrap();
        assert_eq!(names, vec!["a.jpg".to_string()]);
        assert_eq!(store.public_url("products/a.jpg"), "https://cdn.example/images/products/a.jpg");
    }

    #[tokio::test]
    async fn test_unavailable() {
        let store = MemoryCatalog::default();
        store.set_unavailable(true);
        assert!(matches!(
            store.list_categories().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
