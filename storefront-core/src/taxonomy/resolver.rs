//! Shared-Subcategory Resolver
//!
//! Resolves a `(category-slug, subcategory-slug)` route to backend records,
//! or to a virtual subcategory when the pair is a declared cross-listing, and
//! picks the product filter for it.

use super::matcher::{MatchMode, find_best_match, find_match};
use super::shared_subcategory::{SharedSubcategory, SharedSubcategoryConfig};
use serde::{Deserialize, Serialize};
use shared::models::{CategoryRecord, ProductFilter, ProductFlag, SubcategoryRecord};
use shared::{CatalogStore, StoreResult};
use std::sync::Arc;

/// Subcategory synthesized for a shared route; never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualSubcategory {
    /// Id of the shared declaration, not of any backend row
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Category the route resolved to
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<ProductFlag>,
}

impl VirtualSubcategory {
    fn from_entry(entry: &SharedSubcategory, category: &CategoryRecord) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            slug: entry.slug.clone(),
            category_id: category.id.clone(),
            flag: entry.flag,
        }
    }
}

/// Subcategory a route resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedSubcategory {
    /// Backend row linked to the resolved category
    Direct(SubcategoryRecord),
    /// Declared cross-listing
    Shared(VirtualSubcategory),
}

impl ResolvedSubcategory {
    pub fn id(&self) -> &str {
        match self {
            Self::Direct(sub) => &sub.id,
            Self::Shared(sub) => &sub.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Direct(sub) => &sub.name,
            Self::Shared(sub) => &sub.name,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

/// Result of resolving a route
///
/// `subcategory: None` means "not found" and must render as such, never as
/// an unfiltered listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteResolution {
    pub category: Option<CategoryRecord>,
    pub subcategory: Option<ResolvedSubcategory>,
}

impl RouteResolution {
    /// Both halves of the route resolved
    pub fn is_found(&self) -> bool {
        self.category.is_some() && self.subcategory.is_some()
    }
}

/// How faithfully a product filter reflects the subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Keyed by a real subcategory id
    Exact,
    /// Flag or text based; may both over- and under-match
    Approximate,
}

/// Product filter chosen for a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub filter: ProductFilter,
    pub precision: Precision,
}

impl ProductSelection {
    pub fn exact(filter: ProductFilter) -> Self {
        Self {
            filter,
            precision: Precision::Exact,
        }
    }

    pub fn approximate(filter: ProductFilter) -> Self {
        Self {
            filter,
            precision: Precision::Approximate,
        }
    }

    pub fn is_approximate(&self) -> bool {
        self.precision == Precision::Approximate
    }
}

/// Route resolver over a catalog backend
pub struct SubcategoryResolver {
    store: Arc<dyn CatalogStore>,
    shared: Arc<SharedSubcategoryConfig>,
}

impl SubcategoryResolver {
    pub fn new(store: Arc<dyn CatalogStore>, shared: Arc<SharedSubcategoryConfig>) -> Self {
        Self { store, shared }
    }

    pub fn shared(&self) -> &SharedSubcategoryConfig {
        &self.shared
    }

    /// Category for a route slug
    ///
    /// Exact stored slug first, then name-derived slugs, then hyphen-segment
    /// containment (`"office"` finds "Office Furniture").
    pub async fn resolve_category(&self, category_slug: &str) -> StoreResult<Option<CategoryRecord>> {
        let category_slug = category_slug.trim();
        if category_slug.is_empty() {
            return Ok(None);
        }

        if let Some(category) = self.store.find_category_by_slug(category_slug).await? {
            return Ok(Some(category));
        }

        let categories = self.store.list_categories().await?;
        let found = find_match(category_slug, &categories, MatchMode::Containment).cloned();
        match &found {
            Some(category) => {
                tracing::debug!(route = category_slug, category = %category.name, "Category resolved by name fallback")
            }
            None => tracing::debug!(route = category_slug, "No category for route"),
        }
        Ok(found)
    }

    async fn resolve_direct_subcategory(
        &self,
        category: &CategoryRecord,
        subcategory_slug: &str,
    ) -> StoreResult<Option<SubcategoryRecord>> {
        if let Some(sub) = self
            .store
            .find_subcategory(subcategory_slug, Some(&category.id))
            .await?
        {
            return Ok(Some(sub));
        }

        let candidates = self.store.list_subcategories(Some(&category.id)).await?;
        let found = candidates
            .iter()
            .find(|s| s.stored_slug() == Some(subcategory_slug))
            .or_else(|| find_best_match(subcategory_slug, &candidates))
            .cloned();
        Ok(found)
    }

    /// Resolve a `(category, subcategory)` route
    ///
    /// Declared cross-listings win over direct rows. Nothing found is a
    /// normal result; only backend failures are errors.
    pub async fn resolve_category_and_subcategory(
        &self,
        category_slug: &str,
        subcategory_slug: &str,
    ) -> StoreResult<RouteResolution> {
        let Some(category) = self.resolve_category(category_slug).await? else {
            return Ok(RouteResolution::default());
        };

        let subcategory_slug = subcategory_slug.trim();
        if subcategory_slug.is_empty() {
            return Ok(RouteResolution {
                category: Some(category),
                subcategory: None,
            });
        }

        if let Some(entry) = self
            .shared
            .lookup(category_slug.trim(), &category, subcategory_slug)
        {
            let virtual_sub = VirtualSubcategory::from_entry(entry, &category);
            return Ok(RouteResolution {
                category: Some(category),
                subcategory: Some(ResolvedSubcategory::Shared(virtual_sub)),
            });
        }

        let direct = self
            .resolve_direct_subcategory(&category, subcategory_slug)
            .await?;
        if direct.is_none() {
            tracing::debug!(category = %category.name, subcategory = subcategory_slug, "Subcategory not found");
        }
        Ok(RouteResolution {
            category: Some(category),
            subcategory: direct.map(ResolvedSubcategory::Direct),
        })
    }

    /// Product filter for a shared subcategory
    ///
    /// A genuine backend row with the same slug gives an exact filter.
    /// Otherwise the declared flag, then a name/description text match, are
    /// used; both are approximate.
    pub async fn resolve_products_for_shared_subcategory(
        &self,
        virtual_sub: &VirtualSubcategory,
    ) -> StoreResult<ProductSelection> {
        if let Some(row) = self.store.find_subcategory(&virtual_sub.slug, None).await? {
            return Ok(ProductSelection::exact(ProductFilter::Subcategory {
                subcategory_id: row.id,
                category_id: None,
            }));
        }

        let selection = match virtual_sub.flag {
            Some(flag) => ProductSelection::approximate(ProductFilter::Flag(flag)),
            None => ProductSelection::approximate(ProductFilter::Text(virtual_sub.name.clone())),
        };
        tracing::debug!(subcategory = %virtual_sub.slug, filter = ?selection.filter, "Approximate product filter for shared subcategory");
        Ok(selection)
    }

    /// Product filter for any resolved route; `None` when not found
    pub async fn product_selection(
        &self,
        resolution: &RouteResolution,
    ) -> StoreResult<Option<ProductSelection>> {
        match &resolution.subcategory {
            None => Ok(None),
            Some(ResolvedSubcategory::Direct(sub)) => {
                Ok(Some(ProductSelection::exact(ProductFilter::Subcategory {
                    subcategory_id: sub.id.clone(),
                    category_id: resolution.category.as_ref().map(|c| c.id.clone()),
                })))
            }
            Some(ResolvedSubcategory::Shared(virtual_sub)) => self
                .resolve_products_for_shared_subcategory(virtual_sub)
                .await
                .map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCatalog;
    use crate::taxonomy::shared_subcategory::SharedSubcategory;

    fn resolver_with(store: &MemoryCatalog) -> SubcategoryResolver {
        SubcategoryResolver::new(
            Arc::new(store.clone()),
            Arc::new(SharedSubcategoryConfig::builtin()),
        )
    }

    fn seeded() -> MemoryCatalog {
        let store = MemoryCatalog::default();
        store.add_category(CategoryRecord::new("10", "Office Range", Some("office-range")));
        store.add_category(CategoryRecord::new("20", "Dining", Some("dining")));
        store.add_subcategory(SubcategoryRecord::new(
            "100",
            "Executive Chairs",
            Some("executive-chairs"),
            Some("10"),
        ));
        store.add_subcategory(SubcategoryRecord::new("200", "Dining Tables", None, Some("20")));
        store
    }

    #[tokio::test]
    async fn test_shared_route_yields_virtual_subcategory() {
        let store = seeded();
        let resolver = resolver_with(&store);

        let resolution = resolver
            .resolve_category_and_subcategory("office-range", "visitor-office-chairs")
            .await
            .unwrap();
        let category = resolution.category.as_ref().unwrap();
        match resolution.subcategory.as_ref().unwrap() {
            ResolvedSubcategory::Shared(sub) => {
                assert_eq!(sub.category_id, category.id);
                assert_eq!(sub.id, "shared-visitor-office-chairs");
            }
            other => panic!("expected shared subcategory, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_direct_route() {
        let store = seeded();
        let resolver = resolver_with(&store);

        let resolution = resolver
            .resolve_category_and_subcategory("office-range", "executive-chairs")
            .await
            .unwrap();
        assert!(resolution.is_found());
        assert_eq!(resolution.subcategory.as_ref().unwrap().id(), "100");

        let selection = resolver.product_selection(&resolution).await.unwrap().unwrap();
        assert_eq!(selection.precision, Precision::Exact);
        assert_eq!(
            selection.filter,
            ProductFilter::Subcategory {
                subcategory_id: "100".into(),
                category_id: Some("10".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_direct_route_by_name_when_slug_missing() {
        let store = seeded();
        let resolver = resolver_with(&store);
        let resolution = resolver
            .resolve_category_and_subcategory("dining", "dining-tables")
            .await
            .unwrap();
        assert_eq!(resolution.subcategory.map(|s| s.id().to_string()), Some("200".into()));
    }

    #[tokio::test]
    async fn test_subcategory_of_another_category_is_not_found() {
        let store = seeded();
        let resolver = resolver_with(&store);
        let resolution = resolver
            .resolve_category_and_subcategory("dining", "executive-chairs")
            .await
            .unwrap();
        assert!(resolution.category.is_some());
        assert!(resolution.subcategory.is_none());
        assert!(resolver.product_selection(&resolution).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let store = seeded();
        let resolver = resolver_with(&store);
        let resolution = resolver
            .resolve_category_and_subcategory("garden", "loungers")
            .await
            .unwrap();
        assert_eq!(resolution, RouteResolution::default());
    }

    #[tokio::test]
    async fn test_route_wider_than_category_is_not_found() {
        let store = seeded();
        let resolver = resolver_with(&store);
        let resolution = resolver
            .resolve_category_and_subcategory("clearance-dining-sale", "dining-tables")
            .await
            .unwrap();
        assert_eq!(resolution, RouteResolution::default());
    }

    #[tokio::test]
    async fn test_short_route_finds_longer_category_name() {
        let store = seeded();
        let resolver = resolver_with(&store);
        let category = resolver.resolve_category("office").await.unwrap().unwrap();
        assert_eq!(category.id, "10");
    }

    #[tokio::test]
    async fn test_shared_products_prefer_genuine_row() {
        let store = seeded();
        store.add_subcategory(SubcategoryRecord::new(
            "300",
            "Bar Stools",
            Some("bar-stools"),
            Some("20"),
        ));
        let resolver = resolver_with(&store);
        let resolution = resolver
            .resolve_category_and_subcategory("dining", "bar-stools")
            .await
            .unwrap();
        let Some(ResolvedSubcategory::Shared(sub)) = &resolution.subcategory else {
            panic!("bar stools are shared under dining");
        };
        let selection = resolver.resolve_products_for_shared_subcategory(sub).await.unwrap();
        assert_eq!(selection.precision, Precision::Exact);
        assert_eq!(
            selection.filter,
            ProductFilter::Subcategory {
                subcategory_id: "300".into(),
                category_id: None,
            }
        );
    }

    #[tokio::test]
    async fn test_shared_products_fall_back_to_flag_then_text() {
        let store = seeded();
        let resolver = SubcategoryResolver::new(
            Arc::new(store.clone()),
            Arc::new(SharedSubcategoryConfig::new(vec![
                SharedSubcategory::new("Visitor Sofas", &["office"]).with_flag(ProductFlag::VisitorSofa),
                SharedSubcategory::new("Reception Desks", &["office"]),
            ])),
        );

        let sofas = VirtualSubcategory::from_entry(&resolver.shared().entries()[0], &store.categories()[0]);
        let selection = resolver.resolve_products_for_shared_subcategory(&sofas).await.unwrap();
        assert!(selection.is_approximate());
        assert_eq!(selection.filter, ProductFilter::Flag(ProductFlag::VisitorSofa));

        let desks = VirtualSubcategory::from_entry(&resolver.shared().entries()[1], &store.categories()[0]);
        let selection = resolver.resolve_products_for_shared_subcategory(&desks).await.unwrap();
        assert!(selection.is_approximate());
        assert_eq!(selection.filter, ProductFilter::Text("Reception Desks".into()));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let store = seeded();
        let resolver = resolver_with(&store);
        store.set_unavailable(true);
        let err = resolver
            .resolve_category_and_subcategory("office-range", "executive-chairs")
            .await
            .unwrap_err();
        assert!(matches!(err, shared::StoreError::Unavailable(_)));
    }
}
