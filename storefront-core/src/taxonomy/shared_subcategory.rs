//! Shared Subcategory Declarations
//!
//! A backend subcategory row links to one category, but some subcategories
//! are browsable under several groups. Those are declared here, once, and
//! handed to the resolver.

use super::normalize::normalize_category_name;
use super::slug::{canonical_slug, simple_slugify};
use serde::{Deserialize, Serialize};
use shared::models::{CategoryRecord, ProductFlag};
use shared::{AppError, AppResult, ErrorCode};
use std::collections::HashSet;

/// A subcategory listed under more than one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSubcategory {
    /// Stable id of the virtual subcategory
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Category slugs or name fragments this subcategory is listed under
    pub owners: Vec<String>,
    /// Product flag carrying exactly this subcategory, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<ProductFlag>,
}

impl SharedSubcategory {
    pub fn new(name: impl Into<String>, owners: &[&str]) -> Self {
        let name = name.into();
        let slug = canonical_slug(&name);
        Self {
            id: format!("shared-{}", slug),
            name,
            slug,
            owners: owners.iter().map(|o| o.to_string()).collect(),
            flag: None,
        }
    }

    pub fn with_flag(mut self, flag: ProductFlag) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Whether the category reached through `route_slug` owns this entry
    ///
    /// Owners match the route slug, the category's slug, or appear in the
    /// category's normalized name (and vice versa), which absorbs naming
    /// drift between taxonomy groups and backend categories.
    pub fn is_owned_by(&self, route_slug: &str, category: &CategoryRecord) -> bool {
        let category_slug = category
            .stored_slug()
            .map(str::to_string)
            .unwrap_or_else(|| canonical_slug(&category.name));
        let category_name = normalize_category_name(&category.name);

        self.owners.iter().any(|owner| {
            let owner_slug = simple_slugify(owner);
            if owner_slug.is_empty() {
                return false;
            }
            if owner_slug == route_slug || owner_slug == category_slug {
                return true;
            }
            let fragment = normalize_category_name(owner);
            !fragment.is_empty()
                && !category_name.is_empty()
                && (category_name.contains(&fragment) || fragment.contains(&category_name))
        })
    }
}

/// Immutable set of shared subcategory declarations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedSubcategoryConfig {
    entries: Vec<SharedSubcategory>,
}

impl SharedSubcategoryConfig {
    pub fn new(entries: Vec<SharedSubcategory>) -> Self {
        Self { entries }
    }

    /// The storefront's cross-listed subcategories
    pub fn builtin() -> Self {
        Self::new(vec![
            SharedSubcategory::new(
                "Visitor Office Chairs",
                &["office-range", "hospitality-range", "office"],
            ),
            SharedSubcategory::new(
                "Visitor Sofas",
                &["living-room-range", "hospitality-range", "office", "reception"],
            )
            .with_flag(ProductFlag::VisitorSofa),
            SharedSubcategory::new("Bar Stools", &["dining-range", "hospitality-range"]),
            SharedSubcategory::new("Filing Cabinets", &["office-range", "storage-range"]),
        ])
    }

    pub fn entries(&self) -> &[SharedSubcategory] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by subcategory slug
    pub fn get(&self, subcategory_slug: &str) -> Option<&SharedSubcategory> {
        self.entries.iter().find(|e| e.slug == subcategory_slug)
    }

    /// Entry for this subcategory slug if the category owns it
    pub fn lookup(
        &self,
        route_slug: &str,
        category: &CategoryRecord,
        subcategory_slug: &str,
    ) -> Option<&SharedSubcategory> {
        self.get(subcategory_slug)
            .filter(|entry| entry.is_owned_by(route_slug, category))
    }

    /// Check ids and slugs are unique and every entry has an owner
    pub fn validate(&self) -> AppResult<()> {
        let invalid = |msg: String| AppError::with_message(ErrorCode::SharedSubcategoryInvalid, msg);

        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for entry in &self.entries {
            if entry.id.trim().is_empty() || entry.name.trim().is_empty() {
                return Err(invalid("Shared subcategory needs an id and a name".to_string()));
            }
            if entry.slug != simple_slugify(&entry.slug) || entry.slug.is_empty() {
                return Err(invalid(format!("Invalid slug '{}'", entry.slug)));
            }
            if entry.owners.iter().all(|o| simple_slugify(o).is_empty()) {
                return Err(invalid(format!("'{}' has no owners", entry.name)));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(invalid(format!("Duplicate id '{}'", entry.id)));
            }
            if !slugs.insert(entry.slug.as_str()) {
                return Err(invalid(format!("Duplicate slug '{}'", entry.slug)));
            }
        }
        Ok(())
    }
}
