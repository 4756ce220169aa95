//! Subcategory Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};

/// Subcategory row as stored by the hosted backend
///
/// The backend links a subcategory to at most one category. Listing the same
/// subcategory under several categories is handled by shared subcategory
/// declarations, not by this row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryRecord {
    #[serde(deserialize_with = "serde_helpers::id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::option_id::deserialize")]
    pub category_id: Option<String>,
}

impl SubcategoryRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: Option<&str>,
        category_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.map(str::to_string),
            category_id: category_id.map(str::to_string),
        }
    }

    /// Stored slug, ignoring empty strings
    pub fn stored_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Whether this row is linked to the given category
    pub fn belongs_to(&self, category_id: &str) -> bool {
        self.category_id.as_deref() == Some(category_id)
    }
}

/// Upsert subcategory payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryUpsert {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}
