//! Navigation tree types
//!
//! Presentation-ready output of the category tree assembler. Group ids and
//! slugs come from the display group name, not from backend category rows.

use serde::{Deserialize, Serialize};

/// Top-level merchandising group in the navigation menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub subcategories: Vec<StructuredSubcategory>,
}

/// Child link under a navigation group
///
/// Either a resolved backend subcategory or a placeholder (`id == slug`),
/// rendered so the menu keeps its canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredSubcategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_placeholder: bool,
}

impl StructuredCategory {
    /// Children that point at live backend rows
    pub fn resolved_subcategories(&self) -> impl Iterator<Item = &StructuredSubcategory> {
        self.subcategories.iter().filter(|s| !s.is_placeholder)
    }

    /// Child by slug
    pub fn subcategory(&self, slug: &str) -> Option<&StructuredSubcategory> {
        self.subcategories.iter().find(|s| s.slug == slug)
    }
}
