//! Canonical Taxonomy
//!
//! The retailer's merchandising groups and the subcategories each group is
//! expected to list, in menu order. This is business data: it is not derived
//! from the backend, and navigation keeps its shape even when the backend is
//! missing rows.

use super::slug::canonical_slug;
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult};
use std::collections::HashSet;

/// One top-level navigation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyGroup {
    pub name: String,
    pub children: Vec<String>,
}

impl TaxonomyGroup {
    pub fn new(name: impl Into<String>, children: &[&str]) -> Self {
        Self {
            name: name.into(),
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Group slug used for the navigation id and route
    pub fn slug(&self) -> String {
        canonical_slug(&self.name)
    }
}

/// Ordered list of navigation groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalTaxonomy {
    groups: Vec<TaxonomyGroup>,
}

impl CanonicalTaxonomy {
    pub fn new(groups: Vec<TaxonomyGroup>) -> Self {
        Self { groups }
    }

    /// The retailer's seven merchandising groups
    pub fn builtin() -> Self {
        Self::new(vec![
            TaxonomyGroup::new(
                "Office Range",
                &[
                    "Executive Chairs",
                    "Visitor Office Chairs",
                    "Office Desks",
                    "Conference Tables",
                    "Filing Cabinets",
                    "Workstations",
                ],
            ),
            TaxonomyGroup::new(
                "Dining Range",
                &["Dining Tables", "Dining Chairs", "Bar Stools", "Buffets & Sideboards"],
            ),
            TaxonomyGroup::new(
                "Living Room Range",
                &["Sofas", "Visitor Sofas", "Coffee Tables", "TV Units", "Recliners"],
            ),
            TaxonomyGroup::new(
                "Bedroom Range",
                &["Beds", "Wardrobes", "Bedside Tables", "Dressers"],
            ),
            TaxonomyGroup::new(
                "Outdoor Range",
                &["Garden Sets", "Loungers", "Outdoor Tables", "Outdoor Chairs"],
            ),
            TaxonomyGroup::new(
                "Storage Range",
                &["Bookshelves", "Cabinets", "Shoe Racks", "Filing Cabinets"],
            ),
            TaxonomyGroup::new(
                "Hospitality Range",
                &[
                    "Reception Sofas",
                    "Visitor Sofas",
                    "Cafe Tables",
                    "Cafe Chairs",
                    "Bar Stools",
                ],
            ),
        ])
    }

    pub fn groups(&self) -> &[TaxonomyGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group by its slug
    pub fn group(&self, slug: &str) -> Option<&TaxonomyGroup> {
        self.groups.iter().find(|g| g.slug() == slug)
    }

    /// Check names are usable and slugs do not collide
    pub fn validate(&self) -> AppResult<()> {
        if self.groups.is_empty() {
            return Err(AppError::taxonomy("Taxonomy has no groups"));
        }

        let mut group_slugs = HashSet::new();
        for group in &self.groups {
            let slug = group.slug();
            if slug.is_empty() {
                return Err(AppError::taxonomy(format!(
                    "Group name '{}' has no usable characters",
                    group.name
                )));
            }
            if !group_slugs.insert(slug.clone()) {
                return Err(AppError::taxonomy(format!("Duplicate group '{}'", group.name))
                    .with_detail("slug", slug));
            }

            let mut child_slugs = HashSet::new();
            for child in &group.children {
                let child_slug = canonical_slug(child);
                if child_slug.is_empty() {
                    return Err(AppError::taxonomy(format!(
                        "Child name '{}' in group '{}' has no usable characters",
                        child, group.name
                    )));
                }
                if !child_slugs.insert(child_slug) {
                    return Err(AppError::taxonomy(format!(
                        "Duplicate child '{}' in group '{}'",
                        child, group.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for CanonicalTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_builtin_is_valid() {
        let taxonomy = CanonicalTaxonomy::builtin();
        assert_eq!(taxonomy.len(), 7);
        taxonomy.validate().unwrap();
        assert_eq!(taxonomy.groups()[0].slug(), "office-range");
        assert!(taxonomy.group("hospitality-range").is_some());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let taxonomy = CanonicalTaxonomy::new(vec![
            TaxonomyGroup::new("Office Range", &["Desks"]),
            TaxonomyGroup::new("office  range", &["Chairs"]),
        ]);
        let err = taxonomy.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::TaxonomyInvalid);
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let taxonomy = CanonicalTaxonomy::new(vec![TaxonomyGroup::new(
            "Dining Range",
            &["Dining Tables", "dining tabels"],
        )]);
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(CanonicalTaxonomy::new(vec![]).validate().is_err());
        let blank = CanonicalTaxonomy::new(vec![TaxonomyGroup::new("  ", &[])]);
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"[{"name": "Kids Range", "children": ["Bunk Beds", "Study Desks"]}]"#;
        let taxonomy: CanonicalTaxonomy = serde_json::from_str(json).unwrap();
        assert_eq!(taxonomy.len(), 1);
        assert_eq!(taxonomy.groups()[0].children[1], "Study Desks");
    }
}
