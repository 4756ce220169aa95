//! Category Tree Assembler
//!
//! Builds the navigation tree from the canonical taxonomy, resolving each
//! expected child against live backend subcategories.

use super::canonical::{CanonicalTaxonomy, TaxonomyGroup};
use super::matcher::find_best_match;
use super::normalize::normalize_category_name;
use super::slug::canonical_slug;
use shared::models::{CategoryRecord, StructuredCategory, StructuredSubcategory, SubcategoryRecord};
use std::collections::HashSet;

/// Tokens too generic to tie a backend category to a group
const GENERIC_TOKENS: &[&str] = &["range", "furniture", "and", "the", "collection", "items"];

fn significant_tokens(name: &str) -> HashSet<String> {
    normalize_category_name(name)
        .split(' ')
        .filter(|t| !t.is_empty() && !GENERIC_TOKENS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Subcategories linked to backend categories that look like this group
fn preferred_pool<'a>(
    group: &TaxonomyGroup,
    categories: &[CategoryRecord],
    subcategories: &'a [SubcategoryRecord],
) -> Vec<&'a SubcategoryRecord> {
    let group_tokens = significant_tokens(&group.name);
    let related: HashSet<&str> = categories
        .iter()
        .filter(|c| !significant_tokens(&c.name).is_disjoint(&group_tokens))
        .map(|c| c.id.as_str())
        .collect();

    if related.is_empty() {
        return Vec::new();
    }
    subcategories
        .iter()
        .filter(|s| s.category_id.as_deref().is_some_and(|id| related.contains(id)))
        .collect()
}

fn resolved(record: &SubcategoryRecord) -> StructuredSubcategory {
    StructuredSubcategory {
        id: record.id.clone(),
        name: record.name.clone(),
        slug: record
            .stored_slug()
            .map(str::to_string)
            .unwrap_or_else(|| canonical_slug(&record.name)),
        is_placeholder: false,
    }
}

/// Navigation link for a child with no backend row
pub fn placeholder(child: &str) -> StructuredSubcategory {
    let slug = canonical_slug(child);
    StructuredSubcategory {
        id: slug.clone(),
        name: child.to_string(),
        slug,
        is_placeholder: true,
    }
}

/// Assemble the navigation tree
///
/// One entry per canonical group, in canonical order, whatever the backend
/// holds. Children keep canonical order; children without a backend match
/// become placeholders.
pub fn assemble_category_tree(
    taxonomy: &CanonicalTaxonomy,
    categories: &[CategoryRecord],
    subcategories: &[SubcategoryRecord],
) -> Vec<StructuredCategory> {
    taxonomy
        .groups()
        .iter()
        .map(|group| {
            let group_slug = group.slug();
            let preferred = preferred_pool(group, categories, subcategories);

            let children = group
                .children
                .iter()
                .map(|child| {
                    let found = find_best_match(child, preferred.iter().copied())
                        .or_else(|| find_best_match(child, subcategories));
                    match found {
                        Some(record) => resolved(record),
                        None => {
                            tracing::warn!(group = %group.name, child = %child, "No backend subcategory for taxonomy child, using placeholder");
                            placeholder(child)
                        }
                    }
                })
                .collect();

            StructuredCategory {
                id: group_slug.clone(),
                name: group.name.clone(),
                slug: group_slug,
                subcategories: children,
            }
        })
        .collect()
}
