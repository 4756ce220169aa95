//! Fuzzy Name Matcher
//!
//! Pairs a free-text name (CSV cell, taxonomy child, route fragment) with
//! named backend records.

use super::normalize::normalize_category_name;
use super::slug::simple_slugify;
use shared::models::{CategoryRecord, SubcategoryRecord};

/// Anything with a display name that can be matched
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for CategoryRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for SubcategoryRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for str {
    fn name(&self) -> &str {
        self
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// How loosely candidates are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Normalized names or plain slugs are equal
    #[default]
    Exact,
    /// Exact first, then a candidate whose canonical slug contains the
    /// target's on hyphen-segment boundaries (`"office"` finds
    /// "Office Furniture", never the reverse)
    Containment,
}

/// Precomputed comparison keys for one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKey {
    pub normalized: String,
    pub slug: String,
    pub canonical: String,
}

impl MatchKey {
    pub fn new(name: &str) -> Self {
        let normalized = normalize_category_name(name);
        Self {
            slug: simple_slugify(name),
            canonical: simple_slugify(&normalized),
            normalized,
        }
    }

    /// True when no key can match anything
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty() && self.slug.is_empty()
    }

    /// Normalized-name or slug equality; empty keys never match
    pub fn matches_exact(&self, other: &MatchKey) -> bool {
        (!self.normalized.is_empty() && self.normalized == other.normalized)
            || (!self.slug.is_empty() && self.slug == other.slug)
    }

    /// `candidate`'s canonical slug contains this one on segment boundaries
    pub fn contained_in(&self, candidate: &MatchKey) -> bool {
        segment_contains(&candidate.canonical, &self.canonical)
    }
}

/// Whether hyphen-separated `needle` appears in `haystack` as whole segments
///
/// `segment_contains("office-furniture", "office")` holds,
/// `segment_contains("officer-desks", "office")` does not.
pub fn segment_contains(haystack: &str, needle: &str) -> bool {
    if haystack.is_empty() || needle.is_empty() {
        return false;
    }
    format!("-{}-", haystack).contains(&format!("-{}-", needle))
}

/// Whether two names describe the same concept (exact mode)
pub fn names_match(a: &str, b: &str) -> bool {
    MatchKey::new(a).matches_exact(&MatchKey::new(b))
}

/// First candidate whose name matches `target` exactly
///
/// Ties go to the earliest candidate in input order.
pub fn find_best_match<'a, C, I>(target: &str, candidates: I) -> Option<&'a C>
where
    C: Named + ?Sized + 'a,
    I: IntoIterator<Item = &'a C>,
{
    find_match(target, candidates, MatchMode::Exact)
}

/// Match `target` against `candidates` in the given mode
pub fn find_match<'a, C, I>(target: &str, candidates: I, mode: MatchMode) -> Option<&'a C>
where
    C: Named + ?Sized + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let target = MatchKey::new(target);
    if target.is_empty() {
        return None;
    }

    let keyed: Vec<(&'a C, MatchKey)> = candidates
        .into_iter()
        .map(|c| (c, MatchKey::new(c.name())))
        .collect();

    if let Some((c, _)) = keyed.iter().find(|(_, key)| target.matches_exact(key)) {
        return Some(*c);
    }

    match mode {
        MatchMode::Exact => None,
        MatchMode::Containment => keyed
            .iter()
            .find(|(_, key)| target.contained_in(key))
            .map(|(c, _)| *c),
    }
}
