//! Category Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};

/// Category row as stored by the hosted backend
///
/// `slug` may be missing or stale: CSV imports do not always recompute it,
/// so readers derive it from `name` when they need one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(deserialize_with = "serde_helpers::id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl CategoryRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.map(str::to_string),
        }
    }

    /// Stored slug, ignoring empty strings
    pub fn stored_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Upsert category payload (get-or-create keyed by slug)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpsert {
    pub name: String,
    pub slug: String,
}
