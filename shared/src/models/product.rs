//! Product Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product row as stored by the hosted backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(deserialize_with = "serde_helpers::id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::option_id::deserialize")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::option_id::deserialize")]
    pub subcategory_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_visitor_sofa: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_new_arrival: bool,
}

impl ProductRecord {
    /// Value of a boolean flag column
    pub fn has_flag(&self, flag: ProductFlag) -> bool {
        match flag {
            ProductFlag::VisitorSofa => self.is_visitor_sofa,
            ProductFlag::Featured => self.is_featured,
            ProductFlag::NewArrival => self.is_new_arrival,
        }
    }

    /// Whether this product passes the filter
    ///
    /// Text filters are a case-insensitive substring test over name and
    /// description, the same thing an `ilike '%needle%'` query does.
    pub fn matches(&self, filter: &ProductFilter) -> bool {
        match filter {
            ProductFilter::Subcategory {
                subcategory_id,
                category_id,
            } => {
                self.subcategory_id.as_deref() == Some(subcategory_id.as_str())
                    && category_id
                        .as_deref()
                        .is_none_or(|c| self.category_id.as_deref() == Some(c))
            }
            ProductFilter::Flag(flag) => self.has_flag(*flag),
            ProductFilter::Text(needle) => {
                let needle = needle.trim().to_lowercase();
                if needle.is_empty() {
                    return false;
                }
                self.name.to_lowercase().contains(&needle)
                    || self
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Insert payload produced by the bulk import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub is_visitor_sofa: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
}

/// Boolean product columns that a shared subcategory can map onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductFlag {
    #[serde(rename = "is_visitor_sofa")]
    VisitorSofa,
    #[serde(rename = "is_featured")]
    Featured,
    #[serde(rename = "is_new_arrival")]
    NewArrival,
}

impl ProductFlag {
    /// Backend column name
    pub fn column(&self) -> &'static str {
        match self {
            ProductFlag::VisitorSofa => "is_visitor_sofa",
            ProductFlag::Featured => "is_featured",
            ProductFlag::NewArrival => "is_new_arrival",
        }
    }
}

impl std::fmt::Display for ProductFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Product query filter used by category/subcategory listing routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProductFilter {
    /// Products linked to a real backend subcategory row
    Subcategory {
        subcategory_id: String,
        category_id: Option<String>,
    },
    /// Products with a boolean flag set
    Flag(ProductFlag),
    /// Name/description substring search
    Text(String),
}
