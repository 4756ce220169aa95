//! Category taxonomy engine
//!
//! - `normalize` / `slug`: comparison keys and URL slugs for names
//! - `matcher`: name matching against backend records
//! - `image_match`: scored matching of product names to stored image files
//! - `canonical` / `tree`: the fixed navigation taxonomy and its assembly
//! - `shared_subcategory` / `resolver`: cross-listed subcategories and route resolution

pub mod canonical;
pub mod image_match;
pub mod matcher;
pub mod normalize;
pub mod resolver;
pub mod shared_subcategory;
pub mod slug;
pub mod tree;

pub use canonical::{CanonicalTaxonomy, TaxonomyGroup};
pub use image_match::{
    ImageIndex, ImageMatch, ImageMatchCandidate, base_filename_for_comparison,
    find_best_image_match, match_image_url,
};
pub use matcher::{MatchMode, Named, find_best_match, find_match, names_match};
pub use normalize::{clean_html, normalize_category_name, normalize_with_corrections};
pub use resolver::{
    Precision, ProductSelection, ResolvedSubcategory, RouteResolution, SubcategoryResolver,
    VirtualSubcategory,
};
pub use shared_subcategory::{SharedSubcategory, SharedSubcategoryConfig};
pub use slug::{canonical_slug, simple_slugify};
pub use tree::assemble_category_tree;
