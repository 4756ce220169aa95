//! Storefront Core - furniture catalog taxonomy engine
//!
//! # Overview
//!
//! Turns a loosely curated product catalog into navigable storefront menus:
//!
//! - **Taxonomy** (`taxonomy`): name normalization, slugs, fuzzy matching,
//!   image filename matching, navigation tree assembly and route resolution
//! - **Import** (`import`): CSV bulk import with category and image linking
//! - **Services** (`services`): `CatalogService` facade over one backend
//! - **Store** (`store`): in-memory backend for tests and local runs
//!
//! # Layout
//!
//! ```text
//! storefront-core/src/
//! ├── core/          # configuration, taxonomy file
//! ├── import/        # CSV rows and import pipeline
//! ├── services/      # catalog facade
//! ├── store/         # in-memory backend
//! ├── taxonomy/      # matching, tree, resolver
//! └── utils/         # logging
//! ```

pub mod core;
pub mod import;
pub mod services;
pub mod store;
pub mod taxonomy;
pub mod utils;

// Re-export public types
pub use core::{CoreConfig, TaxonomyFile};
pub use import::{ImportOptions, ImportPipeline, ImportReport, RawProductRow};
pub use services::{CatalogService, ProductListing};
pub use store::MemoryCatalog;
pub use taxonomy::{
    CanonicalTaxonomy, Precision, ProductSelection, ResolvedSubcategory, RouteResolution,
    SharedSubcategoryConfig, SubcategoryResolver, assemble_category_tree, clean_html,
    find_best_image_match, find_best_match, normalize_category_name, simple_slugify,
};

// Re-export unified error types from shared
pub use shared::{AppError, AppResult, ErrorCode, StoreError, StoreResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
