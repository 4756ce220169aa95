//! Shared types for the storefront workspace
//!
//! Backend record types, navigation tree types, the catalog/storage
//! collaborator traits and the unified error system.

pub mod error;
pub mod models;
pub mod store;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
pub use store::{CatalogStore, ImageStorage, StoreError, StoreResult};
