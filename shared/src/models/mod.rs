//! Data models
//!
//! Rows exchanged with the hosted catalog backend plus the navigation types
//! handed to page rendering. All ids are strings; see [`serde_helpers`].

pub mod category;
pub mod navigation;
pub mod product;
pub mod serde_helpers;
pub mod subcategory;

// Re-exports
pub use category::*;
pub use navigation::*;
pub use product::*;
pub use subcategory::*;
