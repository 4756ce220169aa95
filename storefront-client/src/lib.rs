//! Storefront Client - REST client for the hosted catalog backend
//!
//! Talks to the backend's table API and object storage, and implements the
//! [`shared::CatalogStore`] and [`shared::ImageStorage`] traits on top of it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;

pub use catalog::HttpCatalog;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
