//! Catalog tables and image storage over the backend REST API

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{
    CategoryRecord, CategoryUpsert, NewProduct, ProductFilter, ProductRecord, SubcategoryRecord,
    SubcategoryUpsert,
};
use shared::{CatalogStore, ImageStorage, StoreResult};

const CATEGORIES: &str = "rest/v1/categories";
const SUBCATEGORIES: &str = "rest/v1/subcategories";
const PRODUCTS: &str = "rest/v1/products";

const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=representation";

/// Objects requested per storage listing page
pub const STORAGE_PAGE_SIZE: usize = 1000;

/// Rows requested per table page; at or below the backend's max-rows cap
pub const TABLE_PAGE_SIZE: usize = 1000;

/// Hosted backend as a [`CatalogStore`] and [`ImageStorage`]
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: HttpClient,
    bucket: String,
}

#[derive(Debug, Serialize)]
struct ListObjectsRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    #[serde(rename = "sortBy")]
    sort_by: SortBy,
}

#[derive(Debug, Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

#[derive(Debug, Deserialize)]
struct StoredObject {
    name: String,
    /// Folders come back without an id
    #[serde(default)]
    id: Option<String>,
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// Characters with meaning inside a PostgREST `or=(...)` expression
fn sanitize_pattern(needle: &str) -> String {
    needle
        .chars()
        .map(|c| match c {
            ',' | '(' | ')' | '"' | '*' | '%' => ' ',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Query pairs selecting products for a filter
fn product_query(filter: &ProductFilter) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "*".to_string())];
    match filter {
        ProductFilter::Subcategory {
            subcategory_id,
            category_id,
        } => {
            query.push(("subcategory_id", eq(subcategory_id)));
            if let Some(category_id) = category_id {
                query.push(("category_id", eq(category_id)));
            }
        }
        ProductFilter::Flag(flag) => query.push((flag.column(), "is.true".to_string())),
        ProductFilter::Text(needle) => {
            let needle = sanitize_pattern(needle);
            query.push((
                "or",
                format!("(name.ilike.*{needle}*,description.ilike.*{needle}*)"),
            ));
        }
    }
    query
}

impl HttpCatalog {
    /// Create a catalog client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            bucket: config.bucket.clone(),
        })
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Every row matching `query`, fetched in `id`-ordered pages
    async fn get_all<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Vec<T>> {
        let mut rows = Vec::new();
        let mut offset = 0;

        loop {
            let page_query = paged_query(query, offset);
            let page: Vec<T> = self.http.get(table, &page_query).await?;
            let page_len = page.len();
            rows.extend(page);

            if page_len < TABLE_PAGE_SIZE {
                break;
            }
            offset += page_len;
        }

        tracing::debug!(table, count = rows.len(), "Listed table rows");
        Ok(rows)
    }

    async fn first_or_none<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Option<T>> {
        let rows: Vec<T> = self.http.get(table, query).await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert_one<T, B>(&self, table: &str, body: &B) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize,
    {
        let rows: Vec<T> = self
            .http
            .post(
                table,
                &[("on_conflict", "slug".to_string())],
                std::slice::from_ref(body),
                Some(UPSERT_PREFER),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse(format!("Upsert into {} returned no rows", table)))
    }

    async fn list_objects(&self, prefix: &str) -> ClientResult<Vec<String>> {
        let path = format!("storage/v1/object/list/{}", self.bucket);
        let mut names = Vec::new();
        let mut offset = 0;

        loop {
            let request = ListObjectsRequest {
                prefix,
                limit: STORAGE_PAGE_SIZE,
                offset,
                sort_by: SortBy {
                    column: "name",
                    order: "asc",
                },
            };
            let page: Vec<StoredObject> = self.http.post(&path, &[], &request, None).await?;
            let page_len = page.len();
            names.extend(
                page.into_iter()
                    .filter(|o| o.id.is_some() && !o.name.starts_with('.'))
                    .map(|o| o.name),
            );

            if page_len < STORAGE_PAGE_SIZE {
                break;
            }
            offset += page_len;
        }

        tracing::debug!(bucket = %self.bucket, prefix, count = names.len(), "Listed stored images");
        Ok(names)
    }
}

#[async_trait]
impl CatalogStore for HttpCatalog {
    async fn list_categories(&self) -> StoreResult<Vec<CategoryRecord>> {
        Ok(self.get_all(CATEGORIES, &[("select", "*".to_string())]).await?)
    }

    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
    ) -> StoreResult<Vec<SubcategoryRecord>> {
        let mut query = vec![("select", "*".to_string())];
        if let Some(category_id) = category_id {
            query.push(("category_id", eq(category_id)));
        }
        Ok(self.get_all(SUBCATEGORIES, &query).await?)
    }

    async fn find_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRecord>> {
        let query = [
            ("select", "*".to_string()),
            ("slug", eq(slug)),
            ("limit", "1".to_string()),
        ];
        Ok(self.first_or_none(CATEGORIES, &query).await?)
    }

    async fn find_subcategory(
        &self,
        slug: &str,
        category_id: Option<&str>,
    ) -> StoreResult<Option<SubcategoryRecord>> {
        let mut query = vec![("select", "*".to_string()), ("slug", eq(slug))];
        if let Some(category_id) = category_id {
            query.push(("category_id", eq(category_id)));
        }
        query.push(("limit", "1".to_string()));
        Ok(self.first_or_none(SUBCATEGORIES, &query).await?)
    }

    async fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<ProductRecord>> {
        Ok(self.get_all(PRODUCTS, &product_query(filter)).await?)
    }

    async fn upsert_category(&self, name: &str, slug: &str) -> StoreResult<CategoryRecord> {
        let body = CategoryUpsert {
            name: name.to_string(),
            slug: slug.to_string(),
        };
        Ok(self.upsert_one(CATEGORIES, &body).await?)
    }

    async fn upsert_subcategory(
        &self,
        name: &str,
        slug: &str,
        category_id: Option<&str>,
    ) -> StoreResult<SubcategoryRecord> {
        let body = SubcategoryUpsert {
            name: name.to_string(),
            slug: slug.to_string(),
            category_id: category_id.map(str::to_string),
        };
        Ok(self.upsert_one(SUBCATEGORIES, &body).await?)
    }

    async fn insert_products(&self, products: &[NewProduct]) -> StoreResult<usize> {
        if products.is_empty() {
            return Ok(0);
        }
        self.http.post_no_content(PRODUCTS, products).await?;
        Ok(products.len())
    }
}

#[async_trait]
impl ImageStorage for HttpCatalog {
    async fn list_stored_image_filenames(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self.list_objects(prefix.trim_matches('/')).await?)
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.http.base_url(),
            self.bucket,
            path.trim_start_matches('/')
        )
    }
}

/// `query` plus a stable order and one page window
fn paged_query<'a>(query: &[(&'a str, String)], offset: usize) -> Vec<(&'a str, String)> {
    let mut paged = query.to_vec();
    paged.push(("order", "id.asc".to_string()));
    paged.push(("limit", TABLE_PAGE_SIZE.to_string()));
    paged.push(("offset", offset.to_string()));
    paged
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductFlag;

    #[test]
    fn test_product_query_subcategory() {
        let query = product_query(&ProductFilter::Subcategory {
            subcategory_id: "12".into(),
            category_id: Some("3".into()),
        });
        assert!(query.contains(&("subcategory_id", "eq.12".to_string())));
        assert!(query.contains(&("category_id", "eq.3".to_string())));
    }

    #[test]
    fn test_product_query_flag() {
        let query = product_query(&ProductFilter::Flag(ProductFlag::VisitorSofa));
        assert!(query.contains(&("is_visitor_sofa", "is.true".to_string())));
    }

    #[test]
    fn test_product_query_text_is_sanitized() {
        let query = product_query(&ProductFilter::Text("Sofas (2, seat)".into()));
        let (_, or) = query.iter().find(|(k, _)| *k == "or").unwrap();
        assert_eq!(
            or,
            "(name.ilike.*Sofas  2  seat*,description.ilike.*Sofas  2  seat*)"
        );
    }

    #[test]
    fn test_paged_query_keeps_filters() {
        let query = paged_query(&[("category_id", "eq.3".to_string())], 2000);
        assert_eq!(
            query,
            vec![
                ("category_id", "eq.3".to_string()),
                ("order", "id.asc".to_string()),
                ("limit", TABLE_PAGE_SIZE.to_string()),
                ("offset", "2000".to_string()),
            ]
        );
    }

    #[test]
    fn test_public_url() {
        let catalog = HttpCatalog::new(
            &ClientConfig::new("http://localhost:54321/", "anon").with_bucket("images"),
        )
        .unwrap();
        assert_eq!(
            catalog.public_url("/products/chair.jpg"),
            "http://localhost:54321/storage/v1/object/public/images/products/chair.jpg"
        );
    }
}
