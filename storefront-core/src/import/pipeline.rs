//! Bulk product import
//!
//! Turns raw spreadsheet rows into product inserts: names cleaned, prices
//! parsed, categories and subcategories matched or created, images matched
//! against the storage listing. Bad rows are reported, never fatal; only
//! backend failures abort a run.

use super::row::{CsvRows, RawProductRow, parse_flag, parse_price, read_csv};
use crate::taxonomy::image_match::{ImageIndex, match_image_url};
use crate::taxonomy::matcher::find_best_match;
use crate::taxonomy::normalize::clean_html;
use crate::taxonomy::slug::canonical_slug;
use serde::Serialize;
use shared::models::{CategoryRecord, NewProduct, SubcategoryRecord};
use shared::util::now_millis;
use shared::{AppResult, CatalogStore, ErrorCode, ImageStorage};
use std::io::Read;
use std::sync::Arc;

/// Import settings
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Storage folder holding product images
    pub image_prefix: String,
    /// Products per insert call
    pub batch_size: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            image_prefix: "products".to_string(),
            batch_size: 50,
        }
    }
}

/// Problem with one input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    /// Line in the source file (header is line 1)
    pub line: usize,
    pub name: Option<String>,
    pub code: ErrorCode,
    pub reason: String,
}

/// Outcome of one import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub import_id: String,
    pub started_at: i64,
    pub finished_at: i64,
    pub total_rows: usize,
    pub inserted: usize,
    /// Rows not imported
    pub skipped: Vec<RowIssue>,
    /// Rows imported with something dropped (price, image, category)
    pub warnings: Vec<RowIssue>,
    pub images_matched: usize,
    pub images_missing: usize,
    pub categories_created: usize,
    pub subcategories_created: usize,
}

/// Categories and subcategories known during one run
struct TaxonomyCache {
    categories: Vec<CategoryRecord>,
    subcategories: Vec<SubcategoryRecord>,
}

/// Bulk import over a catalog backend
pub struct ImportPipeline {
    store: Arc<dyn CatalogStore>,
    storage: Arc<dyn ImageStorage>,
    options: ImportOptions,
}

impl ImportPipeline {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        storage: Arc<dyn ImageStorage>,
        options: ImportOptions,
    ) -> Self {
        Self {
            store,
            storage,
            options,
        }
    }

    /// Import a CSV source
    pub async fn import_csv<R: Read>(&self, reader: R) -> AppResult<ImportReport> {
        let CsvRows { rows, unreadable } = read_csv(reader)?;
        let mut report = self.run(rows).await?;
        report.total_rows += unreadable.len();
        report.skipped.extend(unreadable.into_iter().map(|u| RowIssue {
            line: u.line,
            name: None,
            code: ErrorCode::ImportRowInvalid,
            reason: format!("unreadable row: {}", u.reason),
        }));
        report.skipped.sort_by_key(|issue| issue.line);
        Ok(report)
    }

    /// Import already-parsed rows; line numbers count from 2
    pub async fn import_rows<I>(&self, rows: I) -> AppResult<ImportReport>
    where
        I: IntoIterator<Item = RawProductRow>,
    {
        self.run(rows.into_iter().enumerate().map(|(i, row)| (i + 2, row)).collect())
            .await
    }

    async fn run(&self, rows: Vec<(usize, RawProductRow)>) -> AppResult<ImportReport> {
        let mut report = ImportReport {
            import_id: uuid::Uuid::new_v4().to_string(),
            started_at: now_millis(),
            total_rows: rows.len(),
            ..Default::default()
        };

        let (categories, subcategories, files) = tokio::try_join!(
            self.store.list_categories(),
            self.store.list_subcategories(None),
            self.storage
                .list_stored_image_filenames(&self.options.image_prefix),
        )?;
        let mut cache = TaxonomyCache {
            categories,
            subcategories,
        };
        let index = ImageIndex::new(files);
        tracing::debug!(import_id = %report.import_id, images = index.len(), rows = rows.len(), "Import started");

        let batch_size = self.options.batch_size.max(1);
        let mut batch: Vec<NewProduct> = Vec::with_capacity(batch_size);

        for (line, row) in rows {
            let Some(product) = self
                .build_product(line, row, &mut cache, &index, &mut report)
                .await?
            else {
                continue;
            };
            batch.push(product);
            if batch.len() >= batch_size {
                report.inserted += self.store.insert_products(&batch).await?;
                batch.clear();
            }
        }
        if !batch.is_empty() {
            report.inserted += self.store.insert_products(&batch).await?;
        }

        report.finished_at = now_millis();
        tracing::info!(
            import_id = %report.import_id,
            total = report.total_rows,
            inserted = report.inserted,
            skipped = report.skipped.len(),
            warnings = report.warnings.len(),
            images_matched = report.images_matched,
            images_missing = report.images_missing,
            categories_created = report.categories_created,
            subcategories_created = report.subcategories_created,
            "Import finished"
        );
        Ok(report)
    }

    async fn build_product(
        &self,
        line: usize,
        row: RawProductRow,
        cache: &mut TaxonomyCache,
        index: &ImageIndex,
        report: &mut ImportReport,
    ) -> AppResult<Option<NewProduct>> {
        let name = clean_html(row.name.as_deref().unwrap_or_default());
        if name.is_empty() {
            tracing::warn!(line, "Skipping import row without a product name");
            report.skipped.push(RowIssue {
                line,
                name: None,
                code: ErrorCode::RequiredField,
                reason: "missing product name".to_string(),
            });
            return Ok(None);
        }

        let mut warn = |code: ErrorCode, reason: String| {
            tracing::warn!(line, product = %name, code = %code, %reason, "Import row warning");
            report.warnings.push(RowIssue {
                line,
                name: Some(name.clone()),
                code,
                reason,
            });
        };

        let description = row
            .description
            .as_deref()
            .map(clean_html)
            .filter(|d| !d.is_empty());

        let price = match row.price.as_deref().map(parse_price).transpose() {
            Ok(price) => price.flatten(),
            Err(reason) => {
                warn(ErrorCode::ProductInvalidPrice, reason);
                None
            }
        };

        let mut created_category = false;
        let category = match non_empty(row.category.as_deref()) {
            Some(raw) => match self.category_for(raw, cache).await? {
                Some((category, created)) => {
                    created_category = created;
                    Some(category)
                }
                None => {
                    warn(
                        ErrorCode::ImportRowInvalid,
                        format!("category '{}' has no usable name", raw),
                    );
                    None
                }
            },
            None => None,
        };

        let mut created_subcategory = false;
        let subcategory = match non_empty(row.subcategory.as_deref()) {
            Some(raw) => {
                match self.subcategory_for(raw, category.as_ref(), cache).await? {
                    Some((sub, created)) => {
                        created_subcategory = created;
                        Some(sub)
                    }
                    None => {
                        warn(
                            ErrorCode::ImportRowInvalid,
                            format!("subcategory '{}' has no usable name", raw),
                        );
                        None
                    }
                }
            }
            None => None,
        };

        let hint = non_empty(row.image.as_deref());
        let image_url = match hint {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Some(url.to_string())
            }
            _ => match match_image_url(
                &name,
                hint,
                index,
                self.storage.as_ref(),
                &self.options.image_prefix,
            ) {
                Some(url) => Some(url),
                None => {
                    warn(ErrorCode::ImportImageMissing, "no matching image".to_string());
                    None
                }
            },
        };

        report.categories_created += usize::from(created_category);
        report.subcategories_created += usize::from(created_subcategory);
        if image_url.is_some() {
            report.images_matched += 1;
        } else {
            report.images_missing += 1;
        }

        Ok(Some(NewProduct {
            name,
            description,
            price,
            image_url,
            category_id: category.map(|c| c.id),
            subcategory_id: subcategory.map(|s| s.id),
            is_visitor_sofa: parse_flag(row.is_visitor_sofa.as_deref()),
            is_featured: parse_flag(row.is_featured.as_deref()),
            is_new_arrival: parse_flag(row.is_new_arrival.as_deref()),
        }))
    }

    /// Known category matching `raw`, or a new one; `None` if `raw` has no slug
    async fn category_for(
        &self,
        raw: &str,
        cache: &mut TaxonomyCache,
    ) -> AppResult<Option<(CategoryRecord, bool)>> {
        if let Some(found) = find_best_match(raw, &cache.categories) {
            return Ok(Some((found.clone(), false)));
        }

        let slug = canonical_slug(raw);
        if slug.is_empty() {
            return Ok(None);
        }
        let name = clean_html(raw);
        let created = self.store.upsert_category(&name, &slug).await?;
        tracing::info!(category = %created.name, slug = %slug, "Created category during import");
        cache.categories.push(created.clone());
        Ok(Some((created, true)))
    }

    /// Known subcategory matching `raw`, or a new one
    ///
    /// With a category only rows under that category count, so the product
    /// stays reachable from its category route. Without one any row counts.
    async fn subcategory_for(
        &self,
        raw: &str,
        category: Option<&CategoryRecord>,
        cache: &mut TaxonomyCache,
    ) -> AppResult<Option<(SubcategoryRecord, bool)>> {
        let found = match category {
            Some(category) => find_best_match(
                raw,
                cache.subcategories.iter().filter(|s| s.belongs_to(&category.id)),
            ),
            None => find_best_match(raw, &cache.subcategories),
        };
        if let Some(found) = found {
            return Ok(Some((found.clone(), false)));
        }

        let mut slug = canonical_slug(raw);
        if slug.is_empty() {
            return Ok(None);
        }
        // Slugs are unique backend-wide; a same-named row under another
        // category must not be relinked by the upsert.
        if let Some(category) = category
            && cache.subcategories.iter().any(|s| s.stored_slug() == Some(slug.as_str()))
        {
            let suffix = category
                .stored_slug()
                .map(str::to_string)
                .unwrap_or_else(|| canonical_slug(&category.name));
            slug = format!("{}-{}", slug, suffix);
        }

        let name = clean_html(raw);
        let created = self
            .store
            .upsert_subcategory(&name, &slug, category.map(|c| c.id.as_str()))
            .await?;
        tracing::info!(subcategory = %created.name, slug = %slug, "Created subcategory during import");
        cache.subcategories.push(created.clone());
        Ok(Some((created, true)))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCatalog;
    use rust_decimal::Decimal;

    fn pipeline(store: &MemoryCatalog, batch_size: usize) -> ImportPipeline {
        ImportPipeline::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            ImportOptions {
                image_prefix: "products".to_string(),
                batch_size,
            },
        )
    }

    #[tokio::test]
    async fn test_rows_become_products() {
        let store = MemoryCatalog::new("https://cdn.example");
        store.add_object("products/oslo-visitor-sofa-1699999999999.jpg");
        store.add_category(CategoryRecord::new("c1", "Living Room", Some("living-room")));

        let rows = vec![RawProductRow {
            name: Some("<b>Oslo</b> Visitor Sofa".into()),
            description: Some("<p>Two seater</p>".into()),
            price: Some("R 4,999.00".into()),
            category: Some("living room".into()),
            subcategory: Some("Visitor Sofas".into()),
            is_visitor_sofa: Some("yes".into()),
            ..Default::default()
        }];
        let report = pipeline(&store, 10).import_rows(rows).await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.categories_created, 0);
        assert_eq!(report.subcategories_created, 1);
        assert_eq!(report.images_matched, 1);
        assert!(report.warnings.is_empty());

        let product = &store.products()[0];
        assert_eq!(product.name, "Oslo Visitor Sofa");
        assert_eq!(product.description.as_deref(), Some("Two seater"));
        assert_eq!(product.price, Some(Decimal::new(4999, 0)));
        assert_eq!(product.category_id.as_deref(), Some("c1"));
        assert!(product.is_visitor_sofa);
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://cdn.example/products/oslo-visitor-sofa-1699999999999.jpg")
        );

        let sub = &store.subcategories()[0];
        assert_eq!(sub.slug.as_deref(), Some("visitor-sofas"));
        assert!(sub.belongs_to("c1"));
    }

    #[tokio::test]
    async fn test_subcategory_stays_under_row_category() {
        use crate::taxonomy::{SharedSubcategoryConfig, SubcategoryResolver};
        use shared::models::{ProductFilter, SubcategoryRecord};

        let store = MemoryCatalog::default();
        store.add_category(CategoryRecord::new("10", "Living Room", Some("living-room")));
        store.add_category(CategoryRecord::new("30", "Office Furniture", Some("office-furniture")));
        store.add_subcategory(SubcategoryRecord::new("100", "Sofas", Some("sofas"), Some("10")));

        let rows = vec![RawProductRow {
            category: Some("Office Furniture".into()),
            subcategory: Some("Sofas".into()),
            ..RawProductRow::named("Lobby Sofa")
        }];
        let report = pipeline(&store, 10).import_rows(rows).await.unwrap();
        assert_eq!(report.subcategories_created, 1);

        let product = &store.products()[0];
        assert_eq!(product.category_id.as_deref(), Some("30"));
        let sub_id = product.subcategory_id.clone().unwrap();
        assert_ne!(sub_id, "100");

        let subs = store.subcategories();
        let original = subs.iter().find(|s| s.id == "100").unwrap();
        assert!(original.belongs_to("10"));
        let created = subs.iter().find(|s| s.id == sub_id).unwrap();
        assert!(created.belongs_to("30"));
        assert_eq!(created.slug.as_deref(), Some("sofas-office-furniture"));

        let resolver = SubcategoryResolver::new(
            Arc::new(store.clone()),
            Arc::new(SharedSubcategoryConfig::default()),
        );
        let resolution = resolver
            .resolve_category_and_subcategory("office-furniture", "sofas")
            .await
            .unwrap();
        let selection = resolver.product_selection(&resolution).await.unwrap().unwrap();
        assert_eq!(
            selection.filter,
            ProductFilter::Subcategory {
                subcategory_id: sub_id,
                category_id: Some("30".into()),
            }
        );
        assert_eq!(store.list_products(&selection.filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_row_without_category_reuses_any_subcategory() {
        use shared::models::SubcategoryRecord;

        let store = MemoryCatalog::default();
        store.add_subcategory(SubcategoryRecord::new("100", "Sofas", Some("sofas"), Some("10")));
        let rows = vec![RawProductRow {
            subcategory: Some("sofas".into()),
            ..RawProductRow::named("Corner Sofa")
        }];
        let report = pipeline(&store, 10).import_rows(rows).await.unwrap();
        assert_eq!(report.subcategories_created, 0);
        assert_eq!(store.products()[0].subcategory_id.as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_categories_created_once_per_run() {
        let store = MemoryCatalog::default();
        let rows = vec![
            RawProductRow {
                category: Some("Office Firniture".into()),
                ..RawProductRow::named("Atlas Desk")
            },
            RawProductRow {
                category: Some("office furniture".into()),
                ..RawProductRow::named("Atlas Return")
            },
        ];
        let report = pipeline(&store, 10).import_rows(rows).await.unwrap();
        assert_eq!(report.categories_created, 1);
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.categories()[0].slug.as_deref(), Some("office-furniture"));
    }

    #[tokio::test]
    async fn test_bad_rows_are_reported_not_fatal() {
        let store = MemoryCatalog::default();
        let rows = vec![
            RawProductRow::named("   "),
            RawProductRow {
                price: Some("call for price".into()),
                ..RawProductRow::named("Mystery Chair")
            },
        ];
        let report = pipeline(&store, 10).import_rows(rows).await.unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(report.images_missing, 1);
        // price warning plus image miss
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().all(|w| w.line == 3));
        assert_eq!(report.skipped[0].code, ErrorCode::RequiredField);
        let codes: Vec<ErrorCode> = report.warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![ErrorCode::ProductInvalidPrice, ErrorCode::ImportImageMissing]
        );
        assert_eq!(store.products()[0].price, None);
    }

    #[tokio::test]
    async fn test_inserts_in_batches() {
        let store = MemoryCatalog::default();
        let rows = (0..7).map(|i| RawProductRow::named(format!("Stool {}", i)));
        let report = pipeline(&store, 3).import_rows(rows).await.unwrap();
        assert_eq!(report.inserted, 7);
        assert_eq!(store.products().len(), 7);
    }

    #[tokio::test]
    async fn test_import_csv_keeps_image_urls() {
        let store = MemoryCatalog::default();
        let data = "name,price,image\n\
                    Bistro Table,199,https://img.example/bistro.jpg\n";
        let report = pipeline(&store, 10).import_csv(data.as_bytes()).await.unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.images_matched, 1);
        assert_eq!(
            store.products()[0].image_url.as_deref(),
            Some("https://img.example/bistro.jpg")
        );
    }

    #[tokio::test]
    async fn test_import_csv_reports_unreadable_rows() {
        let store = MemoryCatalog::default();
        let data: &[u8] = b"name\nBistro Chair\n\xff\xfe\nBistro Table\n";
        let report = pipeline(&store, 10).import_csv(data).await.unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);
        assert_eq!(report.skipped[0].code, ErrorCode::ImportRowInvalid);
    }

    #[tokio::test]
    async fn test_backend_failure_aborts() {
        let store = MemoryCatalog::default();
        store.set_unavailable(true);
        let err = pipeline(&store, 10)
            .import_rows(vec![RawProductRow::named("Desk")])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamUnavailable);
    }
}
