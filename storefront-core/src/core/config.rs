use crate::import::ImportOptions;
use crate::taxonomy::{CanonicalTaxonomy, SharedSubcategoryConfig};
use crate::utils::logger::init_logger_with_file;
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult};
use std::path::Path;

/// Storefront core configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_DIR | (none) | Daily log file directory |
/// | LOG_JSON | false | JSON log lines |
/// | IMAGE_PREFIX | products | Storage folder holding product images |
/// | IMPORT_BATCH_SIZE | 50 | Products per insert call |
/// | TAXONOMY_CONFIG_PATH | (none) | JSON file replacing the built-in taxonomy |
///
/// # Example
///
/// ```ignore
/// IMAGE_PREFIX=catalog/2024 IMPORT_BATCH_SIZE=200 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// Storage folder holding product images
    pub image_prefix: String,
    /// Products per insert call during bulk import
    pub import_batch_size: usize,
    /// Optional taxonomy file; the built-in taxonomy is used without one
    pub taxonomy_config_path: Option<String>,
}

impl CoreConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to defaults
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            image_prefix: std::env::var("IMAGE_PREFIX").unwrap_or_else(|_| "products".into()),
            import_batch_size: std::env::var("IMPORT_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(50),
            taxonomy_config_path: std::env::var("TAXONOMY_CONFIG_PATH")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Built-in defaults with the import settings overridden
    ///
    /// Ignores the environment. Mostly for tests
    pub fn with_overrides(image_prefix: impl Into<String>, import_batch_size: usize) -> Self {
        Self {
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            log_json: false,
            image_prefix: image_prefix.into(),
            import_batch_size: import_batch_size.max(1),
            taxonomy_config_path: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether log lines are written as JSON; always in production
    pub fn json_logs(&self) -> bool {
        self.log_json || self.is_production()
    }

    /// Install the global tracing subscriber from these settings
    pub fn init_logging(&self) {
        init_logger_with_file(
            Some(&self.log_level),
            Some(self.json_logs()),
            self.log_dir.as_deref(),
        );
    }

    /// Import settings derived from this configuration
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            image_prefix: self.image_prefix.clone(),
            batch_size: self.import_batch_size,
        }
    }

    /// Taxonomy from `taxonomy_config_path`, or the built-in one
    pub fn load_taxonomy(&self) -> AppResult<TaxonomyFile> {
        match &self.taxonomy_config_path {
            Some(path) => TaxonomyFile::load(path),
            None => Ok(TaxonomyFile::default()),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Taxonomy configuration file
///
/// ```json
/// {
///   "groups": [{ "name": "Office Range", "children": ["Office Desks"] }],
///   "shared_subcategories": [{
///     "id": "shared-visitor-sofas", "name": "Visitor Sofas",
///     "slug": "visitor-sofas", "owners": ["office"], "flag": "is_visitor_sofa"
///   }]
/// }
/// ```
///
/// Either key may be omitted to keep the built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyFile {
    #[serde(default)]
    pub groups: CanonicalTaxonomy,
    #[serde(default = "SharedSubcategoryConfig::builtin")]
    pub shared_subcategories: SharedSubcategoryConfig,
}

impl Default for TaxonomyFile {
    fn default() -> Self {
        Self {
            groups: CanonicalTaxonomy::builtin(),
            shared_subcategories: SharedSubcategoryConfig::builtin(),
        }
    }
}

impl TaxonomyFile {
    /// Read, parse and validate a taxonomy file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read taxonomy file {}: {}", path.display(), e))
        })?;
        let file: Self = serde_json::from_str(&content).map_err(|e| {
            AppError::config(format!("Invalid taxonomy file {}: {}", path.display(), e))
        })?;
        file.validate()?;
        tracing::info!(
            path = %path.display(),
            groups = file.groups.len(),
            shared = file.shared_subcategories.entries().len(),
            "Loaded taxonomy file"
        );
        Ok(file)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.groups.validate()?;
        self.shared_subcategories.validate()
    }
}
