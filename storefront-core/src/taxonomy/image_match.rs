//! Image Filename Matcher
//!
//! Product names in bulk imports rarely equal their asset filenames: upload
//! tooling appends timestamps, version and copy markers and supplier model
//! codes. Filenames are reduced to a base name and scored against the
//! product's canonical slug.

use super::slug::{canonical_slug, simple_slugify};
use regex::Regex;
use shared::ImageStorage;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Trailing suffixes stripped from filename slugs, applied until none match
static NOISE_SUFFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"-\d{6,}$",
        r"-v\d+$",
        r"-copy(?:-\d+)?$",
        r"-model-rk-\d{2}-\d{3}$",
        r"-\d+-\d+$",
        r"-rk-\d{3}$",
        r"-rk-enterprises?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("suffix pattern"))
    .collect()
});

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[A-Za-z0-9]{1,5}$").expect("extension pattern"));

/// Base name used to compare a stored file against product names
///
/// `"executive-chair-model-x-1699999999999.jpg"` -> `"executive-chair-model-x"`
pub fn base_filename_for_comparison(filename: &str) -> String {
    let file = filename.rsplit('/').next().unwrap_or(filename);
    let stem = EXTENSION.replace(file, "");
    let mut base = simple_slugify(&stem);

    loop {
        let before = base.len();
        for suffix in NOISE_SUFFIXES.iter() {
            base = suffix.replace(&base, "").into_owned();
        }
        if base.len() == before {
            break;
        }
    }
    base.trim_matches('-').to_string()
}

/// Stored file with its precomputed base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatchCandidate {
    pub stored_filename: String,
    pub normalized_base_name: String,
}

impl ImageMatchCandidate {
    pub fn new(stored_filename: impl Into<String>) -> Self {
        let stored_filename = stored_filename.into();
        Self {
            normalized_base_name: base_filename_for_comparison(&stored_filename),
            stored_filename,
        }
    }
}

/// Winning file for a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch {
    pub filename: String,
    pub base_name: String,
    pub score: usize,
}

/// Score of one base name against the product slug and hint base
///
/// Empty target or base never scores.
pub fn score_candidate(base: &str, target: &str, hint: &str) -> usize {
    if base.is_empty() {
        return 0;
    }

    let mut score = 0;
    if !target.is_empty() {
        if base.contains(target) {
            score += target.len();
        } else if target.contains(base) {
            score += base.len();
        }
        if base == target {
            score += 2 * target.len();
        }
    }
    if !hint.is_empty() && base.contains(hint) {
        score += hint.len();
    }
    score
}

/// Higher score wins; ties go to the shorter base, then the smaller filename
fn better(candidate: &ImageMatch, current: &ImageMatch) -> bool {
    candidate
        .score
        .cmp(&current.score)
        .then_with(|| current.base_name.len().cmp(&candidate.base_name.len()))
        .then_with(|| current.filename.cmp(&candidate.filename))
        == Ordering::Greater
}

/// Stored image listing prepared for repeated matching
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    candidates: Vec<ImageMatchCandidate>,
}

impl ImageIndex {
    pub fn new<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: filenames.into_iter().map(ImageMatchCandidate::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[ImageMatchCandidate] {
        &self.candidates
    }

    /// Best scoring file for a product name and optional filename hint
    pub fn best_match(&self, product_name: &str, hint: Option<&str>) -> Option<ImageMatch> {
        let target = canonical_slug(product_name);
        let hint = hint.map(base_filename_for_comparison).unwrap_or_default();

        let mut best: Option<ImageMatch> = None;
        for candidate in &self.candidates {
            let score = score_candidate(&candidate.normalized_base_name, &target, &hint);
            if score == 0 {
                continue;
            }
            let scored = ImageMatch {
                filename: candidate.stored_filename.clone(),
                base_name: candidate.normalized_base_name.clone(),
                score,
            };
            if best.as_ref().is_none_or(|current| better(&scored, current)) {
                best = Some(scored);
            }
        }

        tracing::debug!(product = product_name, target = %target, matched = ?best.as_ref().map(|m| &m.filename), "Image match");
        best
    }
}

/// Best scoring stored file for a product, `None` when nothing scores
pub fn find_best_image_match<S: AsRef<str>>(
    product_name: &str,
    hint: Option<&str>,
    stored_files: &[S],
) -> Option<ImageMatch> {
    ImageIndex::new(stored_files.iter().map(|f| f.as_ref().to_string())).best_match(product_name, hint)
}

/// Object path of a file under a storage prefix
pub fn object_path(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", prefix, filename)
    }
}

/// Public URL of the best matching image, or `None` with a warning
pub fn match_image_url(
    product_name: &str,
    hint: Option<&str>,
    index: &ImageIndex,
    storage: &dyn ImageStorage,
    prefix: &str,
) -> Option<String> {
    match index.best_match(product_name, hint) {
        Some(found) => Some(storage.public_url(&object_path(prefix, &found.filename))),
        None => {
            tracing::warn!(product = product_name, hint = ?hint, "No stored image matches product");
            None
        }
    }
}
