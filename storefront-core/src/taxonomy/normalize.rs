//! Name Normalizer
//!
//! Turns free-text category, subcategory and file names into a comparable
//! key. Two names describe the same concept when their normalized forms are
//! equal (see [`super::matcher`]).

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Known misspellings seen in hand-entered and imported category names
pub const TYPO_CORRECTIONS: &[(&str, &str)] = &[
    ("firniture", "furniture"),
    ("furnature", "furniture"),
    ("funiture", "furniture"),
    ("chiars", "chairs"),
    ("chiar", "chair"),
    ("tabels", "tables"),
    ("tabel", "table"),
    ("wardrop", "wardrobe"),
    ("wardropes", "wardrobes"),
    ("sofaa", "sofa"),
];

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']?([^"'\s>]*)["']?[^>]*>(.*?)</a\s*>"#)
        .expect("anchor pattern")
});

static BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(?:br|hr)\s*/?\s*>|<\s*/\s*(?:p|div|li|ul|ol|tr|h[1-6])\s*>")
        .expect("break tag pattern")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z/!][^>]*>").expect("tag pattern"));

static UNTERMINATED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z/!][^>]*$").expect("unterminated tag pattern"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace"));

static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;/\\()&-]+").expect("delimiter pattern"));

static ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    ENTITIES
        .iter()
        .fold(input.to_string(), |acc, (entity, text)| acc.replace(entity, text))
}

/// One cleaning pass; [`clean_html`] repeats it until nothing changes.
fn clean_html_pass(input: &str) -> String {
    let text = decode_entities(input);
    let text = ANCHOR.replace_all(&text, |caps: &regex::Captures| {
        let label = TAG.replace_all(&caps[2], "");
        format!("[Link: {} ({})]", label.trim(), &caps[1])
    });
    let text = BREAK_TAG.replace_all(&text, " ");
    let text = TAG.replace_all(&text, "");
    let text = UNTERMINATED_TAG.replace(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Strip HTML from a name or description
///
/// Anchors become `[Link: TEXT (URL)]`, line and block tags become a space,
/// every other tag is dropped, common entities are decoded and whitespace is
/// collapsed. Best effort: malformed or unterminated markup never fails.
pub fn clean_html(input: &str) -> String {
    let mut current = clean_html_pass(input);
    // A pass that changes anything consumes an entity or a tag, so this terminates.
    loop {
        let next = clean_html_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Lower-case and drop diacritics (`"Café"` -> `"cafe"`)
pub fn fold_diacritics(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    DELIMITERS.split(text).filter(|t| !t.is_empty())
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn correct<'a>(token: &'a str, corrections: &[(&'a str, &'a str)]) -> &'a str {
    let mut current = token;
    // Bounded so a cyclic table cannot spin forever
    for _ in 0..=corrections.len() {
        match corrections.iter().find(|(from, _)| *from == current) {
            Some((_, to)) if *to != current => current = to,
            _ => break,
        }
    }
    current
}

fn normalize_once(name: &str, corrections: &[(&str, &str)]) -> String {
    let folded = fold_diacritics(&clean_html(name));

    let mut seen: Vec<&str> = Vec::new();
    for token in tokens(&folded) {
        for part in tokens(correct(token, corrections)) {
            if !seen.contains(&part) {
                seen.push(part);
            }
        }
    }
    seen.join(" ")
        .trim_matches(|c: char| !is_key_char(c))
        .to_string()
}

/// Normalize a category-like name into its comparison key
///
/// `"Office  Furniture"`, `"office, furniture"` and `"<b>Office</b> Firniture"`
/// all become `"office furniture"`. Tokens keep first-occurrence order.
/// Only the ends of the result are stripped to `[a-z0-9]`; punctuation inside
/// it stays (`"Kids' Beds"` -> `"kids' beds"`).
/// Empty input yields `""`, which must never be used as a match key.
pub fn normalize_category_name(name: &str) -> String {
    normalize_with_corrections(name, TYPO_CORRECTIONS)
}

/// [`normalize_category_name`] with a caller-supplied typo table
pub fn normalize_with_corrections(name: &str, corrections: &[(&str, &str)]) -> String {
    let mut current = normalize_once(name, corrections);
    // Usually stable after the first pass; markup revealed by case folding
    // needs a second one.
    for _ in 0..4 {
        let next = normalize_once(&current, corrections);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
