//! Raw import rows and cell parsing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult, ErrorCode};
use std::io::Read;
use std::str::FromStr;

/// Header names accepted for the product name column
pub const NAME_COLUMNS: &[&str] = &["name", "product_name", "product name", "title"];

/// One spreadsheet row, columns mapped by header name
///
/// Every cell is optional text; parsing and validation happen in the
/// pipeline so one bad cell never rejects the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProductRow {
    #[serde(default, alias = "product_name", alias = "product name", alias = "title")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "sub_category", alias = "sub-category")]
    pub subcategory: Option<String>,
    #[serde(default, alias = "image_hint", alias = "image_filename", alias = "image_url")]
    pub image: Option<String>,
    #[serde(default, alias = "visitor_sofa")]
    pub is_visitor_sofa: Option<String>,
    #[serde(default, alias = "featured")]
    pub is_featured: Option<String>,
    #[serde(default, alias = "new_arrival")]
    pub is_new_arrival: Option<String>,
}

impl RawProductRow {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A row that failed to deserialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableRow {
    pub line: usize,
    pub reason: String,
}

/// Rows read from a CSV source, in file order
#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    /// `(line, row)` pairs; line 1 is the header
    pub rows: Vec<(usize, RawProductRow)>,
    pub unreadable: Vec<UnreadableRow>,
}

/// Read product rows from CSV
///
/// Headers are matched case-insensitively after trimming. A missing name
/// column or a file without a header row is an error; a malformed data row
/// is reported and skipped.
pub fn read_csv<R: Read>(reader: R) -> AppResult<CsvRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::import_parse(e.to_string()))?
        .clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AppError::with_message(
            ErrorCode::ImportEmpty,
            "Import file has no header row",
        ));
    }

    let normalized: csv::StringRecord = headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
        .collect();
    if !normalized.iter().any(|h| NAME_COLUMNS.contains(&h)) {
        return Err(AppError::missing_column("name"));
    }

    let mut out = CsvRows::default();
    for (i, record) in csv_reader.records().enumerate() {
        let line = i + 2;
        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|r| r.deserialize::<RawProductRow>(Some(&normalized)).map_err(|e| e.to_string()));
        match parsed {
            Ok(row) => out.rows.push((line, row)),
            Err(reason) => out.unreadable.push(UnreadableRow { line, reason }),
        }
    }
    Ok(out)
}

/// Parse a price cell
///
/// Currency symbols, spaces and thousands separators are ignored; a lone
/// comma followed by one or two digits is a decimal comma. Empty cells are
/// `Ok(None)`.
pub fn parse_price(raw: &str) -> Result<Option<Decimal>, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        return Err(format!("price '{}' has no digits", raw.trim()));
    }

    let commas = cleaned.matches(',').count();
    let decimal_comma = !cleaned.contains('.')
        && commas == 1
        && cleaned
            .rsplit(',')
            .next()
            .is_some_and(|tail| (1..=2).contains(&tail.len()));
    let number = if decimal_comma {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };

    let price = Decimal::from_str(&number).map_err(|_| format!("price '{}' is not a number", raw.trim()))?;
    if price.is_sign_negative() {
        return Err(format!("price '{}' is negative", raw.trim()));
    }
    Ok(Some(price))
}

/// Truthy flag cell: `true`, `yes`, `y`, `1` or `x`
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "true" | "yes" | "y" | "1" | "x"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1299.50").unwrap(), Some(Decimal::new(129950, 2)));
        assert_eq!(parse_price("R 1,299.50").unwrap(), Some(Decimal::new(129950, 2)));
        assert_eq!(parse_price("$12,000").unwrap(), Some(Decimal::new(12000, 0)));
        assert_eq!(parse_price("49,95 €").unwrap(), Some(Decimal::new(4995, 2)));
        assert_eq!(parse_price("  ").unwrap(), None);
        assert!(parse_price("call us").is_err());
        assert!(parse_price("-5").is_err());
        assert!(parse_price("1.2.3").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("Yes")));
        assert!(parse_flag(Some(" x ")));
        assert!(parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("no")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_read_csv_with_aliases() {
        let data = "Product Name,Price,Sub_Category,Image_Hint,Featured\n\
                    Oslo Sofa,\"1,200\",Visitor Sofas,oslo.jpg,yes\n\
                    ,10,,,\n";
        let rows = read_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.rows.len(), 2);
        let (line, first) = &rows.rows[0];
        assert_eq!(*line, 2);
        assert_eq!(first.name.as_deref(), Some("Oslo Sofa"));
        assert_eq!(first.price.as_deref(), Some("1,200"));
        assert_eq!(first.subcategory.as_deref(), Some("Visitor Sofas"));
        assert_eq!(first.image.as_deref(), Some("oslo.jpg"));
        assert_eq!(first.is_featured.as_deref(), Some("yes"));
        assert_eq!(rows.rows[1].1.name, None);
    }

    #[test]
    fn test_read_csv_requires_name_column() {
        let err = read_csv("sku,price\nA1,10\n".as_bytes()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportColumnMissing);
    }

    #[test]
    fn test_read_csv_empty_file() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportEmpty);
    }
}
