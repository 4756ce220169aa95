//! CSV bulk import

pub mod pipeline;
pub mod row;

pub use pipeline::{ImportOptions, ImportPipeline, ImportReport, RowIssue};
pub use row::{RawProductRow, parse_flag, parse_price, read_csv};
