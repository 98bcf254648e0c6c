//! Export module for findash
//!
//! - CSV: expenses and incomes, spreadsheet-compatible
//! - JSON: full machine-readable dump of one user's documents

pub mod csv;
pub mod json;

pub use csv::{write_expenses_csv, write_incomes_csv};
pub use json::{write_records_json, RecordsExport, EXPORT_SCHEMA_VERSION};
