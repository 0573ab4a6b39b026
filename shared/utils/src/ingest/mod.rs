//! Stock Export Ingestion
//!
//! Loading of WMS exports (CSV, XLSX, XLS), column resolution against the
//! logical schema, and expiration date normalization.

pub mod loader;
pub mod columns;
pub mod dates;

pub use loader::{detect_delimiter, normalize_headers, RawRow, RawTable, SheetFormat, SheetLoader};
pub use columns::{resolve_columns, resolve_required_columns, COLUMN_SYNONYMS};
pub use dates::parse_expiration_date;
