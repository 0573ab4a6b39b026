pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod ingest;
pub mod analysis;
pub mod export;

pub use config::*;
pub use logging::*;
pub use error::*;
pub use validation::*;
pub use ingest::{parse_expiration_date, resolve_columns, RawTable, SheetFormat, SheetLoader};
pub use analysis::{ExpiryAnalyzer, Recommendation};
pub use export::{default_filename, ReportExporter};
