//! Report Export Module
//!
//! Spreadsheet rendering of a finished analysis.

pub mod workbook;

pub use workbook::{default_filename, CellValue, ReportExporter, SheetLayout};
