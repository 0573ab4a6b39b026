//! Expiration Analysis Module
//!
//! Forward-only pipeline from raw rows to an `AnalysisResult`:
//! aggregation, classification, recommendations and report assembly.

pub mod aggregator;
pub mod classifier;
pub mod recommendations;
pub mod report;

pub use aggregator::{parse_quantity, Aggregation, ProductAccumulator, StockAggregator};
pub use classifier::{classify, Classification};
pub use recommendations::{generate_recommendations, recommend, Recommendation, LARGE_QUANTITY_THRESHOLD};
pub use report::{assemble_report, extract_filters, ExpiryAnalyzer};
