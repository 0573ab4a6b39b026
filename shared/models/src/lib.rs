//! # Shelfwatch Core Domain Models
//!
//! Typed records for the expiration analysis of warehouse stock exports.
//!
//! ## Key Models
//!
//! - **ColumnMapping**: which input header was chosen for each `LogicalField`
//! - **LineItem**: one stock record at a warehouse address with its expiration date
//! - **Product**: all line items of a product code, bucketed per expiration month
//! - **Criticality**: urgency tier derived from the closest expiration
//! - **AnalysisResult**: the read-only snapshot consumed by reports and exports
//!
//! ## Queries
//!
//! `ProductQuery` narrows a product list by supplier, code, tier or
//! days-remaining window and pages through the result.

pub mod schema;
pub mod product;
pub mod analysis;
pub mod query;

#[cfg(test)]
pub mod property_tests;

pub use schema::*;
pub use product::*;
pub use analysis::*;
pub use query::*;
