//! Analysis result handed to presentation and export consumers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::product::{Criticality, Product};
use crate::schema::ColumnMapping;

/// Global counters over the finalized products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_products: usize,
    /// Sum of the absolute total quantity of every product.
    pub total_items: f64,
    pub due_in_30_count: usize,
    pub due_in_60_count: usize,
    pub expired_count: usize,
}

impl Summary {
    pub fn record(&mut self, criticality: Criticality) {
        match criticality {
            Criticality::Expired => self.expired_count += 1,
            Criticality::High => self.due_in_30_count += 1,
            Criticality::Medium => self.due_in_60_count += 1,
            Criticality::Low => {}
        }
    }
}

/// Distinct, lexicographically sorted option sets for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub suppliers: Vec<String>,
    pub supplier_codes: Vec<String>,
    pub net_weights: Vec<String>,
    pub product_codes: Vec<String>,
}

/// Row-level accounting of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStatistics {
    pub total_rows: usize,
    pub processed_rows: usize,
    pub ignored_rows: usize,
    pub invalid_date_rows: usize,
}

/// The complete, read-only snapshot produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub reference_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    /// Ordered by tier rank, then minimum days-remaining, then code.
    pub products: Vec<Product>,
    pub filters: Filters,
    pub recommendations: Vec<String>,
    pub statistics: RowStatistics,
    pub column_mapping: ColumnMapping,
}

impl AnalysisResult {
    pub fn product(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.code == code)
    }

    pub fn critical_products(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|product| product.criticality.is_critical())
    }
}
