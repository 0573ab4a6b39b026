//! Report Assembler
//!
//! Runs the whole pipeline (load, resolve columns, aggregate, classify,
//! recommend) and packages the outcome into one immutable
//! `AnalysisResult`.

use chrono::{Local, NaiveDate, Utc};
use shelfwatch_models::{AnalysisResult, ColumnMapping, Filters, Product, RowStatistics};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

use super::aggregator::StockAggregator;
use super::classifier::{classify, Classification};
use super::recommendations::generate_recommendations;
use crate::error::ShelfwatchResult;
use crate::ingest::{resolve_required_columns, RawTable, SheetFormat, SheetLoader};

/// Distinct non-empty values per filter dimension, sorted.
pub fn extract_filters(products: &[Product]) -> Filters {
    let mut suppliers = BTreeSet::new();
    let mut supplier_codes = BTreeSet::new();
    let mut net_weights = BTreeSet::new();
    let mut product_codes = BTreeSet::new();

    for product in products {
        for (set, value) in [
            (&mut suppliers, &product.supplier_name),
            (&mut supplier_codes, &product.supplier_code),
            (&mut net_weights, &product.net_weight),
            (&mut product_codes, &product.code),
        ] {
            if !value.is_empty() {
                set.insert(value.clone());
            }
        }
    }

    Filters {
        suppliers: suppliers.into_iter().collect(),
        supplier_codes: supplier_codes.into_iter().collect(),
        net_weights: net_weights.into_iter().collect(),
        product_codes: product_codes.into_iter().collect(),
    }
}

/// Combine the classified products with everything derived from them.
pub fn assemble_report(
    classification: Classification,
    statistics: RowStatistics,
    column_mapping: ColumnMapping,
    reference_date: NaiveDate,
) -> AnalysisResult {
    let Classification { products, summary } = classification;
    let filters = extract_filters(&products);
    let recommendations = generate_recommendations(&products);

    AnalysisResult {
        id: Uuid::new_v4(),
        reference_date,
        generated_at: Utc::now(),
        summary,
        products,
        filters,
        recommendations,
        statistics,
        column_mapping,
    }
}

/// Pipeline entry point. The reference date is fixed for the lifetime of
/// the analyzer so every row of a run is measured against the same day.
#[derive(Debug, Clone)]
pub struct ExpiryAnalyzer {
    reference_date: NaiveDate,
    loader: SheetLoader,
}

impl ExpiryAnalyzer {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            loader: SheetLoader::new(),
        }
    }

    /// Analyzer measuring against the local calendar day.
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    #[instrument(skip(self, table), fields(rows = table.rows.len()))]
    pub fn analyze_table(&self, table: &RawTable) -> ShelfwatchResult<AnalysisResult> {
        info!(reference_date = %self.reference_date, "Starting expiration analysis");
        info!(headers = ?table.headers, "Columns found");

        let mapping = resolve_required_columns(&table.headers)?;

        let mut aggregator = StockAggregator::new(&mapping, self.reference_date);
        aggregator.ingest_all(&table.rows);
        let aggregation = aggregator.finish();

        let classification = classify(aggregation.products);
        let report = assemble_report(
            classification,
            aggregation.statistics,
            mapping,
            self.reference_date,
        );

        info!(
            total_products = report.summary.total_products,
            expired = report.summary.expired_count,
            due_in_30 = report.summary.due_in_30_count,
            due_in_60 = report.summary.due_in_60_count,
            processed_rows = report.statistics.processed_rows,
            ignored_rows = report.statistics.ignored_rows,
            invalid_date_rows = report.statistics.invalid_date_rows,
            "Analysis completed"
        );
        Ok(report)
    }

    pub fn analyze_bytes(
        &self,
        filename: &str,
        data: &[u8],
        format: Option<SheetFormat>,
    ) -> ShelfwatchResult<AnalysisResult> {
        let table = self.loader.load_bytes(filename, data, format)?;
        self.analyze_table(&table)
    }

    pub fn analyze_path(&self, path: &Path) -> ShelfwatchResult<AnalysisResult> {
        let table = self.loader.load_path(path)?;
        self.analyze_table(&table)
    }
}
