//! Stock Aggregator
//!
//! Single pass over the raw rows. Valid rows become `LineItem`s grouped by
//! product code; bad rows are counted and skipped, never fatal.

use chrono::NaiveDate;
use shelfwatch_models::{ColumnMapping, LineItem, LogicalField, MonthBucket, RowStatistics};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::ingest::{dates::parse_expiration_date, RawRow};

/// Unexpected per-row failure; the row is skipped.
#[derive(Debug, Error)]
enum RowError {
    #[error("column {0} is not mapped")]
    UnmappedField(LogicalField),
    #[error("row has no cell for column {0}")]
    MissingCell(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowOutcome {
    Processed,
    MissingProductCode,
    InvalidDate,
}

/// Mutable per-product state while rows are consumed.
#[derive(Debug, Clone)]
pub struct ProductAccumulator {
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) supplier_name: String,
    pub(crate) supplier_code: String,
    pub(crate) net_weight: String,
    pub(crate) total_quantity: f64,
    pub(crate) min_days_remaining: Option<i64>,
    pub(crate) buckets: HashMap<String, MonthBucket>,
    pub(crate) line_items: Vec<LineItem>,
}

impl ProductAccumulator {
    fn seed(code: &str, name: String, supplier_name: String, supplier_code: String, net_weight: String) -> Self {
        Self {
            code: code.to_string(),
            name,
            supplier_name,
            supplier_code,
            net_weight,
            total_quantity: 0.0,
            min_days_remaining: None,
            buckets: HashMap::new(),
            line_items: Vec::new(),
        }
    }

    fn add(&mut self, item: LineItem) {
        let key = MonthBucket::key_for(item.expiration_date);
        let bucket = self.buckets.entry(key.clone()).or_insert_with(|| MonthBucket {
            month_year: key,
            quantity: 0.0,
            days_remaining: item.days_remaining,
        });
        bucket.quantity += item.quantity;
        bucket.days_remaining = bucket.days_remaining.min(item.days_remaining);

        self.total_quantity += item.quantity;
        self.min_days_remaining = Some(match self.min_days_remaining {
            Some(current) => current.min(item.days_remaining),
            None => item.days_remaining,
        });
        self.line_items.push(item);
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Products and row counters after the last row.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub products: Vec<ProductAccumulator>,
    pub statistics: RowStatistics,
}

/// Parse a quantity cell, accepting a decimal comma. Anything unparseable,
/// including NaN and infinities, counts as zero.
pub fn parse_quantity(raw: Option<&str>) -> f64 {
    raw.map(|value| value.trim().replace(',', "."))
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|quantity| quantity.is_finite())
        .unwrap_or(0.0)
}

pub struct StockAggregator<'a> {
    mapping: &'a ColumnMapping,
    reference_date: NaiveDate,
    products: HashMap<String, ProductAccumulator>,
    statistics: RowStatistics,
}

impl<'a> StockAggregator<'a> {
    /// `reference_date` is "today" for every days-remaining computation.
    pub fn new(mapping: &'a ColumnMapping, reference_date: NaiveDate) -> Self {
        Self {
            mapping,
            reference_date,
            products: HashMap::new(),
            statistics: RowStatistics::default(),
        }
    }

    /// Consume one row. `row_number` is only used in log messages.
    pub fn ingest(&mut self, row_number: usize, row: &RawRow) {
        self.statistics.total_rows += 1;

        match self.process_row(row) {
            Ok(RowOutcome::Processed) => self.statistics.processed_rows += 1,
            Ok(RowOutcome::MissingProductCode) => self.statistics.ignored_rows += 1,
            Ok(RowOutcome::InvalidDate) => {
                self.statistics.invalid_date_rows += 1;
                self.statistics.ignored_rows += 1;
            }
            Err(error) => {
                warn!(row = row_number, %error, "Skipping row");
                self.statistics.ignored_rows += 1;
            }
        }
    }

    pub fn ingest_all<'r, I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = &'r RawRow>,
    {
        // Header is line 1 of the input.
        for (index, row) in rows.into_iter().enumerate() {
            self.ingest(index + 2, row);
        }
    }

    pub fn finish(self) -> Aggregation {
        Aggregation {
            products: self.products.into_values().collect(),
            statistics: self.statistics,
        }
    }

    fn process_row(&mut self, row: &RawRow) -> Result<RowOutcome, RowError> {
        let code = self.required(row, LogicalField::ProductCode)?.trim().to_string();
        if code.is_empty() {
            return Ok(RowOutcome::MissingProductCode);
        }

        let quantity = parse_quantity(self.cell(row, LogicalField::Quantity));

        let raw_date = self.required(row, LogicalField::ExpirationDate)?;
        let Some(expiration_date) = parse_expiration_date(raw_date) else {
            return Ok(RowOutcome::InvalidDate);
        };
        let days_remaining = (expiration_date - self.reference_date).num_days();

        if !self.products.contains_key(&code) {
            let product = ProductAccumulator::seed(
                &code,
                self.text_or(row, LogicalField::Description, || format!("Product {}", code)),
                self.text_or(row, LogicalField::SupplierName, || "No supplier".to_string()),
                self.text(row, LogicalField::SupplierCode),
                self.text(row, LogicalField::Weight),
            );
            self.products.insert(code.clone(), product);
        }

        let item = LineItem {
            address_code: self.text(row, LogicalField::AddressCode),
            warehouse: self.text(row, LogicalField::Warehouse),
            aisle: self.text(row, LogicalField::Aisle),
            section: self.text(row, LogicalField::Section),
            level: self.text(row, LogicalField::Level),
            slot: self.text(row, LogicalField::Slot),
            status: self.text(row, LogicalField::Status),
            quantity,
            expiration_date,
            days_remaining,
            packaging_factor: self.text(row, LogicalField::PackagingFactor),
            unit: self.text(row, LogicalField::Unit),
            capacity: self.text(row, LogicalField::Capacity),
            pallet_total_quantity: self.text(row, LogicalField::PalletTotalQuantity),
            total_weight: self.text(row, LogicalField::TotalWeight),
            lot: self.text(row, LogicalField::Lot),
        };

        if let Some(product) = self.products.get_mut(&code) {
            product.add(item);
        }
        Ok(RowOutcome::Processed)
    }

    fn cell<'r>(&self, row: &'r RawRow, field: LogicalField) -> Option<&'r str> {
        self.mapping
            .get(field)
            .and_then(|header| row.get(header))
            .map(String::as_str)
    }

    fn required<'r>(&self, row: &'r RawRow, field: LogicalField) -> Result<&'r str, RowError> {
        let header = self.mapping.get(field).ok_or(RowError::UnmappedField(field))?;
        row.get(header)
            .map(String::as_str)
            .ok_or_else(|| RowError::MissingCell(header.to_string()))
    }

    fn text(&self, row: &RawRow, field: LogicalField) -> String {
        self.cell(row, field).unwrap_or_default().to_string()
    }

    fn text_or(&self, row: &RawRow, field: LogicalField, fallback: impl FnOnce() -> String) -> String {
        match self.cell(row, field) {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => fallback(),
        }
    }
}
