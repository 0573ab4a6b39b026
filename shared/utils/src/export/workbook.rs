//! Workbook Export
//!
//! Renders an `AnalysisResult` as a three-sheet spreadsheet: a summary, one
//! row per product month bucket, and one row per stock item of the
//! expired/high tier products. The sheet contents are built as a plain
//! layout first and then written with `rust_xlsxwriter`.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use shelfwatch_models::AnalysisResult;
use std::path::Path;
use tracing::info;

use crate::error::ShelfwatchResult;

pub const SUMMARY_SHEET: &str = "Summary";
pub const ALL_PRODUCTS_SHEET: &str = "All Products";
pub const CRITICAL_PRODUCTS_SHEET: &str = "Critical Products";

const ALL_PRODUCTS_HEADER: [&str; 10] = [
    "Code",
    "Product",
    "Supplier",
    "Supplier Code",
    "Net Weight",
    "Expiration Month/Year",
    "Quantity",
    "Days Remaining",
    "Criticality",
    "Total Quantity",
];

const CRITICAL_PRODUCTS_HEADER: [&str; 18] = [
    "Code",
    "Product",
    "Supplier",
    "Supplier Code",
    "Address",
    "Warehouse",
    "Aisle",
    "Section",
    "Level",
    "Slot",
    "Status",
    "Quantity",
    "Expiration Date",
    "Days Remaining",
    "Factor",
    "Unit",
    "Net Weight",
    "Criticality",
];

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

/// One worksheet's content. `header` rows are rendered bold.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: &'static str,
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetLayout {
    fn with_header(name: &'static str, header: &[&str]) -> Self {
        Self {
            name,
            header: Some(header.iter().map(|title| title.to_string()).collect()),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }
}

/// `<prefix>_<YYYY-MM-DD>.xlsx`
pub fn default_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y-%m-%d"))
}

pub fn summary_sheet(result: &AnalysisResult) -> SheetLayout {
    let summary = &result.summary;
    let stats = &result.statistics;
    let mut sheet = SheetLayout {
        name: SUMMARY_SHEET,
        header: None,
        rows: Vec::new(),
    };

    sheet.push(vec!["GENERAL SUMMARY".into()]);
    sheet.push(vec![CellValue::Empty]);
    sheet.push(vec!["Total Products".into(), summary.total_products.into()]);
    sheet.push(vec!["Total Items".into(), summary.total_items.into()]);
    sheet.push(vec!["Products Expiring in 30 Days".into(), summary.due_in_30_count.into()]);
    sheet.push(vec!["Products Expiring in 60 Days".into(), summary.due_in_60_count.into()]);
    sheet.push(vec!["Expired Products".into(), summary.expired_count.into()]);
    sheet.push(vec![CellValue::Empty]);
    sheet.push(vec!["PROCESSING STATISTICS".into()]);
    sheet.push(vec!["Total Rows".into(), stats.total_rows.into()]);
    sheet.push(vec!["Processed Rows".into(), stats.processed_rows.into()]);
    sheet.push(vec!["Ignored Rows".into(), stats.ignored_rows.into()]);
    sheet.push(vec!["Invalid Dates".into(), stats.invalid_date_rows.into()]);
    sheet.push(vec![CellValue::Empty]);
    sheet.push(vec![
        "Reference Date".into(),
        result.reference_date.format("%d/%m/%Y").to_string().into(),
    ]);
    sheet.push(vec![
        "Analysis Date".into(),
        result.generated_at.format("%d/%m/%Y %H:%M:%S").to_string().into(),
    ]);
    sheet
}

pub fn all_products_sheet(result: &AnalysisResult) -> SheetLayout {
    let mut sheet = SheetLayout::with_header(ALL_PRODUCTS_SHEET, &ALL_PRODUCTS_HEADER);

    for product in &result.products {
        let tier = product.criticality.as_str().to_uppercase();
        for bucket in &product.month_buckets {
            sheet.push(vec![
                product.code.as_str().into(),
                product.name.as_str().into(),
                product.supplier_name.as_str().into(),
                product.supplier_code.as_str().into(),
                product.net_weight.as_str().into(),
                bucket.month_year.as_str().into(),
                bucket.quantity.into(),
                bucket.days_remaining.into(),
                tier.as_str().into(),
                product.total_quantity.into(),
            ]);
        }
    }
    sheet
}

pub fn critical_products_sheet(result: &AnalysisResult) -> SheetLayout {
    let mut sheet = SheetLayout::with_header(CRITICAL_PRODUCTS_SHEET, &CRITICAL_PRODUCTS_HEADER);

    for product in result.critical_products() {
        let tier = product.criticality.as_str().to_uppercase();
        for item in &product.line_items {
            sheet.push(vec![
                product.code.as_str().into(),
                product.name.as_str().into(),
                product.supplier_name.as_str().into(),
                product.supplier_code.as_str().into(),
                item.address_code.as_str().into(),
                item.warehouse.as_str().into(),
                item.aisle.as_str().into(),
                item.section.as_str().into(),
                item.level.as_str().into(),
                item.slot.as_str().into(),
                item.status.as_str().into(),
                item.quantity.into(),
                item.expiration_date.format("%d/%m/%Y").to_string().into(),
                item.days_remaining.into(),
                item.packaging_factor.as_str().into(),
                item.unit.as_str().into(),
                product.net_weight.as_str().into(),
                tier.as_str().into(),
            ]);
        }
    }
    sheet
}

/// Workbook writer for analysis reports
#[derive(Debug, Clone, Default)]
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// Sheets in workbook order.
    pub fn layout(&self, result: &AnalysisResult) -> Vec<SheetLayout> {
        vec![
            summary_sheet(result),
            all_products_sheet(result),
            critical_products_sheet(result),
        ]
    }

    pub fn to_bytes(&self, result: &AnalysisResult) -> ShelfwatchResult<Vec<u8>> {
        let mut workbook = self.build(result)?;
        let buffer = workbook.save_to_buffer()?;
        info!(bytes = buffer.len(), products = result.products.len(), "Report exported");
        Ok(buffer)
    }

    pub fn write_to_path(&self, result: &AnalysisResult, path: &Path) -> ShelfwatchResult<()> {
        let mut workbook = self.build(result)?;
        workbook.save(path)?;
        info!(path = %path.display(), "Report exported");
        Ok(())
    }

    fn build(&self, result: &AnalysisResult) -> ShelfwatchResult<Workbook> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        for sheet in self.layout(result) {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name)?;
            write_sheet(worksheet, &sheet, &bold)?;
        }
        Ok(workbook)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetLayout, bold: &Format) -> ShelfwatchResult<()> {
    let mut row_index: u32 = 0;

    if let Some(header) = &sheet.header {
        for (col, title) in header.iter().enumerate() {
            worksheet.write_string_with_format(row_index, col as u16, title, bold)?;
        }
        row_index += 1;
    }

    for row in &sheet.rows {
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(text) => {
                    worksheet.write_string(row_index, col, text)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number(row_index, col, *number)?;
                }
            }
        }
        row_index += 1;
    }
    Ok(())
}
