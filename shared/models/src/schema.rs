//! Logical input schema for warehouse-management exports.
//!
//! A WMS export can name its columns in many ways. Every column the
//! analysis understands is one `LogicalField`; the `ColumnMapping` records
//! which actual header (if any) was chosen for each of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A column the analysis knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Quantity,
    ProductCode,
    Description,
    ExpirationDate,
    Weight,
    SupplierCode,
    SupplierName,
    AddressCode,
    Warehouse,
    Aisle,
    Section,
    Level,
    Slot,
    Status,
    PackagingFactor,
    Unit,
    Capacity,
    PalletTotalQuantity,
    TotalWeight,
    Lot,
}

impl LogicalField {
    pub const ALL: [LogicalField; 20] = [
        Self::Quantity,
        Self::ProductCode,
        Self::Description,
        Self::ExpirationDate,
        Self::Weight,
        Self::SupplierCode,
        Self::SupplierName,
        Self::AddressCode,
        Self::Warehouse,
        Self::Aisle,
        Self::Section,
        Self::Level,
        Self::Slot,
        Self::Status,
        Self::PackagingFactor,
        Self::Unit,
        Self::Capacity,
        Self::PalletTotalQuantity,
        Self::TotalWeight,
        Self::Lot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::ProductCode => "product_code",
            Self::Description => "description",
            Self::ExpirationDate => "expiration_date",
            Self::Weight => "weight",
            Self::SupplierCode => "supplier_code",
            Self::SupplierName => "supplier_name",
            Self::AddressCode => "address_code",
            Self::Warehouse => "warehouse",
            Self::Aisle => "aisle",
            Self::Section => "section",
            Self::Level => "level",
            Self::Slot => "slot",
            Self::Status => "status",
            Self::PackagingFactor => "packaging_factor",
            Self::Unit => "unit",
            Self::Capacity => "capacity",
            Self::PalletTotalQuantity => "pallet_total_quantity",
            Self::TotalWeight => "total_weight",
            Self::Lot => "lot",
        }
    }

    /// Fields without which no analysis can run.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::ExpirationDate | Self::ProductCode)
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical field -> header name found in the input, or `None` when no
/// header matched. Always holds an entry for every `LogicalField`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<LogicalField, Option<String>>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            columns: LogicalField::ALL.iter().map(|field| (*field, None)).collect(),
        }
    }
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: LogicalField, header: Option<String>) {
        self.columns.insert(field, header);
    }

    pub fn get(&self, field: LogicalField) -> Option<&str> {
        self.columns.get(&field).and_then(|header| header.as_deref())
    }

    pub fn is_resolved(&self, field: LogicalField) -> bool {
        self.get(field).is_some()
    }

    /// Mandatory fields that did not resolve, in declaration order.
    pub fn missing_mandatory(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .iter()
            .copied()
            .filter(|field| field.is_mandatory() && !self.is_resolved(*field))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, Option<&str>)> {
        self.columns.iter().map(|(field, header)| (*field, header.as_deref()))
    }
}
