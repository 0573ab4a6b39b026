//! Product aggregates built from stock line items.
//!
//! A `Product` groups every stocked `LineItem` sharing a product code and
//! summarizes them per expiration month. Its `Criticality` is derived from
//! the item closest to expiring and is never set independently.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days-remaining reported for a product that has no line items.
pub const NO_EXPIRY_SENTINEL: i64 = 999;

/// Upper bound (inclusive) of days-remaining for the `High` tier.
pub const HIGH_RISK_DAYS: i64 = 30;

/// Upper bound (inclusive) of days-remaining for the `Medium` tier.
pub const MEDIUM_RISK_DAYS: i64 = 60;

/// Urgency tier of a product, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Expired,
    High,
    Medium,
    Low,
}

impl Criticality {
    pub fn from_days_remaining(days: i64) -> Self {
        if days < 0 {
            Self::Expired
        } else if days <= HIGH_RISK_DAYS {
            Self::High
        } else if days <= MEDIUM_RISK_DAYS {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Sort rank: expired=0, high=1, medium=2, low=3.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Expired => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Tiers whose individual items are listed in critical reports.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Expired | Self::High)
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical stock record at a warehouse address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub address_code: String,
    pub warehouse: String,
    pub aisle: String,
    pub section: String,
    pub level: String,
    pub slot: String,
    pub status: String,
    /// Negative values are stock adjustments.
    pub quantity: f64,
    pub expiration_date: NaiveDate,
    pub days_remaining: i64,
    pub packaging_factor: String,
    pub unit: String,
    pub capacity: String,
    pub pallet_total_quantity: String,
    pub total_weight: String,
    pub lot: String,
}

/// Quantity of a product expiring in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// `MM/YYYY`
    pub month_year: String,
    pub quantity: f64,
    pub days_remaining: i64,
}

impl MonthBucket {
    pub fn key_for(date: NaiveDate) -> String {
        date.format("%m/%Y").to_string()
    }
}

/// Finalized product aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub name: String,
    pub supplier_name: String,
    pub supplier_code: String,
    pub net_weight: String,
    pub total_quantity: f64,
    pub min_days_remaining: i64,
    pub criticality: Criticality,
    /// Ascending by days-remaining.
    pub month_buckets: Vec<MonthBucket>,
    /// Ascending by days-remaining.
    pub line_items: Vec<LineItem>,
}

impl Product {
    /// Key used to order a product list: most urgent tier first, then the
    /// closest expiration, then product code.
    pub fn sort_key(&self) -> (u8, i64, &str) {
        (self.criticality.rank(), self.min_days_remaining, self.code.as_str())
    }
}
