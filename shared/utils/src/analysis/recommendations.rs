//! Recommendation Generator
//!
//! Turns the classified product list into advisory messages. Each rule is
//! evaluated independently; the "under control" message only appears when
//! no other rule fired.

use shelfwatch_models::{Criticality, Product};
use std::fmt;

/// Products above this total quantity (and not in the low tier) are
/// promotion candidates.
pub const LARGE_QUANTITY_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    DiscardExpired(usize),
    PrioritizeSale(usize),
    MonitorMedium(usize),
    PromoteLargeStock(usize),
    UnderControl,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiscardExpired(count) => write!(
                f,
                "⚠️ {} products already expired - immediate disposal required",
                count
            ),
            Self::PrioritizeSale(count) => write!(
                f,
                "🔴 {} products expire within 30 days - prioritize sale or use",
                count
            ),
            Self::MonitorMedium(count) => write!(
                f,
                "🟡 {} products expire in 31-60 days - attention required",
                count
            ),
            Self::PromoteLargeStock(count) => write!(
                f,
                "📦 {} products with large quantities close to expiration - consider promotions",
                count
            ),
            Self::UnderControl => f.write_str("✅ Situation under control - stock has good shelf life"),
        }
    }
}

fn count_tier(products: &[Product], tier: Criticality) -> usize {
    products.iter().filter(|product| product.criticality == tier).count()
}

pub fn recommend(products: &[Product]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let expired = count_tier(products, Criticality::Expired);
    if expired > 0 {
        recommendations.push(Recommendation::DiscardExpired(expired));
    }

    let high = count_tier(products, Criticality::High);
    if high > 0 {
        recommendations.push(Recommendation::PrioritizeSale(high));
    }

    let medium = count_tier(products, Criticality::Medium);
    if medium > 0 {
        recommendations.push(Recommendation::MonitorMedium(medium));
    }

    let large = products
        .iter()
        .filter(|product| {
            product.total_quantity > LARGE_QUANTITY_THRESHOLD && product.criticality != Criticality::Low
        })
        .count();
    if large > 0 {
        recommendations.push(Recommendation::PromoteLargeStock(large));
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::UnderControl);
    }
    recommendations
}

/// Rendered messages, in rule order.
pub fn generate_recommendations(products: &[Product]) -> Vec<String> {
    recommend(products).iter().map(ToString::to_string).collect()
}
