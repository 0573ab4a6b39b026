//! Product Classifier
//!
//! Finalizes accumulated products: orders their items and month buckets,
//! derives the criticality tier, counts tiers, and orders the product list
//! by urgency.

use shelfwatch_models::{Criticality, Product, Summary, NO_EXPIRY_SENTINEL};

use super::aggregator::ProductAccumulator;

/// Finalized products, most urgent first, with their tier counters.
#[derive(Debug, Clone)]
pub struct Classification {
    pub products: Vec<Product>,
    pub summary: Summary,
}

impl ProductAccumulator {
    /// Freeze the accumulator into an immutable `Product`.
    pub fn finalize(self) -> Product {
        let mut line_items = self.line_items;
        line_items.sort_by_key(|item| item.days_remaining);

        let mut month_buckets: Vec<_> = self.buckets.into_values().collect();
        month_buckets.sort_by(|a, b| {
            a.days_remaining
                .cmp(&b.days_remaining)
                .then_with(|| a.month_year.cmp(&b.month_year))
        });

        // A product without items cannot be built from rows; treat it as far from expiring.
        let min_days_remaining = self.min_days_remaining.unwrap_or(NO_EXPIRY_SENTINEL);

        Product {
            code: self.code,
            name: self.name,
            supplier_name: self.supplier_name,
            supplier_code: self.supplier_code,
            net_weight: self.net_weight,
            total_quantity: self.total_quantity,
            min_days_remaining,
            criticality: Criticality::from_days_remaining(min_days_remaining),
            month_buckets,
            line_items,
        }
    }
}

pub fn classify(accumulators: Vec<ProductAccumulator>) -> Classification {
    let mut summary = Summary::default();
    let mut products: Vec<Product> = accumulators
        .into_iter()
        .map(ProductAccumulator::finalize)
        .collect();

    for product in &products {
        summary.record(product.criticality);
        summary.total_items += product.total_quantity.abs();
    }
    summary.total_products = products.len();

    products.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    Classification { products, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shelfwatch_models::LineItem;
    use std::collections::HashMap;

    fn item(days: i64, quantity: f64) -> LineItem {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        LineItem {
            address_code: String::new(),
            warehouse: String::new(),
            aisle: String::new(),
            section: String::new(),
            level: String::new(),
            slot: String::new(),
            status: String::new(),
            quantity,
            expiration_date: reference + chrono::Duration::days(days),
            days_remaining: days,
            packaging_factor: String::new(),
            unit: String::new(),
            capacity: String::new(),
            pallet_total_quantity: String::new(),
            total_weight: String::new(),
            lot: String::new(),
        }
    }

    fn accumulator(code: &str, items: Vec<LineItem>) -> ProductAccumulator {
        let mut buckets: HashMap<String, shelfwatch_models::MonthBucket> = HashMap::new();
        for item in &items {
            let key = shelfwatch_models::MonthBucket::key_for(item.expiration_date);
            let bucket = buckets.entry(key.clone()).or_insert(shelfwatch_models::MonthBucket {
                month_year: key,
                quantity: 0.0,
                days_remaining: item.days_remaining,
            });
            bucket.quantity += item.quantity;
            bucket.days_remaining = bucket.days_remaining.min(item.days_remaining);
        }
        ProductAccumulator {
            code: code.to_string(),
            name: format!("Product {}", code),
            supplier_name: "No supplier".to_string(),
            supplier_code: String::new(),
            net_weight: String::new(),
            total_quantity: items.iter().map(|i| i.quantity).sum(),
            min_days_remaining: items.iter().map(|i| i.days_remaining).min(),
            buckets,
            line_items: items,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (-1, Criticality::Expired),
            (0, Criticality::High),
            (30, Criticality::High),
            (31, Criticality::Medium),
            (60, Criticality::Medium),
            (61, Criticality::Low),
        ];
        for (days, expected) in cases {
            let product = accumulator("1", vec![item(days, 1.0)]).finalize();
            assert_eq!(product.criticality, expected, "days {}", days);
        }
    }

    #[test]
    fn test_items_and_buckets_sorted() {
        let product = accumulator("1", vec![item(90, 1.0), item(-5, 2.0), item(40, 3.0)]).finalize();

        let days: Vec<i64> = product.line_items.iter().map(|i| i.days_remaining).collect();
        assert_eq!(days, vec![-5, 40, 90]);

        let bucket_days: Vec<i64> = product.month_buckets.iter().map(|b| b.days_remaining).collect();
        assert_eq!(bucket_days, vec![-5, 40, 90]);
        assert_eq!(product.min_days_remaining, -5);
    }

    #[test]
    fn test_empty_product_uses_sentinel() {
        let product = accumulator("1", Vec::new()).finalize();
        assert_eq!(product.min_days_remaining, NO_EXPIRY_SENTINEL);
        assert_eq!(product.criticality, Criticality::Low);
    }

    #[test]
    fn test_classification_order_and_summary() {
        let classification = classify(vec![
            accumulator("low", vec![item(100, 5.0)]),
            accumulator("b-high", vec![item(10, -4.0)]),
            accumulator("a-high", vec![item(10, 1.0)]),
            accumulator("expired", vec![item(-2, 1.0)]),
            accumulator("medium", vec![item(45, 1.0)]),
            accumulator("closer-high", vec![item(3, 1.0)]),
        ]);

        let codes: Vec<&str> = classification.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["expired", "closer-high", "a-high", "b-high", "medium", "low"]);

        let summary = classification.summary;
        assert_eq!(summary.total_products, 6);
        assert_eq!(summary.expired_count, 1);
        assert_eq!(summary.due_in_30_count, 3);
        assert_eq!(summary.due_in_60_count, 1);
        assert_eq!(summary.total_items, 13.0);
    }
}
