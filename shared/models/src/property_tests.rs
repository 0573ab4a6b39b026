//! Property-based tests for the Shelfwatch domain models
//!
//! Checks that tier derivation, sort keys and query windows agree with
//! each other for arbitrary days-remaining values.

use proptest::prelude::*;

use crate::{Criticality, DaysWindow, Product, ProductQuery, HIGH_RISK_DAYS, MEDIUM_RISK_DAYS};

prop_compose! {
    fn arb_product()(
        code in "[0-9]{1,6}",
        supplier in "[A-Z ]{3,20}",
        days in -400i64..400,
        quantity in -50.0f64..5000.0,
    ) -> Product {
        Product {
            name: format!("Product {}", code),
            code,
            supplier_name: supplier,
            supplier_code: String::new(),
            net_weight: String::new(),
            total_quantity: quantity,
            min_days_remaining: days,
            criticality: Criticality::from_days_remaining(days),
            month_buckets: Vec::new(),
            line_items: Vec::new(),
        }
    }
}

fn window_for(criticality: Criticality) -> DaysWindow {
    match criticality {
        Criticality::Expired => DaysWindow::Expired,
        Criticality::High => DaysWindow::Critical,
        Criticality::Medium => DaysWindow::Attention,
        Criticality::Low => DaysWindow::Normal,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Tier never gets less urgent as expiration approaches.
    #[test]
    fn prop_criticality_is_monotonic(a in -1000i64..1000, b in -1000i64..1000) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            Criticality::from_days_remaining(near).rank()
                <= Criticality::from_days_remaining(far).rank()
        );
    }

    /// Exactly one window contains any day count, and it is the one
    /// matching the derived tier.
    #[test]
    fn prop_window_agrees_with_tier(days in -1000i64..1000) {
        let windows = [
            DaysWindow::Expired,
            DaysWindow::Critical,
            DaysWindow::Attention,
            DaysWindow::Normal,
        ];
        let hits: Vec<DaysWindow> = windows.iter().copied().filter(|w| w.contains(days)).collect();
        prop_assert_eq!(hits, vec![window_for(Criticality::from_days_remaining(days))]);
    }

    #[test]
    fn prop_tier_thresholds(days in -1000i64..1000) {
        let tier = Criticality::from_days_remaining(days);
        match tier {
            Criticality::Expired => prop_assert!(days < 0),
            Criticality::High => prop_assert!((0..=HIGH_RISK_DAYS).contains(&days)),
            Criticality::Medium => prop_assert!(days > HIGH_RISK_DAYS && days <= MEDIUM_RISK_DAYS),
            Criticality::Low => prop_assert!(days > MEDIUM_RISK_DAYS),
        }
    }

    /// Pages partition the filtered list without loss or overlap.
    #[test]
    fn prop_pages_cover_filtered_products(
        products in prop::collection::vec(arb_product(), 0..40),
        page_size in 1usize..15,
    ) {
        let query = ProductQuery::default();
        let first = query.paginate(&products, page_size);
        let mut seen = 0;
        for page in 1..=first.page_count {
            let current = ProductQuery { page, ..Default::default() }.paginate(&products, page_size);
            prop_assert!(current.products.len() <= page_size);
            seen += current.products.len();
        }
        prop_assert_eq!(seen, products.len());
        prop_assert_eq!(first.total_matching, products.len());
    }
}
