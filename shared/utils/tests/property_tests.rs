//! Shelfwatch Property-Based Tests
//!
//! Aggregation and classification properties over randomly generated
//! stock exports.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shelfwatch_models::{Criticality, NO_EXPIRY_SENTINEL};
use shelfwatch_utils::analysis::ExpiryAnalyzer;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// A date cell: either a day offset rendered in one of the accepted
/// formats, or garbage.
fn date_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-200i64..400).prop_map(|offset| {
            (reference_date() + Duration::days(offset)).format("%d/%m/%Y").to_string()
        }),
        (-200i64..400).prop_map(|offset| {
            (reference_date() + Duration::days(offset)).format("%Y-%m-%d").to_string()
        }),
        Just("NULL".to_string()),
        Just("31/02/2024".to_string()),
        Just("soon".to_string()),
    ]
}

fn stock_row() -> impl Strategy<Value = (String, String, String)> {
    (
        prop_oneof![Just(String::new()), "[0-9]{1,2}"],
        date_cell(),
        prop_oneof![
            (-50i32..500).prop_map(|q| q.to_string()),
            Just("abc".to_string()),
        ],
    )
}

fn to_csv(rows: &[(String, String, String)]) -> String {
    let mut csv = String::from("CODPROD;DTVAL;QT\n");
    for (code, date, quantity) in rows {
        csv.push_str(&format!("{};{};{}\n", code, date, quantity));
    }
    csv
}

mod aggregation_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every row is either processed or ignored; invalid dates are a
        /// subset of the ignored rows.
        #[test]
        fn prop_row_accounting(rows in prop::collection::vec(stock_row(), 0..40)) {
            let report = ExpiryAnalyzer::new(reference_date())
                .analyze_bytes("estoque.csv", to_csv(&rows).as_bytes(), None)
                .unwrap();
            let stats = report.statistics;

            prop_assert_eq!(stats.total_rows, rows.len());
            prop_assert_eq!(stats.processed_rows + stats.ignored_rows, stats.total_rows);
            prop_assert!(stats.invalid_date_rows <= stats.ignored_rows);

            let items: usize = report.products.iter().map(|p| p.line_items.len()).sum();
            prop_assert_eq!(items, stats.processed_rows);
        }

        /// Product aggregates agree with their line items.
        #[test]
        fn prop_products_match_their_items(rows in prop::collection::vec(stock_row(), 1..40)) {
            let report = ExpiryAnalyzer::new(reference_date())
                .analyze_bytes("estoque.csv", to_csv(&rows).as_bytes(), None)
                .unwrap();

            for product in &report.products {
                let sum: f64 = product.line_items.iter().map(|i| i.quantity).sum();
                prop_assert!((product.total_quantity - sum).abs() < 1e-9);

                let min = product.line_items.iter().map(|i| i.days_remaining).min();
                prop_assert_eq!(product.min_days_remaining, min.unwrap_or(NO_EXPIRY_SENTINEL));
                prop_assert_eq!(
                    product.criticality,
                    Criticality::from_days_remaining(product.min_days_remaining)
                );

                let bucket_total: f64 = product.month_buckets.iter().map(|b| b.quantity).sum();
                prop_assert!((bucket_total - sum).abs() < 1e-9);

                prop_assert!(product
                    .line_items
                    .windows(2)
                    .all(|pair| pair[0].days_remaining <= pair[1].days_remaining));
            }
        }
    }
}

mod classification_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Products come out ordered by (tier, closest expiration, code)
        /// and the tier counters add up.
        #[test]
        fn prop_products_sorted_and_counted(rows in prop::collection::vec(stock_row(), 0..40)) {
            let report = ExpiryAnalyzer::new(reference_date())
                .analyze_bytes("estoque.csv", to_csv(&rows).as_bytes(), None)
                .unwrap();

            prop_assert!(report
                .products
                .windows(2)
                .all(|pair| pair[0].sort_key() <= pair[1].sort_key()));

            let summary = &report.summary;
            let low = report
                .products
                .iter()
                .filter(|p| p.criticality == Criticality::Low)
                .count();
            prop_assert_eq!(summary.total_products, report.products.len());
            prop_assert_eq!(
                summary.expired_count + summary.due_in_30_count + summary.due_in_60_count + low,
                summary.total_products
            );
        }

        /// The "under control" message appears alone or not at all.
        #[test]
        fn prop_control_message_is_exclusive(rows in prop::collection::vec(stock_row(), 0..40)) {
            let report = ExpiryAnalyzer::new(reference_date())
                .analyze_bytes("estoque.csv", to_csv(&rows).as_bytes(), None)
                .unwrap();

            let control = report
                .recommendations
                .iter()
                .filter(|message| message.contains("under control"))
                .count();
            prop_assert!(!report.recommendations.is_empty());
            if control > 0 {
                prop_assert_eq!(report.recommendations.len(), 1);
                prop_assert!(report.products.iter().all(|p| p.criticality == Criticality::Low));
            }
        }
    }
}
