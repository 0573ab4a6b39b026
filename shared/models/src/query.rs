//! Product filtering and pagination over an analysis result.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::product::{Criticality, Product, HIGH_RISK_DAYS, MEDIUM_RISK_DAYS};

/// Days-remaining window on a product's closest expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaysWindow {
    /// Already expired (< 0).
    Expired,
    /// 0 to 30 days.
    Critical,
    /// 31 to 60 days.
    Attention,
    /// More than 60 days.
    Normal,
}

impl DaysWindow {
    pub fn contains(&self, days: i64) -> bool {
        match self {
            Self::Expired => days < 0,
            Self::Critical => (0..=HIGH_RISK_DAYS).contains(&days),
            Self::Attention => days > HIGH_RISK_DAYS && days <= MEDIUM_RISK_DAYS,
            Self::Normal => days > MEDIUM_RISK_DAYS,
        }
    }
}

fn default_page() -> usize {
    1
}

/// Filter criteria, all combined with AND. Empty strings are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductQuery {
    #[validate(length(max = 200, message = "Supplier filter is too long"))]
    pub supplier: Option<String>,
    #[validate(length(max = 100, message = "Product code filter is too long"))]
    pub code: Option<String>,
    pub criticality: Option<Criticality>,
    pub window: Option<DaysWindow>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Pages are numbered from 1"))]
    pub page: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            supplier: None,
            code: None,
            criticality: None,
            window: None,
            page: default_page(),
        }
    }
}

/// One page of filtered products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub total_matching: usize,
    pub page: usize,
    pub page_count: usize,
    pub products: Vec<Product>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(supplier) = non_empty(&self.supplier) {
            if !product.supplier_name.contains(supplier) {
                return false;
            }
        }
        if let Some(code) = non_empty(&self.code) {
            if !product.code.contains(code) {
                return false;
            }
        }
        if let Some(criticality) = self.criticality {
            if product.criticality != criticality {
                return false;
            }
        }
        if let Some(window) = self.window {
            if !window.contains(product.min_days_remaining) {
                return false;
            }
        }
        true
    }

    /// Matching products in their original order.
    pub fn filter<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|product| self.matches(product)).collect()
    }

    pub fn paginate(&self, products: &[Product], page_size: usize) -> ProductPage {
        let page_size = page_size.max(1);
        let matching = self.filter(products);
        let total_matching = matching.len();
        let page = self.page.max(1);

        let products = matching
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        ProductPage {
            total_matching,
            page,
            page_count: total_matching.div_ceil(page_size),
            products,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, supplier: &str, days: i64) -> Product {
        Product {
            code: code.to_string(),
            name: format!("Product {}", code),
            supplier_name: supplier.to_string(),
            supplier_code: String::new(),
            net_weight: String::new(),
            total_quantity: 10.0,
            min_days_remaining: days,
            criticality: Criticality::from_days_remaining(days),
            month_buckets: Vec::new(),
            line_items: Vec::new(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("100", "ACME FOODS", -3),
            product("200", "ACME FOODS", 12),
            product("310", "NORTE LATICINIOS", 45),
            product("400", "NORTE LATICINIOS", 90),
        ]
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let products = sample();
        assert_eq!(ProductQuery::default().filter(&products).len(), 4);
    }

    #[test]
    fn test_substring_filters() {
        let products = sample();
        let query = ProductQuery {
            supplier: Some("NORTE".to_string()),
            code: Some("10".to_string()),
            ..Default::default()
        };
        let codes: Vec<&str> = query.filter(&products).iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["310"]);
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let products = sample();
        let query = ProductQuery {
            supplier: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.filter(&products).len(), 4);
    }

    #[test]
    fn test_window_and_criticality() {
        let products = sample();
        let by_window = ProductQuery {
            window: Some(DaysWindow::Critical),
            ..Default::default()
        };
        assert_eq!(by_window.filter(&products)[0].code, "200");

        let by_tier = ProductQuery {
            criticality: Some(Criticality::Low),
            ..Default::default()
        };
        assert_eq!(by_tier.filter(&products)[0].code, "400");
    }

    #[test]
    fn test_pagination() {
        let products = sample();
        let query = ProductQuery { page: 2, ..Default::default() };
        let page = query.paginate(&products, 3);

        assert_eq!(page.total_matching, 4);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].code, "400");

        let beyond = ProductQuery { page: 5, ..Default::default() }.paginate(&products, 3);
        assert!(beyond.products.is_empty());
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let query = ProductQuery { page: 0, ..Default::default() };
        assert!(query.validate().is_err());
        assert!(ProductQuery::default().validate().is_ok());
    }
}
