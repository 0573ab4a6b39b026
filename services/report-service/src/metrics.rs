//! Prometheus metrics owned by the service.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use shelfwatch_models::RowStatistics;

pub struct ServiceMetrics {
    registry: Registry,
    analyses: IntCounterVec,
    rows_processed: IntCounter,
    rows_ignored: IntCounter,
    invalid_dates: IntCounter,
    exports: IntCounter,
}

impl ServiceMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let analyses = IntCounterVec::new(
            Opts::new("shelfwatch_analyses_total", "Analysis runs by outcome"),
            &["outcome"],
        )?;
        let rows_processed = IntCounter::new(
            "shelfwatch_rows_processed_total",
            "Stock rows turned into line items",
        )?;
        let rows_ignored = IntCounter::new(
            "shelfwatch_rows_ignored_total",
            "Stock rows skipped during aggregation",
        )?;
        let invalid_dates = IntCounter::new(
            "shelfwatch_invalid_dates_total",
            "Stock rows skipped for an unparseable expiration date",
        )?;
        let exports = IntCounter::new("shelfwatch_exports_total", "Workbooks exported")?;

        registry.register(Box::new(analyses.clone()))?;
        registry.register(Box::new(rows_processed.clone()))?;
        registry.register(Box::new(rows_ignored.clone()))?;
        registry.register(Box::new(invalid_dates.clone()))?;
        registry.register(Box::new(exports.clone()))?;

        Ok(Self {
            registry,
            analyses,
            rows_processed,
            rows_ignored,
            invalid_dates,
            exports,
        })
    }

    pub fn record_analysis(&self, statistics: &RowStatistics) {
        self.analyses.with_label_values(&["success"]).inc();
        self.rows_processed.inc_by(statistics.processed_rows as u64);
        self.rows_ignored.inc_by(statistics.ignored_rows as u64);
        self.invalid_dates.inc_by(statistics.invalid_date_rows as u64);
    }

    pub fn record_failure(&self) {
        self.analyses.with_label_values(&["failure"]).inc();
    }

    pub fn record_export(&self) {
        self.exports.inc();
    }

    /// Prometheus text exposition of every registered metric.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_else(|_| "Error encoding metrics".to_string())
    }
}
