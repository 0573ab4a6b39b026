use shelfwatch_models::AnalysisResult;
use shelfwatch_utils::{AppConfig, ShelfwatchError, ShelfwatchResult};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metrics::ServiceMetrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<ServiceMetrics>,
    /// Latest successful analysis. Only replaced once a new one is complete.
    current: Arc<RwLock<Option<Arc<AnalysisResult>>>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            config: Arc::new(config),
            metrics: Arc::new(ServiceMetrics::new()?),
            current: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn current(&self) -> ShelfwatchResult<Arc<AnalysisResult>> {
        self.current
            .read()
            .await
            .clone()
            .ok_or_else(|| ShelfwatchError::not_found("analysis (upload a stock file first)"))
    }

    pub async fn has_analysis(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn replace(&self, result: AnalysisResult) -> Arc<AnalysisResult> {
        let result = Arc::new(result);
        *self.current.write().await = Some(result.clone());
        result
    }
}
