//! Analysis Handlers
//!
//! Stock file upload and the JSON views over the current analysis.

use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Json, Response},
};
use shelfwatch_models::{AnalysisResult, ProductPage, ProductQuery};
use shelfwatch_utils::{
    file_extension, validate_file_size, validate_file_type, validate_model, ExpiryAnalyzer,
    SheetFormat, ShelfwatchError,
};
use std::path::Path;
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

/// Extension first; the declared content type only when the name has no
/// usable extension.
fn upload_format(
    filename: &str,
    content_type: Option<&str>,
    allowed: &[String],
) -> ApiResult<SheetFormat> {
    if file_extension(filename).is_some() {
        validate_file_type(filename, allowed)?;
        if let Some(format) = SheetFormat::from_extension(Path::new(filename)) {
            return Ok(format);
        }
    }

    content_type
        .and_then(SheetFormat::from_content_type)
        .ok_or_else(|| ShelfwatchError::unsupported_format(filename).into())
}

/// Upload a stock export and analyze it
///
/// POST /api/v1/analysis
pub async fn upload_analysis(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let result = run_upload(&state, multipart).await;
    if result.is_err() {
        state.metrics.record_failure();
    }
    let analysis = state.replace(result?).await;

    info!(
        analysis_id = %analysis.id,
        products = analysis.summary.total_products,
        "Analysis stored"
    );
    Ok(Json(analysis.as_ref()).into_response())
}

async fn run_upload(state: &AppState, mut multipart: Multipart) -> ApiResult<AnalysisResult> {
    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        let config = &state.config.analysis;
        validate_file_size(data.len() as u64, config.max_upload_bytes)?;
        let format = upload_format(&filename, content_type.as_deref(), &config.allowed_extensions)?;

        info!(filename = %filename, bytes = data.len(), ?format, "Stock file received");

        let analyzer = ExpiryAnalyzer::for_today();
        let analysis = tokio::task::spawn_blocking(move || {
            analyzer.analyze_bytes(&filename, &data, Some(format))
        })
        .await
        .map_err(|e| ShelfwatchError::internal(format!("Analysis worker failed: {}", e)))??;

        state.metrics.record_analysis(&analysis.statistics);
        return Ok(analysis);
    }

    Err(ShelfwatchError::validation("file", "No file provided").into())
}

/// GET /api/v1/analysis
pub async fn get_analysis(State(state): State<AppState>) -> ApiResult<Response> {
    let analysis = state.current().await?;
    Ok(Json(analysis.as_ref()).into_response())
}

/// Filtered, paginated product list
///
/// GET /api/v1/analysis/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<ProductPage>> {
    validate_model(&query)?;
    let analysis = state.current().await?;
    Ok(Json(query.paginate(&analysis.products, state.config.analysis.page_size)))
}

/// GET /api/v1/analysis/recommendations
pub async fn get_recommendations(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let analysis = state.current().await?;
    Ok(Json(analysis.recommendations.clone()))
}
