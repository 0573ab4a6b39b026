use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;
use shelfwatch_utils::{default_filename, ReportExporter, ShelfwatchError};
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Current analysis as a workbook attachment
///
/// GET /api/v1/analysis/export
pub async fn export_report(State(state): State<AppState>) -> ApiResult<Response> {
    let analysis = state.current().await?;
    let filename = default_filename(
        &state.config.export.filename_prefix,
        Local::now().date_naive(),
    );

    let bytes = tokio::task::spawn_blocking(move || ReportExporter::new().to_bytes(&analysis))
        .await
        .map_err(|e| ShelfwatchError::internal(format!("Export worker failed: {}", e)))??;

    state.metrics.record_export();
    info!(filename = %filename, bytes = bytes.len(), "Report downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
