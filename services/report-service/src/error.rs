use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shelfwatch_utils::{ErrorResponse, ShelfwatchError};
use tracing::{error, warn};

/// `ShelfwatchError` rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub ShelfwatchError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ShelfwatchError> for ApiError {
    fn from(error: ShelfwatchError) -> Self {
        Self(error)
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self(ShelfwatchError::validation("file", format!("Failed to read upload: {}", error)))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
