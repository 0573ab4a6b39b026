use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(upload_analysis).get(get_analysis))
        .route("/analysis/products", get(list_products))
        .route("/analysis/recommendations", get(get_recommendations))
        .route("/analysis/export", get(export_report))
}
