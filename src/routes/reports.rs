//! # 매출 리포트 라우트 핸들러 (영업 계정 전용)
//!
//! ## 엔드포인트
//! - `GET /api/v1/reports/weekly`       → 최근 7일 매출 지표
//! - `GET /api/v1/reports/top-products` → 주문 수/조회 수 상위 상품 (동점 포함)

use crate::{
    error::AppError,
    middleware::auth::SalesUser,
    models::*,
    routes::AppState,
    services::reports,
};
use axum::{extract::State, Json};
use chrono::Local;

pub async fn weekly_report(
    State(state): State<AppState>,
    _sales: SalesUser,
) -> Result<Json<WeeklyMetrics>, AppError> {
    let today = Local::now().date_naive();
    let metrics = reports::weekly_metrics(&state.pool, today).await?;

    Ok(Json(metrics))
}

pub async fn top_products_report(
    State(state): State<AppState>,
    _sales: SalesUser,
) -> Result<Json<TopProductsReport>, AppError> {
    let by_distinct_orders = reports::top_by_distinct_orders(&state.pool).await?;
    let by_views = reports::top_by_views(&state.pool).await?;

    Ok(Json(TopProductsReport {
        by_distinct_orders,
        by_views,
    }))
}
