//! # 매출 리포트 서비스
//!
//! ## 주간 지표
//! 오늘을 포함한 최근 7일, 즉 달력 날짜 `[오늘-6, 오늘]` 구간을 집계합니다.
//! (24시간 단위가 아니라 날짜 단위입니다.)
//!
//! ## 상위 상품 (top-3 동점 포함)
//! 정렬된 목록에서 **3위 행**의 카운트를 컷오프로 잡고, 그 이상인 상품을 모두 반환합니다.
//! 예: 카운트가 `[10, 10, 8, 8, 5]`이면 3위 행의 값 8이 컷오프이고 결과는 4개입니다.
//! 행이 3개 미만이면 마지막 행의 값이 컷오프가 되어 전부 반환됩니다.

use crate::db;
use crate::error::AppError;
use crate::models::{ProductRank, WeeklyMetrics};
use chrono::{Days, NaiveDate};
use sqlx::SqlitePool;

/// 순위 리포트가 보여주는 "상위 N" (동점은 모두 포함)
pub const TOP_N: usize = 3;

/// 소수점 둘째 자리 반올림
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 상위 `n`개를 자르되, `n`위와 동점인 행은 모두 포함합니다.
///
/// `rows`는 이미 (count 내림차순, pid 오름차순)으로 정렬되어 있다고 가정합니다.
pub fn top_with_ties(rows: Vec<ProductRank>, n: usize) -> Vec<ProductRank> {
    if n == 0 {
        return Vec::new();
    }

    // 행이 n개 미만이면 마지막 행이 컷오프
    let cutoff = match rows.get(n - 1).or_else(|| rows.last()) {
        Some(row) => row.count,
        None => return Vec::new(),
    };

    rows.into_iter().filter(|r| r.count >= cutoff).collect()
}

/// `today` 기준 최근 7일 매출 지표
pub async fn weekly_metrics(pool: &SqlitePool, today: NaiveDate) -> Result<WeeklyMetrics, AppError> {
    let from = today
        .checked_sub_days(Days::new(6))
        .ok_or_else(|| AppError::Internal("Date out of range".to_string()))?;

    let totals = db::sales_totals_between(
        pool,
        &from.format("%Y-%m-%d").to_string(),
        &today.format("%Y-%m-%d").to_string(),
    )
    .await?;

    let avg = if totals.distinct_customers > 0 {
        totals.total_sales / totals.distinct_customers as f64
    } else {
        0.0
    };

    Ok(WeeklyMetrics {
        distinct_orders: totals.distinct_orders,
        distinct_products_sold: totals.distinct_products,
        distinct_customers: totals.distinct_customers,
        avg_spend_per_customer: round2(avg),
        total_sales: round2(totals.total_sales),
    })
}

/// 서로 다른 주문 수 기준 상위 상품
pub async fn top_by_distinct_orders(pool: &SqlitePool) -> Result<Vec<ProductRank>, AppError> {
    let rows = db::product_order_counts(pool).await?;
    Ok(top_with_ties(rows, TOP_N))
}

/// 조회 수 기준 상위 상품
pub async fn top_by_views(pool: &SqlitePool) -> Result<Vec<ProductRank>, AppError> {
    let rows = db::product_view_counts(pool).await?;
    Ok(top_with_ties(rows, TOP_N))
}
