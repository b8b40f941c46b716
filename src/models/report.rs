use serde::{Deserialize, Serialize};

/// 최근 7일(오늘 포함) 매출 지표
///
/// 금액 필드는 소수점 둘째 자리로 반올림된 값입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMetrics {
    pub distinct_orders: i64,
    pub distinct_products_sold: i64,
    pub distinct_customers: i64,
    pub avg_spend_per_customer: f64,
    pub total_sales: f64,
}

/// 순위 리포트의 한 행 (주문 수 또는 조회 수 기준)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRank {
    pub pid: i64,
    pub name: String,
    pub count: i64,
}

/// `GET /api/v1/reports/top-products` 응답
#[derive(Debug, Serialize)]
pub struct TopProductsReport {
    pub by_distinct_orders: Vec<ProductRank>,
    pub by_views: Vec<ProductRank>,
}
