//! # 리포트 집계 쿼리 모듈
//!
//! 세션과 무관하게 전체 주문/조회 기록을 집계합니다.
//! 반올림과 top-3 컷오프 같은 후처리는 `services::reports`에서 합니다.

use crate::error::AppError;
use crate::models::ProductRank;
use sqlx::{Executor, Sqlite};

/// 기간 집계 원시값
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SalesTotals {
    pub distinct_orders: i64,
    pub distinct_products: i64,
    pub distinct_customers: i64,
    pub total_sales: f64,
}

/// `[from, to]` 날짜 구간(양 끝 포함)의 주문을 집계합니다.
///
/// `from`, `to`는 "%Y-%m-%d" 형식입니다.
/// 시각이 아니라 달력 날짜로 비교하므로 `date(o.odate)`를 사용합니다.
pub async fn sales_totals_between<'e, E>(
    executor: E,
    from: &str,
    to: &str,
) -> Result<SalesTotals, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let totals = sqlx::query_as::<_, SalesTotals>(
        r#"
        SELECT COUNT(DISTINCT o.ono) AS distinct_orders,
               COUNT(DISTINCT ol.pid) AS distinct_products,
               COUNT(DISTINCT o.cid) AS distinct_customers,
               COALESCE(SUM(ol.qty * ol.uprice), 0.0) AS total_sales
        FROM orders o
        LEFT JOIN orderlines ol ON ol.ono = o.ono
        WHERE date(o.odate) BETWEEN ? AND ?
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(executor)
    .await?;

    Ok(totals)
}

/// 상품별로 그 상품이 들어간 서로 다른 주문 수를 셉니다.
///
/// 정렬: 주문 수 내림차순, 같으면 pid 오름차순
pub async fn product_order_counts<'e, E>(executor: E) -> Result<Vec<ProductRank>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ProductRank>(
        r#"
        SELECT p.pid, p.name, COUNT(DISTINCT ol.ono) AS count
        FROM orderlines ol
        JOIN products p ON p.pid = ol.pid
        GROUP BY p.pid, p.name
        ORDER BY count DESC, p.pid ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// 상품별 조회 기록 수. 정렬 규칙은 `product_order_counts`와 같습니다.
pub async fn product_view_counts<'e, E>(executor: E) -> Result<Vec<ProductRank>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ProductRank>(
        r#"
        SELECT p.pid, p.name, COUNT(*) AS count
        FROM viewed_product v
        JOIN products p ON p.pid = v.pid
        GROUP BY p.pid, p.name
        ORDER BY count DESC, p.pid ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
