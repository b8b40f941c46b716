//! # 주문 데이터베이스 쿼리 모듈
//!
//! 주문 헤더와 주문 상세의 INSERT는 체크아웃 트랜잭션 안에서만 호출됩니다.
//! 그래서 이 함수들은 `&mut *tx`를 받을 수 있도록 Executor 제네릭으로 되어 있습니다.

use crate::error::AppError;
use crate::models::{Order, OrderLineDetail, OrderSummary, SessionKey};
use sqlx::{Executor, Sqlite};

/// 주문 헤더를 삽입하고 DB가 발급한 주문 번호(ono)를 반환합니다.
pub async fn insert_order<'e, E>(
    executor: E,
    key: SessionKey,
    odate: &str,
    shipping_address: &str,
) -> Result<i64, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let ono = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO orders (cid, session_no, odate, shipping_address)
        VALUES (?, ?, ?, ?)
        RETURNING ono
        "#,
    )
    .bind(key.cid)
    .bind(key.session_no)
    .bind(odate)
    .bind(shipping_address)
    .fetch_one(executor)
    .await?;

    Ok(ono)
}

/// 주문 상세 한 줄을 삽입합니다.
///
/// `uprice`에는 호출 시점의 상품 가격을 넘겨야 합니다 (가격 스냅샷).
pub async fn insert_order_line<'e, E>(
    executor: E,
    ono: i64,
    line_no: i64,
    pid: i64,
    qty: i64,
    uprice: f64,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO orderlines (ono, line_no, pid, qty, uprice)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(ono)
    .bind(line_no)
    .bind(pid)
    .bind(qty)
    .bind(uprice)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn get_order<'e, E>(executor: E, ono: i64) -> Result<Option<Order>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(
        r#"
        SELECT ono, cid, session_no, odate, shipping_address
        FROM orders
        WHERE ono = ?
        "#,
    )
    .bind(ono)
    .fetch_optional(executor)
    .await?;

    Ok(order)
}

/// 고객의 주문 목록을 최신순으로 조회합니다 (주문별 합계 포함).
pub async fn list_orders_for_customer<'e, E>(
    executor: E,
    cid: i64,
) -> Result<Vec<OrderSummary>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    // 합계가 NULL이 되지 않도록 COALESCE의 기본값도 REAL(0.0)로 둡니다.
    let orders = sqlx::query_as::<_, OrderSummary>(
        r#"
        SELECT o.ono, o.odate, o.shipping_address,
               COALESCE(SUM(ol.qty * ol.uprice), 0.0) AS total
        FROM orders o
        LEFT JOIN orderlines ol ON ol.ono = o.ono
        WHERE o.cid = ?
        GROUP BY o.ono, o.odate, o.shipping_address
        ORDER BY o.odate DESC, o.ono DESC
        "#,
    )
    .bind(cid)
    .fetch_all(executor)
    .await?;

    Ok(orders)
}

/// 주문 상세를 상품 정보와 함께 line_no 순으로 조회합니다.
pub async fn list_order_lines<'e, E>(
    executor: E,
    ono: i64,
) -> Result<Vec<OrderLineDetail>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let lines = sqlx::query_as::<_, OrderLineDetail>(
        r#"
        SELECT ol.line_no, ol.pid, p.name, p.category, ol.qty, ol.uprice,
               (ol.qty * ol.uprice) AS total
        FROM orderlines ol
        JOIN products p ON p.pid = ol.pid
        WHERE ol.ono = ?
        ORDER BY ol.line_no
        "#,
    )
    .bind(ono)
    .fetch_all(executor)
    .await?;

    Ok(lines)
}
