//! # 장바구니 데이터베이스 쿼리 모듈
//!
//! 장바구니 셀 하나는 `(cid, session_no, pid)` 키로 구분됩니다.
//! 수량은 항상 1 이상이며, 0이 되면 행을 지웁니다 (0으로 저장하지 않음).

use crate::error::AppError;
use crate::models::{CartLine, SessionKey};
use sqlx::{Executor, Sqlite};

/// 장바구니에 담긴 수량을 조회합니다. 담겨 있지 않으면 None.
pub async fn get_cart_qty<'e, E>(
    executor: E,
    key: SessionKey,
    pid: i64,
) -> Result<Option<i64>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let qty = sqlx::query_scalar::<_, i64>(
        "SELECT qty FROM cart WHERE cid = ? AND session_no = ? AND pid = ?",
    )
    .bind(key.cid)
    .bind(key.session_no)
    .bind(pid)
    .fetch_optional(executor)
    .await?;

    Ok(qty)
}

pub async fn insert_cart_item<'e, E>(
    executor: E,
    key: SessionKey,
    pid: i64,
    qty: i64,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO cart (cid, session_no, pid, qty)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(key.cid)
    .bind(key.session_no)
    .bind(pid)
    .bind(qty)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn update_cart_qty<'e, E>(
    executor: E,
    key: SessionKey,
    pid: i64,
    qty: i64,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE cart SET qty = ? WHERE cid = ? AND session_no = ? AND pid = ?")
        .bind(qty)
        .bind(key.cid)
        .bind(key.session_no)
        .bind(pid)
        .execute(executor)
        .await?;

    Ok(())
}

/// 장바구니 셀 하나를 지웁니다. 없어도 에러가 아닙니다.
///
/// 반환값: 실제로 지운 행이 있었는지 여부
pub async fn delete_cart_item<'e, E>(
    executor: E,
    key: SessionKey,
    pid: i64,
) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM cart WHERE cid = ? AND session_no = ? AND pid = ?")
        .bind(key.cid)
        .bind(key.session_no)
        .bind(pid)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 세션의 장바구니를 모두 비웁니다. 지운 행 수를 반환합니다.
pub async fn clear_cart<'e, E>(executor: E, key: SessionKey) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM cart WHERE cid = ? AND session_no = ?")
        .bind(key.cid)
        .bind(key.session_no)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// 장바구니 내용을 상품 정보와 조인해 조회합니다.
///
/// 담은 순서(rowid)대로 정렬합니다. 체크아웃의 주문 상세 번호(line_no)도 이 순서를 따릅니다.
pub async fn list_cart<'e, E>(executor: E, key: SessionKey) -> Result<Vec<CartLine>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let lines = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ct.pid, p.name, p.price, ct.qty, p.stock_count,
               (p.price * ct.qty) AS line_total
        FROM cart ct
        JOIN products p ON p.pid = ct.pid
        WHERE ct.cid = ? AND ct.session_no = ?
        ORDER BY ct.rowid
        "#,
    )
    .bind(key.cid)
    .bind(key.session_no)
    .fetch_all(executor)
    .await?;

    Ok(lines)
}
