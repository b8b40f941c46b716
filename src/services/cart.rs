//! # 장바구니 서비스
//!
//! 세션별 장바구니 셀 `(cid, session_no, pid)`의 상태를 관리합니다.
//!
//! ## 규칙
//! - 수량은 항상 1 이상으로 저장되며, 0이 되면 행을 지웁니다.
//! - 결과 수량이 현재 재고보다 많으면 거절하고 상태를 바꾸지 않습니다.
//! - 재고가 0인 상품은 새로 담는 경우든 이미 담긴 경우든 똑같이 거절합니다.
//!
//! 읽기(현재 수량, 재고)와 쓰기를 한 트랜잭션으로 묶어
//! 판단에 쓴 값과 실제로 쓴 값이 어긋나지 않게 합니다.

use crate::db;
use crate::error::{AppError, Rejection};
use crate::models::{CartLine, Product, SessionKey};
use sqlx::{SqliteConnection, SqlitePool};

/// 결과 수량이 재고 범위 안인지 확인합니다.
fn check_stock(product: &Product, new_qty: i64) -> Result<(), AppError> {
    if product.stock_count == 0 {
        return Err(Rejection::OutOfStock {
            product: product.name.clone(),
        }
        .into());
    }
    if new_qty > product.stock_count {
        return Err(Rejection::InsufficientStock {
            product: product.name.clone(),
            available: product.stock_count,
        }
        .into());
    }
    Ok(())
}

/// 셀을 `qty`로 맞춥니다 (있으면 UPDATE, 없으면 INSERT).
async fn write_cell(
    conn: &mut SqliteConnection,
    key: SessionKey,
    pid: i64,
    existing: Option<i64>,
    qty: i64,
) -> Result<(), AppError> {
    match existing {
        Some(_) => db::update_cart_qty(&mut *conn, key, pid, qty).await,
        None => db::insert_cart_item(&mut *conn, key, pid, qty).await,
    }
}

/// 상품을 `qty`개 더 담습니다. 이미 담겨 있으면 기존 수량에 더합니다.
///
/// 반환값: 담긴 후의 수량
pub async fn add_qty(
    pool: &SqlitePool,
    key: SessionKey,
    pid: i64,
    qty: i64,
) -> Result<i64, AppError> {
    if qty < 1 {
        return Err(Rejection::InvalidQuantity(qty).into());
    }

    let mut tx = pool.begin().await?;

    let product = db::get_product(&mut *tx, pid)
        .await?
        .ok_or(AppError::NotFound)?;
    let existing = db::get_cart_qty(&mut *tx, key, pid).await?;
    // 합이 i64를 넘으면 어떤 재고보다도 많으므로 재고 부족으로 거절합니다.
    let new_qty = existing
        .unwrap_or(0)
        .checked_add(qty)
        .ok_or_else(|| Rejection::InsufficientStock {
            product: product.name.clone(),
            available: product.stock_count,
        })?;

    // 거절 시 tx가 drop되면서 롤백됩니다 (아직 쓴 것이 없으므로 상태 변화 없음).
    check_stock(&product, new_qty)?;
    write_cell(&mut *tx, key, pid, existing, new_qty).await?;

    tx.commit().await?;
    Ok(new_qty)
}

/// 수량을 절대값으로 바꿉니다. `qty == 0`이면 셀을 지웁니다.
///
/// 반환값: 바뀐 후의 수량 (지웠으면 0)
pub async fn set_qty(
    pool: &SqlitePool,
    key: SessionKey,
    pid: i64,
    qty: i64,
) -> Result<i64, AppError> {
    if qty < 0 {
        return Err(Rejection::InvalidQuantity(qty).into());
    }

    let mut tx = pool.begin().await?;

    let product = db::get_product(&mut *tx, pid)
        .await?
        .ok_or(AppError::NotFound)?;

    if qty == 0 {
        db::delete_cart_item(&mut *tx, key, pid).await?;
    } else {
        check_stock(&product, qty)?;
        let existing = db::get_cart_qty(&mut *tx, key, pid).await?;
        write_cell(&mut *tx, key, pid, existing, qty).await?;
    }

    tx.commit().await?;
    Ok(qty)
}

/// 세션의 장바구니 내용 (담은 순서)
pub async fn list(pool: &SqlitePool, key: SessionKey) -> Result<Vec<CartLine>, AppError> {
    db::list_cart(pool, key).await
}

/// 셀 하나를 지웁니다. 없어도 성공합니다.
pub async fn remove(pool: &SqlitePool, key: SessionKey, pid: i64) -> Result<(), AppError> {
    db::delete_cart_item(pool, key, pid).await?;
    Ok(())
}

/// 세션의 장바구니를 비웁니다.
pub async fn clear(pool: &SqlitePool, key: SessionKey) -> Result<(), AppError> {
    db::clear_cart(pool, key).await?;
    Ok(())
}
