//! # 체크아웃(주문 생성) 서비스
//!
//! 장바구니를 주문으로 바꾸는 핵심 트랜잭션입니다.
//!
//! ## 상태 전이
//! ```text
//! Idle → Validating → Committing → Committed
//!                  ↘            ↘ RolledBack
//! ```
//!
//! ## 처리 순서
//! 1. 장바구니 스냅샷을 읽는다. 비어 있으면 트랜잭션을 열지 않고 거절 (EmptyCart)
//! 2. 트랜잭션을 열고 주문 헤더를 넣는다 (주문 번호는 DB가 발급)
//! 3. 스냅샷 순서대로 line_no = 1, 2, ... 를 붙이며 각 줄마다:
//!    - 트랜잭션 안에서 상품 행을 다시 읽어 재고를 확인 (장바구니를 본 뒤 재고가 줄었을 수 있음)
//!    - 모자라면 전체 롤백 후 InsufficientStock(상품명, 현재 재고) 반환
//!    - 충분하면 현재 가격으로 주문 상세를 넣고 재고를 차감
//! 4. 장바구니를 비우고 커밋
//!
//! 중간에 DB 에러가 나면 `?`로 빠져나가면서 트랜잭션이 drop되어 자동 롤백됩니다.
//! 어떤 경우에도 주문 헤더만 남거나, 재고만 줄어든 상태는 커밋되지 않습니다.

use crate::db;
use crate::error::{AppError, Rejection};
use crate::models::{OrderLineDetail, OrderSummary, SessionKey};
use sqlx::SqlitePool;

/// 세션의 장바구니로 주문을 만들고 주문 번호를 반환합니다.
pub async fn checkout(
    pool: &SqlitePool,
    key: SessionKey,
    shipping_address: &str,
) -> Result<i64, AppError> {
    let shipping_address = shipping_address.trim();
    if shipping_address.is_empty() {
        return Err(AppError::BadRequest(
            "Shipping address cannot be empty".to_string(),
        ));
    }

    // ── Validating: 장바구니 스냅샷 ──
    let snapshot = db::list_cart(pool, key).await?;
    if snapshot.is_empty() {
        return Err(Rejection::EmptyCart.into());
    }

    let odate = db::now_timestamp();

    // ── Committing ──
    let mut tx = pool.begin().await?;

    let ono = db::insert_order(&mut *tx, key, &odate, shipping_address).await?;

    // zip(1..): 스냅샷을 읽은 순서대로 1부터 번호를 붙입니다.
    for (line, line_no) in snapshot.iter().zip(1_i64..) {
        // 트랜잭션 안에서 상품을 다시 읽습니다. 장바구니 행이 있는 한 상품도 있어야 하지만,
        // 사라졌다면 재고 0으로 취급해 거절합니다.
        let live = db::get_product(&mut *tx, line.pid).await?;
        let (name, available, price) = match &live {
            Some(product) => (product.name.clone(), product.stock_count, product.price),
            None => (line.name.clone(), 0, line.price),
        };

        if available < line.qty {
            tx.rollback().await?;
            tracing::warn!(
                cid = key.cid,
                session_no = key.session_no,
                pid = line.pid,
                requested = line.qty,
                available,
                "Checkout rolled back: insufficient stock"
            );
            return Err(Rejection::InsufficientStock {
                product: name,
                available,
            }
            .into());
        }

        db::insert_order_line(&mut *tx, ono, line_no, line.pid, line.qty, price).await?;

        // 위에서 확인했으므로 정상이라면 항상 true입니다.
        // false라면 조건부 UPDATE가 행을 찾지 못한 것이므로 다른 DB 에러와 같이 저장소 오류로 돌려줍니다.
        if !db::decrement_stock(&mut *tx, line.pid, line.qty).await? {
            tx.rollback().await?;
            tracing::error!(
                ono,
                pid = line.pid,
                qty = line.qty,
                "Checkout rolled back: guarded stock decrement matched no row"
            );
            return Err(AppError::Database(sqlx::Error::RowNotFound));
        }
    }

    db::clear_cart(&mut *tx, key).await?;
    tx.commit().await?;

    tracing::info!(
        ono,
        cid = key.cid,
        session_no = key.session_no,
        lines = snapshot.len(),
        "Order committed"
    );
    Ok(ono)
}

/// 고객의 주문 목록 (최신순, 합계 포함)
pub async fn list_orders(pool: &SqlitePool, cid: i64) -> Result<Vec<OrderSummary>, AppError> {
    db::list_orders_for_customer(pool, cid).await
}

/// 주문 상세. 다른 고객의 주문이면 존재하지 않는 것으로 취급합니다.
pub async fn order_details(
    pool: &SqlitePool,
    cid: i64,
    ono: i64,
) -> Result<Option<Vec<OrderLineDetail>>, AppError> {
    match db::get_order(pool, ono).await? {
        Some(order) if order.cid == cid => Ok(Some(db::list_order_lines(pool, ono).await?)),
        _ => Ok(None),
    }
}
