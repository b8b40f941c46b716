//! # 장바구니 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/cart`             → 현재 세션의 장바구니
//! - `POST   /api/v1/cart/items`       → 상품 담기 (기존 수량에 더함)
//! - `PUT    /api/v1/cart/items/{pid}` → 수량 바꾸기 (0이면 삭제)
//! - `DELETE /api/v1/cart/items/{pid}` → 한 줄 삭제
//! - `DELETE /api/v1/cart`             → 장바구니 비우기
//!
//! 모두 고객 전용이며, 활동 전에 세션을 확보합니다.

use crate::{
    error::AppError,
    middleware::auth::CustomerUser,
    models::*,
    routes::AppState,
    services::{cart, reports::round2, session},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// `GET /cart` — `{ "items": [...], "total": 0.0 }`
pub async fn get_cart(
    State(state): State<AppState>,
    customer: CustomerUser,
) -> Result<Json<Value>, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    let items = cart::list(&state.pool, key).await?;
    let total: f64 = items.iter().map(|line| line.line_total).sum();

    Ok(Json(json!({
        "session_no": key.session_no,
        "items": items,
        "total": round2(total)
    })))
}

/// `POST /cart/items` — 담은 뒤의 수량을 돌려줍니다.
pub async fn add_cart_item(
    State(state): State<AppState>,
    customer: CustomerUser,
    Json(req): Json<AddCartItemRequest>,
) -> Result<Json<Value>, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    let qty = cart::add_qty(&state.pool, key, req.pid, req.qty.unwrap_or(1)).await?;

    Ok(Json(json!({ "pid": req.pid, "qty": qty })))
}

/// `PUT /cart/items/{pid}`
pub async fn set_cart_item(
    State(state): State<AppState>,
    customer: CustomerUser,
    Path(pid): Path<i64>,
    Json(req): Json<SetCartItemRequest>,
) -> Result<Json<Value>, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    let qty = cart::set_qty(&state.pool, key, pid, req.qty).await?;

    Ok(Json(json!({ "pid": pid, "qty": qty })))
}

/// `DELETE /cart/items/{pid}` — 없는 줄이어도 204
pub async fn remove_cart_item(
    State(state): State<AppState>,
    customer: CustomerUser,
    Path(pid): Path<i64>,
) -> Result<StatusCode, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    cart::remove(&state.pool, key, pid).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cart`
pub async fn clear_cart(
    State(state): State<AppState>,
    customer: CustomerUser,
) -> Result<StatusCode, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    cart::clear(&state.pool, key).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[tokio::test]
    async fn handlers_share_one_session() {
        let pool = memory_pool().await;
        let cid = insert_customer(&pool, "Alice").await;
        let pid = insert_product(&pool, "Lamp", 2.5, 5).await;
        let state = AppState {
            pool: pool.clone(),
            jwt_secret: "test-secret".to_string(),
        };
        let customer = CustomerUser { cid };

        add_cart_item(
            State(state.clone()),
            customer,
            Json(AddCartItemRequest { pid, qty: None }),
        )
        .await
        .unwrap();
        set_cart_item(
            State(state.clone()),
            customer,
            Path(pid),
            Json(SetCartItemRequest { qty: 3 }),
        )
        .await
        .unwrap();

        let Json(body) = get_cart(State(state.clone()), customer).await.unwrap();
        assert_eq!(body["items"][0]["qty"], 3);
        assert_eq!(body["total"], 7.5);
        assert_eq!(count_rows(&pool, "sessions").await, 1);

        let status = clear_cart(State(state.clone()), customer).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        let Json(body) = get_cart(State(state), customer).await.unwrap();
        assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    }
}
