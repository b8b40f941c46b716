//! # 주문 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/checkout`     → 장바구니로 주문 생성 (201)
//! - `GET  /api/v1/orders`       → 내 주문 목록 (최신순)
//! - `GET  /api/v1/orders/{ono}` → 주문 상세 (내 주문이 아니면 404)

use crate::{
    error::AppError,
    middleware::auth::CustomerUser,
    models::*,
    routes::AppState,
    services::{checkout as order_service, session},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

pub async fn checkout(
    State(state): State<AppState>,
    customer: CustomerUser,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    let ono = order_service::checkout(&state.pool, key, &req.shipping_address).await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse { ono })))
}

pub async fn list_orders(
    State(state): State<AppState>,
    customer: CustomerUser,
) -> Result<Json<Value>, AppError> {
    session::ensure_session(&state.pool, customer.cid).await?;
    let orders = order_service::list_orders(&state.pool, customer.cid).await?;

    Ok(Json(json!({ "orders": orders })))
}

pub async fn get_order(
    State(state): State<AppState>,
    customer: CustomerUser,
    Path(ono): Path<i64>,
) -> Result<Json<Value>, AppError> {
    session::ensure_session(&state.pool, customer.cid).await?;
    let lines = order_service::order_details(&state.pool, customer.cid, ono)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "ono": ono, "lines": lines })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cart;
    use crate::test_support::*;

    #[tokio::test]
    async fn checkout_returns_created_and_order_is_listed() {
        let pool = memory_pool().await;
        let cid = insert_customer(&pool, "Alice").await;
        let pid = insert_product(&pool, "Lamp", 10.0, 5).await;
        let state = AppState {
            pool: pool.clone(),
            jwt_secret: "test-secret".to_string(),
        };
        let customer = CustomerUser { cid };

        let key = session::ensure_session(&pool, cid).await.unwrap();
        cart::add_qty(&pool, key, pid, 3).await.unwrap();

        let (status, Json(created)) = checkout(
            State(state.clone()),
            customer,
            Json(CheckoutRequest {
                shipping_address: "1 Main St".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(body) = list_orders(State(state.clone()), customer).await.unwrap();
        assert_eq!(body["orders"][0]["ono"], created.ono);
        assert_eq!(body["orders"][0]["total"], 30.0);

        let Json(detail) = get_order(State(state.clone()), customer, Path(created.ono))
            .await
            .unwrap();
        assert_eq!(detail["lines"][0]["qty"], 3);

        // 다른 고객에게는 존재하지 않는 주문입니다.
        let bob = CustomerUser {
            cid: insert_customer(&pool, "Bob").await,
        };
        let err = get_order(State(state), bob, Path(created.ono))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
