//! # 상품 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET   /api/v1/products/search?q=red+lamp` → 키워드 검색 (고객)
//! - `GET   /api/v1/products/{pid}`            → 상품 상세, 조회 기록 1건 (고객)
//! - `PATCH /api/v1/products/{pid}`            → 가격/재고 변경 (영업)

use crate::{
    error::AppError,
    middleware::auth::{CustomerUser, SalesUser},
    models::*,
    routes::AppState,
    services::{catalog, session},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 공백으로 구분된 키워드
    #[serde(default)]
    pub q: String,
}

/// `GET /products/search?q=` — 모든 키워드를 포함하는 상품 목록
pub async fn search_products(
    State(state): State<AppState>,
    customer: CustomerUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    let keywords = catalog::split_keywords(&query.q);
    let products = catalog::search(&state.pool, key, &keywords).await?;

    Ok(Json(json!({ "products": products })))
}

/// `GET /products/{pid}` — 상품 상세. 찾은 경우에만 조회 기록을 남깁니다.
pub async fn get_product(
    State(state): State<AppState>,
    customer: CustomerUser,
    Path(pid): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let key = session::ensure_session(&state.pool, customer.cid).await?;
    let product = catalog::get_details(&state.pool, pid)
        .await?
        .ok_or(AppError::NotFound)?;
    catalog::record_view(&state.pool, key, pid).await?;

    Ok(Json(product))
}

/// `PATCH /products/{pid}` — 빠진 필드는 그대로 둡니다.
pub async fn update_product(
    State(state): State<AppState>,
    sales: SalesUser,
    Path(pid): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    let product = catalog::update_product(&state.pool, pid, &req).await?;
    tracing::debug!(pid, by = sales.user_id, "Product update request handled");

    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[tokio::test]
    async fn missing_product_leaves_no_view() {
        let pool = memory_pool().await;
        let cid = insert_customer(&pool, "Alice").await;
        let pid = insert_product(&pool, "Lamp", 10.0, 5).await;
        let state = AppState {
            pool: pool.clone(),
            jwt_secret: "test-secret".to_string(),
        };
        let customer = CustomerUser { cid };

        let err = get_product(State(state.clone()), customer, Path(pid + 100))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(count_rows(&pool, "viewed_product").await, 0);

        let Json(product) = get_product(State(state), customer, Path(pid)).await.unwrap();
        assert_eq!(product.name, "Lamp");
        assert_eq!(count_rows(&pool, "viewed_product").await, 1);
        assert_eq!(count_rows(&pool, "sessions").await, 1);
    }
}
