use serde::{Deserialize, Serialize};

/// 장바구니 한 줄: `cart`와 `products`를 조인한 결과
///
/// `line_total = price * qty`는 SQL에서 계산됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartLine {
    pub pid: i64,
    pub name: String,
    pub price: f64,
    pub qty: i64,
    pub stock_count: i64,
    pub line_total: f64,
}

/// `POST /api/v1/cart/items` 요청 본문: 기존 수량에 더합니다.
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub pid: i64,
    /// 생략하면 1개
    pub qty: Option<i64>,
}

/// `PUT /api/v1/cart/items/{pid}` 요청 본문: 수량을 통째로 바꿉니다. 0이면 삭제.
#[derive(Debug, Deserialize)]
pub struct SetCartItemRequest {
    pub qty: i64,
}
