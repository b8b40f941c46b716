//! # 주문 모델 정의
//!
//! 주문(`orders`)과 주문 상세(`orderlines`)는 체크아웃 트랜잭션에서
//! 한꺼번에 만들어지며, 이후에는 절대 수정되지 않습니다.

use serde::{Deserialize, Serialize};

/// 주문 헤더: `orders` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub ono: i64,
    pub cid: i64,
    pub session_no: i64,
    /// 주문 일시 ("%Y-%m-%d %H:%M:%S")
    pub odate: String,
    pub shipping_address: String,
}

/// 고객의 주문 목록에 표시하는 요약 (합계 포함)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub ono: i64,
    pub odate: String,
    pub shipping_address: String,
    pub total: f64,
}

/// 주문 상세 조회 결과 한 줄 (상품 정보 조인)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderLineDetail {
    pub line_no: i64,
    pub pid: i64,
    pub name: String,
    pub category: String,
    pub qty: i64,
    pub uprice: f64,
    pub total: f64,
}

/// `POST /api/v1/checkout` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: String,
}

/// 체크아웃 성공 응답
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub ono: i64,
}
