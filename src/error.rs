//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `Rejection` 열거형: 장바구니/주문 규칙 위반(재고 부족, 빈 장바구니 등)
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! ## 에러 분류
//! | 분류 | variant | 의미 |
//! |------|---------|------|
//! | NotFound | `AppError::NotFound` | 상품/주문/사용자가 없음 |
//! | ValidationRejected | `AppError::Rejected(..)` | 규칙 위반. 이전 상태는 그대로 유지됨 |
//! | StorageFault | `AppError::Database(..)` | DB 오류. 열린 트랜잭션은 전부 롤백됨 |

use axum::{
    http::StatusCode,                     // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response},   // Axum의 응답 변환 트레이트
    Json,                                 // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 장바구니·주문·상품 관리 규칙을 위반했을 때의 거절 사유
///
/// 거절은 "실패"가 아니라 정상적인 업무 결과입니다.
/// 거절이 반환되면 DB 상태는 호출 이전과 동일하게 유지됩니다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// 장바구니가 비어 있어 주문을 만들 수 없음
    #[error("Cart is empty")]
    EmptyCart,

    /// 요청 수량이 재고보다 많음
    /// `available`은 판단 시점의 재고 수량입니다.
    #[error("Not enough stock for {product}: {available} available")]
    InsufficientStock { product: String, available: i64 },

    /// 재고가 0인 상품
    #[error("{product} is out of stock")]
    OutOfStock { product: String },

    /// 수량이 허용 범위를 벗어남 (add는 1 이상, set은 0 이상)
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// 음수 가격
    #[error("Price cannot be negative")]
    NegativePrice,

    /// 음수 재고
    #[error("Stock cannot be negative: {0}")]
    NegativeStock(i64),
}

impl Rejection {
    /// 응답 본문에 들어갈 기계 판독용 코드
    fn code(&self) -> &'static str {
        match self {
            Rejection::EmptyCart => "empty_cart",
            Rejection::InsufficientStock { .. } => "insufficient_stock",
            Rejection::OutOfStock { .. } => "out_of_stock",
            Rejection::InvalidQuantity(_) => "invalid_quantity",
            Rejection::NegativePrice => "negative_price",
            Rejection::NegativeStock(_) => "negative_stock",
        }
    }
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 에러 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 업무 규칙에 의한 거절 (HTTP 409 / 422)
    /// #[from] 덕분에 서비스 코드에서 `Err(Rejection::EmptyCart.into())`처럼 쓸 수 있습니다.
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error를 AppError로 자동 변환하는 From 트레이트를 구현합니다.
    /// 트랜잭션 도중 `?`로 빠져나가면 트랜잭션 객체가 drop되면서 롤백됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 리소스 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Rejected(ref rejection) => {
                // 수량/가격 입력 자체가 잘못된 경우는 422,
                // 현재 상태(재고, 장바구니)와 충돌하는 경우는 409로 구분합니다.
                let status = match rejection {
                    Rejection::InvalidQuantity(_)
                    | Rejection::NegativePrice
                    | Rejection::NegativeStock(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::CONFLICT,
                };
                (status, rejection.code(), rejection.to_string())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Conflict(ref msg) => {
                (StatusCode::CONFLICT, "conflict", msg.clone())
            }
        };

        // 결과: { "error": { "code": "insufficient_stock", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_maps_to_conflict_or_unprocessable() {
        let resp = AppError::from(Rejection::EmptyCart).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = AppError::from(Rejection::InvalidQuantity(-1)).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn insufficient_stock_message_names_product() {
        let rejection = Rejection::InsufficientStock {
            product: "Lamp".to_string(),
            available: 2,
        };
        assert_eq!(rejection.to_string(), "Not enough stock for Lamp: 2 available");
    }
}
