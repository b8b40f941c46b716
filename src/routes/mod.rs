//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 핸들러는 요청을 풀어 서비스 계층을 호출하고 결과를 JSON으로 돌려줄 뿐,
//! 업무 규칙은 `services/`에 있습니다.
//!
//! 각 하위 모듈:
//! - `auth`: 회원가입, 로그인, 로그아웃, 내 정보
//! - `cart`: 장바구니 조회/담기/수량 변경/삭제
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `orders`: 체크아웃과 주문 이력
//! - `products`: 상품 검색, 상세 조회, 가격/재고 변경
//! - `reports`: 주간 매출 지표와 상위 상품 (영업 계정 전용)
//!
//! ## 세션
//! 고객 핸들러는 활동 전에 `services::session::ensure_session()`을 호출해
//! 열린 세션을 확보합니다. 장바구니와 검색/조회 기록은 그 세션 아래에 쌓입니다.

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;

// 각 모듈의 핸들러 함수들을 재공개하여
// main.rs에서 `routes::get_cart`처럼 바로 접근 가능하게 합니다.
pub use cart::*;
pub use health::*;
pub use orders::*;
pub use products::*;
pub use reports::*;

use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
}
