//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `cart`: 장바구니 한 줄과 장바구니 요청 본문
//! - `order`: 주문 헤더, 주문 상세, 주문 요약
//! - `product`: 상품과 검색 결과 요약
//! - `report`: 주간 매출 지표와 상품 순위
//! - `session`: 쇼핑 세션
//! - `user`: 사용자(User), 역할, 인증 요청/응답
//!
//! `pub use X::*;`는 하위 모듈의 모든 공개 항목을
//! 이 모듈에서 바로 접근할 수 있게 재공개(re-export)합니다.
//! 예: `crate::models::product::Product` 대신 `crate::models::Product`로 접근 가능

pub mod cart;
pub mod order;
pub mod product;
pub mod report;
pub mod session;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use report::*;
pub use session::*;
pub use user::*;
