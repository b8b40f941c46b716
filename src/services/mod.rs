//! # 서비스(비즈니스 로직) 계층
//!
//! 라우트 핸들러와 DB 접근 계층 사이에서 업무 규칙을 처리합니다.
//! 핸들러는 HTTP 요청/응답 변환만 하고, 판단은 모두 여기서 합니다.
//!
//! 각 하위 모듈:
//! - `auth`: 회원가입, 로그인 검증, 초기 영업 계정
//! - `cart`: 장바구니 수량 규칙과 재고 확인
//! - `catalog`: 상품 검색, 상세 조회, 가격/재고 변경
//! - `checkout`: 장바구니 → 주문 트랜잭션과 주문 이력
//! - `reports`: 주간 매출 지표와 상위 상품 순위
//! - `session`: 쇼핑 세션 열기/닫기

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod reports;
pub mod session;
