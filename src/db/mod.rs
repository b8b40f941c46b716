//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `activity`: 검색 기록과 상품 조회 기록 (추가 전용)
//! - `cart`: 세션별 장바구니 셀 CRUD
//! - `orders`: 주문 헤더/상세 삽입과 주문 이력 조회
//! - `products`: 상품 조회, 키워드 검색, 가격/재고 변경
//! - `reports`: 주간 매출 집계와 상품별 주문·조회 수
//! - `sessions`: 쇼핑 세션 열기/닫기/조회
//! - `users`: 사용자·고객 계정과 로그인 정보
//!
//! ## Executor 제네릭
//! 한 번의 쿼리만 실행하는 함수는 `E: Executor<'e, Database = Sqlite>`를 받습니다.
//! 그래서 `&SqlitePool`도, 트랜잭션 안의 `&mut *tx`도 그대로 넘길 수 있습니다.
//! 체크아웃처럼 여러 쓰기를 하나로 묶어야 하는 곳에서는 `&mut *tx`를 넘깁니다.

pub mod activity;
pub mod cart;
pub mod orders;
pub mod products;
pub mod reports;
pub mod sessions;
pub mod users;

pub use activity::*;
pub use cart::*;
pub use orders::*;
pub use products::*;
pub use reports::*;
pub use sessions::*;

/// DB에 기록하는 타임스탬프 형식 (SQLite의 `date()` 함수가 그대로 해석할 수 있는 형식)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 현재 시각을 DB 저장 형식의 문자열로 반환합니다.
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
