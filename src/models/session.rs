//! # 쇼핑 세션 모델 정의
//!
//! 세션은 고객이 로그인한 뒤 첫 활동(검색, 장바구니, 주문)부터
//! 로그아웃/종료까지의 구간을 나타냅니다.
//! 장바구니와 검색·조회 기록은 모두 세션 단위로 구분됩니다.
//!
//! ## 세션 흐름
//! 1. 첫 활동 시 `ensure_session()`이 열린 세션을 찾거나 새로 연다
//! 2. 장바구니/검색 기록이 `(cid, session_no)`에 묶여 쌓인다
//! 3. 로그아웃 시 `end_time`이 기록되고 남은 장바구니가 비워진다

use serde::{Deserialize, Serialize};

/// 세션 엔티티: DB의 `sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// 고객 번호 (customers.cid)
    pub cid: i64,
    /// 고객별로 1부터 증가하는 세션 번호
    pub session_no: i64,
    /// 세션 시작 시각 ("%Y-%m-%d %H:%M:%S")
    pub start_time: String,
    /// 세션 종료 시각: None이면 아직 진행 중인 세션
    pub end_time: Option<String>,
}

/// 세션을 가리키는 가벼운 핸들
///
/// 장바구니·검색 함수는 세션 전체가 아니라 이 키만 필요합니다.
/// `Copy`이므로 함수 사이에 값으로 넘겨도 비용이 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionKey {
    pub cid: i64,
    pub session_no: i64,
}

impl From<&Session> for SessionKey {
    fn from(session: &Session) -> Self {
        Self {
            cid: session.cid,
            session_no: session.session_no,
        }
    }
}
