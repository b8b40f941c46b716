//! # 세션 관리 서비스
//!
//! 세션은 로그인 시점이 아니라 **첫 활동**(검색, 장바구니, 주문 조회) 시점에 열립니다.
//! 핸들러는 활동 전에 `ensure_session()`을 명시적으로 호출합니다.
//!
//! 한 고객이 여러 클라이언트에서 동시에 로그인해도 열린 세션 하나를 함께 씁니다.
//! (`ensure_session()`은 가장 최근의 열린 세션을 재사용합니다.)
//!
//! 세션을 닫으면 그 세션의 장바구니도 함께 비워집니다.
//! 종료 시각 기록과 장바구니 비우기는 한 트랜잭션으로 처리합니다.

use crate::db;
use crate::error::AppError;
use crate::models::{Session, SessionKey};
use sqlx::SqlitePool;

/// 새 세션을 엽니다. 호출할 때마다 새 session_no가 발급됩니다.
pub async fn open(pool: &SqlitePool, cid: i64) -> Result<Session, AppError> {
    let session = db::open_session(pool, cid, &db::now_timestamp()).await?;
    tracing::info!(cid, session_no = session.session_no, "Session opened");
    Ok(session)
}

/// 고객의 열린 세션을 반환하고, 없으면 새로 엽니다.
pub async fn ensure_session(pool: &SqlitePool, cid: i64) -> Result<SessionKey, AppError> {
    if let Some(session) = db::find_open_session(pool, cid).await? {
        return Ok(SessionKey::from(&session));
    }

    let session = open(pool, cid).await?;
    Ok(SessionKey::from(&session))
}

/// 세션을 닫고 남은 장바구니를 비웁니다.
///
/// 이미 닫힌 세션인지는 검사하지 않습니다 (다시 닫으면 end_time만 갱신됨).
/// 열린 적 없는 세션이면 NotFound.
pub async fn close(pool: &SqlitePool, key: SessionKey) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    if !db::end_session(&mut *tx, key, &db::now_timestamp()).await? {
        return Err(AppError::NotFound);
    }
    let cleared = db::clear_cart(&mut *tx, key).await?;

    tx.commit().await?;

    tracing::info!(
        cid = key.cid,
        session_no = key.session_no,
        cleared_cart_rows = cleared,
        "Session closed"
    );
    Ok(())
}

/// 고객의 열린 세션을 모두 닫습니다 (로그아웃).
///
/// 닫은 세션 수를 반환합니다. 열린 세션이 없으면 0.
pub async fn close_open_sessions(pool: &SqlitePool, cid: i64) -> Result<usize, AppError> {
    let sessions = db::list_open_sessions(pool, Some(cid)).await?;
    for session in &sessions {
        close(pool, SessionKey::from(session)).await?;
    }
    Ok(sessions.len())
}

/// 모든 고객의 열린 세션을 닫습니다 (서버 종료 시).
pub async fn close_all_open_sessions(pool: &SqlitePool) -> Result<usize, AppError> {
    let sessions = db::list_open_sessions(pool, None).await?;
    for session in &sessions {
        close(pool, SessionKey::from(session)).await?;
    }
    Ok(sessions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[tokio::test]
    async fn open_allocates_increasing_numbers_per_customer() {
        let pool = memory_pool().await;
        let alice = insert_customer(&pool, "Alice").await;
        let bob = insert_customer(&pool, "Bob").await;

        let first = open(&pool, alice).await.unwrap();
        let second = open(&pool, alice).await.unwrap();
        let other = open(&pool, bob).await.unwrap();

        assert_eq!(first.session_no, 1);
        assert_eq!(second.session_no, 2);
        assert_eq!(other.session_no, 1);
        assert!(first.end_time.is_none());
    }

    #[tokio::test]
    async fn ensure_session_reuses_open_session() {
        let pool = memory_pool().await;
        let cid = insert_customer(&pool, "Alice").await;

        let first = ensure_session(&pool, cid).await.unwrap();
        let again = ensure_session(&pool, cid).await.unwrap();
        assert_eq!(first, again);

        close(&pool, first).await.unwrap();
        let next = ensure_session(&pool, cid).await.unwrap();
        assert_eq!(next.session_no, first.session_no + 1);
    }

    #[tokio::test]
    async fn close_sets_end_time_and_clears_cart() {
        let pool = memory_pool().await;
        let key = customer_session(&pool, "Alice").await;
        let pid = insert_product(&pool, "Lamp", 10.0, 5).await;
        db::insert_cart_item(&pool, key, pid, 2).await.unwrap();

        close(&pool, key).await.unwrap();

        assert!(session_end_time(&pool, key).await.is_some());
        assert!(db::list_cart(&pool, key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closing_unknown_session_is_not_found() {
        let pool = memory_pool().await;
        let key = customer_session(&pool, "Alice").await;
        let unknown = SessionKey {
            cid: key.cid,
            session_no: key.session_no + 1,
        };

        let err = close(&pool, unknown).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn close_open_sessions_only_touches_that_customer() {
        let pool = memory_pool().await;
        let alice = customer_session(&pool, "Alice").await;
        let bob = customer_session(&pool, "Bob").await;

        let closed = close_open_sessions(&pool, alice.cid).await.unwrap();
        assert_eq!(closed, 1);

        assert!(session_end_time(&pool, bob).await.is_none());

        let closed = close_all_open_sessions(&pool).await.unwrap();
        assert_eq!(closed, 1);
    }
}
