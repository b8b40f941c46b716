//! # 쇼핑 세션 데이터베이스 쿼리 모듈
//!
//! 세션의 생성, 종료, 조회를 담당하는 SQL 쿼리 함수들입니다.
//!
//! ## 세션 라이프사이클
//! ```text
//! [시작] open_session() → 진행 중(end_time = NULL) → end_session() → [종료]
//! ```
//!
//! `session_no`는 고객마다 1부터 증가합니다.
//! 번호 계산(MAX + 1)과 INSERT를 한 문장으로 처리하므로,
//! 번호를 먼저 읽고 나중에 넣는 사이에 다른 쓰기가 끼어들 틈이 없습니다.

use crate::error::AppError;
use crate::models::{Session, SessionKey};
use sqlx::{Executor, Sqlite};

/// 새 세션을 엽니다.
///
/// 같은 고객에 대해 두 번 호출하면 서로 다른 세션 두 개가 만들어집니다.
/// 열린 세션을 재사용하려면 서비스 계층의 `ensure_session()`을 사용하세요.
pub async fn open_session<'e, E>(
    executor: E,
    cid: i64,
    start_time: &str,
) -> Result<Session, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    // RETURNING: INSERT된 행을 바로 돌려받습니다 (SQLite 3.35+).
    // 집계 함수(MAX)는 행이 없어도 한 행을 반환하므로 첫 세션은 COALESCE로 1번이 됩니다.
    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (cid, session_no, start_time, end_time)
        SELECT ?, COALESCE(MAX(session_no), 0) + 1, ?, NULL
        FROM sessions
        WHERE cid = ?
        RETURNING cid, session_no, start_time, end_time
        "#,
    )
    .bind(cid)
    .bind(start_time)
    .bind(cid)
    .fetch_one(executor)
    .await?;

    Ok(session)
}

/// 고객의 가장 최근 열린 세션을 찾습니다 (없으면 None).
pub async fn find_open_session<'e, E>(executor: E, cid: i64) -> Result<Option<Session>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT cid, session_no, start_time, end_time
        FROM sessions
        WHERE cid = ? AND end_time IS NULL
        ORDER BY session_no DESC
        LIMIT 1
        "#,
    )
    .bind(cid)
    .fetch_optional(executor)
    .await?;

    Ok(session)
}

/// 열린 세션 목록. `cid`가 None이면 모든 고객의 열린 세션을 반환합니다.
pub async fn list_open_sessions<'e, E>(
    executor: E,
    cid: Option<i64>,
) -> Result<Vec<Session>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    // `? IS NULL OR cid = ?`: 같은 값을 두 번 바인딩해 선택적 필터를 한 쿼리로 표현합니다.
    let sessions = sqlx::query_as::<_, Session>(
        r#"
        SELECT cid, session_no, start_time, end_time
        FROM sessions
        WHERE end_time IS NULL AND (? IS NULL OR cid = ?)
        ORDER BY cid, session_no
        "#,
    )
    .bind(cid)
    .bind(cid)
    .fetch_all(executor)
    .await?;

    Ok(sessions)
}

/// 세션을 종료합니다 (`end_time` 기록).
///
/// 이미 닫힌 세션인지는 다시 검사하지 않습니다.
/// 반환값은 세션이 존재했는지 여부입니다.
pub async fn end_session<'e, E>(
    executor: E,
    key: SessionKey,
    end_time: &str,
) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET end_time = ?
        WHERE cid = ? AND session_no = ?
        "#,
    )
    .bind(end_time)
    .bind(key.cid)
    .bind(key.session_no)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
