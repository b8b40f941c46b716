//! # 활동 기록 쿼리 모듈
//!
//! 검색 기록(`search`)과 상품 조회 기록(`viewed_product`)은 추가만 하고 수정하지 않습니다.
//! 조회 기록은 "조회 수 상위 상품" 리포트의 입력이 됩니다.

use crate::error::AppError;
use crate::models::SessionKey;
use sqlx::{Executor, Sqlite};

pub async fn insert_search<'e, E>(
    executor: E,
    key: SessionKey,
    ts: &str,
    query: &str,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO search (cid, session_no, ts, query) VALUES (?, ?, ?, ?)")
        .bind(key.cid)
        .bind(key.session_no)
        .bind(ts)
        .bind(query)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn insert_view<'e, E>(
    executor: E,
    key: SessionKey,
    ts: &str,
    pid: i64,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO viewed_product (cid, session_no, ts, pid) VALUES (?, ?, ?, ?)")
        .bind(key.cid)
        .bind(key.session_no)
        .bind(ts)
        .bind(pid)
        .execute(executor)
        .await?;

    Ok(())
}
