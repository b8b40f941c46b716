//! 테스트 공용 도우미
//!
//! 인메모리 SQLite는 연결마다 별도의 DB가 되므로,
//! 풀의 연결을 하나로 고정하고 만료되지 않게 설정합니다.

use crate::models::SessionKey;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

pub async fn insert_product(pool: &SqlitePool, name: &str, price: f64, stock: i64) -> i64 {
    insert_product_with(pool, name, "general", price, stock, "").await
}

pub async fn insert_product_with(
    pool: &SqlitePool,
    name: &str,
    category: &str,
    price: f64,
    stock: i64,
    descr: &str,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO products (name, category, price, stock_count, descr)
        VALUES (?, ?, ?, ?, ?)
        RETURNING pid
        "#,
    )
    .bind(name)
    .bind(category)
    .bind(price)
    .bind(stock)
    .bind(descr)
    .fetch_one(pool)
    .await
    .expect("insert product")
}

/// 고객 계정을 만듭니다 (비밀번호 해시는 테스트에서 쓰지 않으므로 더미 값).
pub async fn insert_customer(pool: &SqlitePool, name: &str) -> i64 {
    let email = format!("{}@example.com", name.to_lowercase());
    crate::db::users::create_customer(pool, name, &email, "not-a-hash")
        .await
        .expect("insert customer")
        .uid
}

/// 고객 하나와 열린 세션 하나를 만듭니다.
pub async fn customer_session(pool: &SqlitePool, name: &str) -> SessionKey {
    let cid = insert_customer(pool, name).await;
    let session = crate::db::open_session(pool, cid, "2024-01-01 09:00:00")
        .await
        .expect("open session");
    SessionKey::from(&session)
}

pub async fn stock_of(pool: &SqlitePool, pid: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT stock_count FROM products WHERE pid = ?")
        .bind(pid)
        .fetch_one(pool)
        .await
        .expect("stock")
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count")
}

/// 세션의 종료 시각 (열려 있으면 None)
pub async fn session_end_time(pool: &SqlitePool, key: SessionKey) -> Option<String> {
    sqlx::query_scalar::<_, Option<String>>(
        "SELECT end_time FROM sessions WHERE cid = ? AND session_no = ?",
    )
    .bind(key.cid)
    .bind(key.session_no)
    .fetch_one(pool)
    .await
    .expect("session row")
}
