use crate::error::AppError;
use crate::models::user::{Credentials, Role, User};
use sqlx::SqlitePool;

/// 고객 계정을 만듭니다.
///
/// `users`와 `customers` 두 테이블에 나눠 들어가므로 트랜잭션으로 묶습니다.
/// uid는 AUTOINCREMENT가 발급하고, 이메일은 소문자로 정규화해 저장합니다.
pub async fn create_customer(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let mut tx = pool.begin().await?;

    let uid = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (password_hash, role)
        VALUES (?, 'customer')
        RETURNING uid
        "#,
    )
    .bind(password_hash)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO customers (cid, name, email)
        VALUES (?, ?, LOWER(?))
        "#,
    )
    .bind(uid)
    .bind(name)
    .bind(email)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(User {
        uid,
        role: Role::Customer,
    })
}

pub async fn create_sales_user(pool: &SqlitePool, password_hash: &str) -> Result<User, AppError> {
    let uid = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (password_hash, role)
        VALUES (?, 'sales')
        RETURNING uid
        "#,
    )
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(User {
        uid,
        role: Role::Sales,
    })
}

pub async fn sales_user_exists(pool: &SqlitePool) -> Result<bool, AppError> {
    let found = sqlx::query_scalar::<_, i64>("SELECT uid FROM users WHERE role = 'sales' LIMIT 1")
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// 이메일 중복 여부 (대소문자 무시)
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, AppError> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT cid FROM customers WHERE LOWER(email) = LOWER(?)",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// 로그인 검증용 정보를 조회합니다.
///
/// 영업 계정은 `customers` 행이 없으므로 표시 이름이 "Sales"가 됩니다.
pub async fn find_credentials(pool: &SqlitePool, uid: i64) -> Result<Option<Credentials>, AppError> {
    let creds = sqlx::query_as::<_, Credentials>(
        r#"
        SELECT u.uid, u.password_hash, u.role,
               COALESCE(c.name, 'Sales') AS display_name
        FROM users u
        LEFT JOIN customers c ON c.cid = u.uid
        WHERE u.uid = ?
        "#,
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?;

    Ok(creds)
}
