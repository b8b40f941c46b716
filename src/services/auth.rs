//! # 계정 서비스
//!
//! 회원가입, 로그인 검증, 초기 영업 계정 생성을 담당합니다.
//! 비밀번호는 Argon2id로 해싱해 저장하며, 평문은 어디에도 남기지 않습니다.

use crate::db::users as db_users;
use crate::error::AppError;
use crate::models::{Credentials, RegisterRequest, UserResponse};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use sqlx::SqlitePool;

const INVALID_LOGIN: &str = "Invalid user number or password";

/// 비밀번호를 Argon2id PHC 문자열로 해싱합니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}

/// 저장된 해시와 비밀번호가 일치하는지 확인합니다.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// 고객 계정을 만듭니다. 발급된 uid가 로그인 아이디가 됩니다.
pub async fn register(pool: &SqlitePool, req: &RegisterRequest) -> Result<UserResponse, AppError> {
    let name = req.name.trim();
    let email = req.email.trim();

    if name.is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if db_users::email_exists(pool, email).await? {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password_hash = hash_password(&req.password)?;
    let user = db_users::create_customer(pool, name, email, &password_hash).await?;

    tracing::info!(uid = user.uid, "Customer registered");
    Ok(UserResponse {
        uid: user.uid,
        role: user.role,
        name: name.to_string(),
    })
}

/// uid와 비밀번호를 확인합니다.
///
/// 계정이 없는 경우와 비밀번호가 틀린 경우를 같은 메시지로 돌려줍니다.
pub async fn authenticate(pool: &SqlitePool, uid: i64, password: &str) -> Result<Credentials, AppError> {
    let creds = db_users::find_credentials(pool, uid)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_LOGIN.to_string()))?;

    if !verify_password(password, &creds.password_hash)? {
        tracing::warn!(uid, "Login failed");
        return Err(AppError::Unauthorized(INVALID_LOGIN.to_string()));
    }

    Ok(creds)
}

/// 영업 계정이 하나도 없을 때만 초기 영업 계정을 만듭니다.
///
/// 새로 만들었으면 그 uid를, 이미 있으면 None을 반환합니다.
pub async fn bootstrap_sales_user(pool: &SqlitePool, password: &str) -> Result<Option<i64>, AppError> {
    if db_users::sales_user_exists(pool).await? {
        return Ok(None);
    }

    let password_hash = hash_password(password)?;
    let user = db_users::create_sales_user(pool, &password_hash).await?;
    tracing::info!(uid = user.uid, role = ?user.role, "Bootstrap sales account created");
    Ok(Some(user.uid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_support::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn password_hash_rejects_other_passwords() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let pool = memory_pool().await;

        let user = register(&pool, &request("Alice", "alice@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Customer);

        let creds = authenticate(&pool, user.uid, "password123").await.unwrap();
        assert_eq!(creds.display_name, "Alice");

        let err = authenticate(&pool, user.uid, "nope-nope").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        let err = authenticate(&pool, user.uid + 100, "password123").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn register_validates_and_rejects_duplicate_email() {
        let pool = memory_pool().await;

        let err = register(&pool, &request("  ", "a@example.com", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let err = register(&pool, &request("Al", "a@example.com", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        register(&pool, &request("Al", "al@example.com", "password123"))
            .await
            .unwrap();
        let err = register(&pool, &request("Other", "AL@Example.com", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn bootstrap_runs_once() {
        let pool = memory_pool().await;

        let uid = bootstrap_sales_user(&pool, "sales-pass").await.unwrap();
        assert!(uid.is_some());
        assert_eq!(bootstrap_sales_user(&pool, "sales-pass").await.unwrap(), None);

        let creds = authenticate(&pool, uid.unwrap(), "sales-pass").await.unwrap();
        assert_eq!(creds.role, Role::Sales);
        assert_eq!(creds.display_name, "Sales");
    }
}
