use serde::{Deserialize, Serialize};

/// 사용자 역할: DB에는 소문자 문자열('customer', 'sales')로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Sales,
}

/// 방금 만든 계정 (발급된 uid와 역할)
#[derive(Debug, Clone, Copy)]
pub struct User {
    pub uid: i64,
    pub role: Role,
}

/// 로그인 검증에 필요한 정보
///
/// 비밀번호 비교는 이 구조체를 받은 쪽(인증 라우트)에서 argon2로 수행합니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub uid: i64,
    pub password_hash: String,
    pub role: Role,
    /// 고객이면 고객 이름, 영업 계정이면 "Sales"
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub uid: i64,
    pub role: Role,
    pub name: String,
}

impl From<Credentials> for UserResponse {
    fn from(creds: Credentials) -> Self {
        Self {
            uid: creds.uid,
            role: creds.role,
            name: creds.display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub uid: i64,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}
