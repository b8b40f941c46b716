//! # 인증 추출기(Extractor)
//!
//! `Authorization: Bearer <JWT>` 헤더에서 사용자를 꺼냅니다.
//!
//! - `AuthUser`: 로그인만 확인 (역할 무관)
//! - `CustomerUser`: 고객 계정만 허용 (검색, 장바구니, 주문)
//! - `SalesUser`: 영업 계정만 허용 (가격/재고 변경, 리포트)
//!
//! 역할이 맞지 않으면 403을 돌려줍니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::Role;
use crate::routes::AppState;

/// 액세스 토큰 유효 시간
const ACCESS_TOKEN_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64, // uid
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

/// 고객 계정. `cid`는 uid와 같습니다.
#[derive(Debug, Clone, Copy)]
pub struct CustomerUser {
    pub cid: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct SalesUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = verify_access_token(token, &state.jwt_secret)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for CustomerUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Customer => Ok(CustomerUser { cid: user.user_id }),
            Role::Sales => Err(AuthError::WrongRole(Role::Customer)),
        }
    }
}

impl FromRequestParts<AppState> for SalesUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Sales => Ok(SalesUser {
                user_id: user.user_id,
            }),
            Role::Customer => Err(AuthError::WrongRole(Role::Sales)),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    /// 필요한 역할
    WrongRole(Role),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Authorization token is required",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid authorization token",
            ),
            AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "expired_token",
                "Authorization token has expired",
            ),
            AuthError::WrongRole(Role::Customer) => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "This action requires a customer account",
            ),
            AuthError::WrongRole(Role::Sales) => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "This action requires a sales account",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

pub fn create_access_token(
    user_id: i64,
    role: Role,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: (now + Duration::hours(ACCESS_TOKEN_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_uid_and_role() {
        let token = create_access_token(42, Role::Sales, "secret").unwrap();
        let claims = verify_access_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Sales);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = create_access_token(7, Role::Customer, "secret").unwrap();
        assert_eq!(
            verify_access_token(&token, "other").unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let now = Utc::now();
        let claims = Claims {
            sub: 7,
            role: Role::Customer,
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert_eq!(
            verify_access_token(&token, "secret").unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[test]
    fn wrong_role_is_forbidden() {
        let resp = AuthError::WrongRole(Role::Sales).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
