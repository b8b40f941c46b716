use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::{create_access_token, AuthUser},
    models::*,
    routes::AppState,
    services,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};

fn issue_token(user: &UserResponse, secret: &str) -> Result<String, AppError> {
    create_access_token(user.uid, user.role, secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = services::auth::register(&state.pool, &req).await?;
    let access_token = issue_token(&user, &state.jwt_secret)?;

    Ok(Json(AuthResponse { user, access_token }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let creds = services::auth::authenticate(&state.pool, req.uid, &req.password).await?;
    let user = UserResponse::from(creds);
    let access_token = issue_token(&user, &state.jwt_secret)?;

    tracing::info!(uid = user.uid, role = ?user.role, "Logged in");
    Ok(Json(AuthResponse { user, access_token }))
}

/// 고객이면 열린 세션을 모두 닫고 장바구니를 비웁니다.
/// JWT는 서버에 상태가 없으므로 토큰 폐기는 클라이언트 몫입니다.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let closed = match auth_user.role {
        Role::Customer => {
            services::session::close_open_sessions(&state.pool, auth_user.user_id).await?
        }
        Role::Sales => 0,
    };

    Ok(Json(json!({
        "message": "Logged out successfully",
        "closed_sessions": closed
    })))
}

pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let creds = db_users::find_credentials(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(creds.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::verify_access_token;
    use crate::test_support::*;

    #[tokio::test]
    async fn login_issues_token_with_role() {
        let pool = memory_pool().await;
        let state = AppState {
            pool: pool.clone(),
            jwt_secret: "test-secret".to_string(),
        };

        let Json(registered) = register(
            State(state.clone()),
            Json(RegisterRequest {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(logged_in) = login(
            State(state.clone()),
            Json(LoginRequest {
                uid: registered.user.uid,
                password: "password123".to_string(),
            }),
        )
        .await
        .unwrap();

        let claims = verify_access_token(&logged_in.access_token, "test-secret").unwrap();
        assert_eq!(claims.sub, registered.user.uid);
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(logged_in.user.name, "Alice");
    }

    #[tokio::test]
    async fn logout_closes_customer_sessions() {
        let pool = memory_pool().await;
        let key = customer_session(&pool, "Alice").await;
        let state = AppState {
            pool: pool.clone(),
            jwt_secret: "test-secret".to_string(),
        };

        let Json(body) = logout(
            State(state),
            AuthUser {
                user_id: key.cid,
                role: Role::Customer,
            },
        )
        .await
        .unwrap();

        assert_eq!(body["closed_sessions"], 1);
        assert!(session_end_time(&pool, key).await.is_some());
    }
}
