//! # Storefront 웹 서버 진입점
//!
//! 상품 검색, 장바구니, 주문, 매출 리포트를 제공하는 주문 관리 서버입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 초기 영업 계정 생성 (필요한 경우)
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작, Ctrl+C를 받으면 열린 세션을 모두 닫고 종료

// ── 모듈 선언 ──
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

// 테스트 전용 도우미 (인메모리 DB, 시드 데이터)
#[cfg(test)]
mod test_support;

use anyhow::Result; // main에서만 anyhow를 씁니다. 나머지 계층은 AppError(thiserror)
use axum::{
    routing::{get, post, put},
    Router,
};
use config::Config;
use routes::{AppState, *};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 storefront, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting Storefront server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 초기 영업 계정 ──
    // SALES_BOOTSTRAP_PASSWORD가 설정되어 있고 영업 계정이 하나도 없을 때만 만듭니다.
    // 로그인은 uid로 하므로 발급된 uid를 로그에 남깁니다.
    if let Some(password) = &config.sales_bootstrap_password {
        if let Some(uid) = services::auth::bootstrap_sales_user(&pool, password).await? {
            tracing::info!("Sales account created with uid {}", uid);
        }
    }

    // 이전 실행이 비정상 종료되어 열린 채 남은 세션을 정리합니다.
    let stale = services::session::close_all_open_sessions(&pool).await?;
    if stale > 0 {
        tracing::warn!("Closed {} session(s) left open by a previous run", stale);
    }

    // ── 7단계: 애플리케이션 상태(State) 생성 ──
    // SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
    let state = AppState {
        pool: pool.clone(),
        jwt_secret: config.jwt_secret.clone(),
    };

    // ── 8단계: API 라우터 설정 ──
    let auth_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me));

    let api_routes = Router::new()
        .merge(auth_routes)
        // 상품 (검색/상세는 고객, 수정은 영업)
        // axum 0.8부터 경로 파라미터는 `{pid}` 형식입니다.
        .route("/products/search", get(search_products))
        .route("/products/{pid}", get(get_product).patch(update_product))
        // 장바구니
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_cart_item))
        .route("/cart/items/{pid}", put(set_cart_item).delete(remove_cart_item))
        // 주문
        .route("/checkout", post(checkout))
        .route("/orders", get(list_orders))
        .route("/orders/{ono}", get(get_order))
        // 매출 리포트 (영업)
        .route("/reports/weekly", get(weekly_report))
        .route("/reports/top-products", get(top_products_report))
        // 헬스체크
        .route("/health", get(health_check))
        .with_state(state);

    // ── 9단계: CORS 미들웨어 설정 ──
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ── 10단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Ctrl+C를 받을 때까지 실행됩니다. 진행 중인 요청은 끝까지 처리됩니다.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 11단계: 종료 정리 ──
    // 열린 세션을 모두 닫고 남은 장바구니를 비웁니다.
    let closed = services::session::close_all_open_sessions(&pool).await?;
    tracing::info!("Shutdown complete, closed {} open session(s)", closed);

    pool.close().await;
    Ok(())
}

/// Ctrl+C 신호를 기다립니다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 신호를 받을 수 없으면 서버를 내리지 않고 계속 실행합니다.
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
