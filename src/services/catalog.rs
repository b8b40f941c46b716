//! # 상품 카탈로그 서비스
//!
//! - `search()`: 키워드 검색 + 검색 기록 1건 남기기
//! - `get_details()`: 상품 상세 조회 (조회 기록은 호출한 쪽에서 `record_view()`로 남김)
//! - `update_product()`: 영업 계정의 가격/재고 수정 (둘 중 하나만 줘도 됨)
//!
//! 키워드 비교는 ASCII 대소문자만 구분하지 않습니다. SQLite `LOWER()`가 ASCII만 접기 때문에
//! 검색어도 `to_ascii_lowercase()`로 맞춥니다. `É`와 `é`는 서로 다른 글자로 취급됩니다.

use crate::db;
use crate::error::{AppError, Rejection};
use crate::models::{Product, ProductSummary, SessionKey, UpdateProductRequest};
use sqlx::SqlitePool;

/// 검색어 문자열을 공백 기준 키워드 목록으로 나눕니다 (ASCII 소문자 변환).
pub fn split_keywords(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|word| word.to_ascii_lowercase())
        .collect()
}

/// 키워드로 상품을 검색합니다.
///
/// 모든 키워드가 이름 또는 설명에 포함된 상품만 반환합니다 (AND 조건).
/// 검색 기록은 키워드 수와 상관없이 호출 한 번에 한 건만 남깁니다.
/// 결과가 없으면 빈 Vec을 반환합니다 (에러 아님).
pub async fn search(
    pool: &SqlitePool,
    session: SessionKey,
    keywords: &[String],
) -> Result<Vec<ProductSummary>, AppError> {
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(AppError::BadRequest("Keywords cannot be empty".to_string()));
    }

    db::insert_search(pool, session, &db::now_timestamp(), &keywords.join(" ")).await?;

    let products = db::search_products(pool, keywords).await?;
    tracing::debug!(
        cid = session.cid,
        keywords = %keywords.join(" "),
        hits = products.len(),
        "Product search"
    );
    Ok(products)
}

pub async fn get_details(pool: &SqlitePool, pid: i64) -> Result<Option<Product>, AppError> {
    db::get_product(pool, pid).await
}

/// 상품 조회 기록을 남깁니다.
pub async fn record_view(pool: &SqlitePool, session: SessionKey, pid: i64) -> Result<(), AppError> {
    db::insert_view(pool, session, &db::now_timestamp(), pid).await
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(Rejection::NegativePrice.into());
    }
    Ok(())
}

fn validate_stock(stock_count: i64) -> Result<(), AppError> {
    if stock_count < 0 {
        return Err(Rejection::NegativeStock(stock_count).into());
    }
    Ok(())
}

/// 가격과 재고 중 주어진 값만 바꾸고 바뀐 상품을 반환합니다.
///
/// 가격은 음수나 NaN이면, 재고는 음수면 거절하고 없는 상품은 NotFound입니다.
/// 두 값을 모두 먼저 검사한 뒤 한 트랜잭션으로 씁니다.
/// 하나라도 거절되면 아무것도 바뀌지 않습니다.
pub async fn update_product(
    pool: &SqlitePool,
    pid: i64,
    req: &UpdateProductRequest,
) -> Result<Product, AppError> {
    if req.price.is_none() && req.stock_count.is_none() {
        return Err(AppError::BadRequest(
            "Nothing to update: give price or stock_count".to_string(),
        ));
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(stock_count) = req.stock_count {
        validate_stock(stock_count)?;
    }

    let mut tx = pool.begin().await?;

    if let Some(price) = req.price {
        if !db::update_price(&mut *tx, pid, price).await? {
            return Err(AppError::NotFound);
        }
    }
    if let Some(stock_count) = req.stock_count {
        if !db::update_stock(&mut *tx, pid, stock_count).await? {
            return Err(AppError::NotFound);
        }
    }

    let product = db::get_product(&mut *tx, pid)
        .await?
        .ok_or(AppError::NotFound)?;
    tx.commit().await?;

    tracing::info!(
        pid,
        price = product.price,
        stock_count = product.stock_count,
        "Product updated"
    );
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    async fn seed(pool: &SqlitePool) {
        insert_product_with(pool, "Red Lamp", "home", 20.0, 3, "A bright desk lamp").await;
        insert_product_with(pool, "Blue Mug", "kitchen", 5.5, 10, "Ceramic, holds red tea").await;
        insert_product_with(pool, "Green Chair", "home", 45.0, 0, "Wooden chair").await;
    }

    #[tokio::test]
    async fn search_matches_all_keywords_case_insensitively() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let key = customer_session(&pool, "Alice").await;

        let hits = search(&pool, key, &split_keywords("RED")).await.unwrap();
        let names: Vec<_> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Red Lamp", "Blue Mug"]);

        let hits = search(&pool, key, &split_keywords("red lamp")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Red Lamp");
    }

    #[tokio::test]
    async fn keyword_folding_is_ascii_only() {
        let pool = memory_pool().await;
        insert_product_with(&pool, "Écran Plat", "office", 120.0, 2, "Flat screen").await;
        let key = customer_session(&pool, "Alice").await;

        assert_eq!(split_keywords("ÉCRAN plat"), vec!["Écran", "plat"]);

        let hits = search(&pool, key, &split_keywords("ÉCRAN PLAT")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Écran Plat");

        // SQLite LOWER()는 É를 접지 않으므로 소문자 é로는 찾지 못합니다.
        let hits = search(&pool, key, &split_keywords("écran")).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn search_logs_once_per_call_and_allows_no_hits() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let key = customer_session(&pool, "Alice").await;

        let hits = search(&pool, key, &split_keywords("purple sofa")).await.unwrap();
        assert!(hits.is_empty());
        assert_eq!(count_rows(&pool, "search").await, 1);

        let logged: String = sqlx::query_scalar("SELECT query FROM search")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(logged, "purple sofa");
    }

    #[tokio::test]
    async fn search_rejects_blank_keywords() {
        let pool = memory_pool().await;
        let key = customer_session(&pool, "Alice").await;

        let err = search(&pool, key, &split_keywords("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(count_rows(&pool, "search").await, 0);
    }

    #[tokio::test]
    async fn details_and_view_logging() {
        let pool = memory_pool().await;
        let pid = insert_product(&pool, "Lamp", 10.0, 5).await;
        let key = customer_session(&pool, "Alice").await;

        assert!(get_details(&pool, pid + 100).await.unwrap().is_none());

        let product = get_details(&pool, pid).await.unwrap().unwrap();
        assert_eq!(product.stock_count, 5);
        record_view(&pool, key, pid).await.unwrap();
        assert_eq!(count_rows(&pool, "viewed_product").await, 1);
    }

    fn price_only(price: f64) -> UpdateProductRequest {
        UpdateProductRequest {
            price: Some(price),
            stock_count: None,
        }
    }

    fn stock_only(stock_count: i64) -> UpdateProductRequest {
        UpdateProductRequest {
            price: None,
            stock_count: Some(stock_count),
        }
    }

    #[tokio::test]
    async fn single_field_updates_validate_input() {
        let pool = memory_pool().await;
        let pid = insert_product(&pool, "Lamp", 10.0, 5).await;

        let err = update_product(&pool, pid, &price_only(-1.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(Rejection::NegativePrice)));
        let err = update_product(&pool, pid, &price_only(f64::NAN)).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(Rejection::NegativePrice)));

        let err = update_product(&pool, pid, &stock_only(-3)).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(Rejection::NegativeStock(-3))));

        let err = update_product(&pool, pid + 100, &stock_only(3)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        // 한 필드만 바꾸면 다른 필드는 그대로입니다.
        let product = update_product(&pool, pid, &price_only(12.5)).await.unwrap();
        assert_eq!((product.price, product.stock_count), (12.5, 5));
        let product = update_product(&pool, pid, &stock_only(9)).await.unwrap();
        assert_eq!((product.price, product.stock_count), (12.5, 9));
    }

    #[tokio::test]
    async fn combined_update_is_all_or_nothing() {
        let pool = memory_pool().await;
        let pid = insert_product(&pool, "Lamp", 10.0, 5).await;

        let bad = UpdateProductRequest {
            price: Some(15.0),
            stock_count: Some(-1),
        };
        let err = update_product(&pool, pid, &bad).await.unwrap_err();
        assert!(matches!(err, AppError::Rejected(Rejection::NegativeStock(-1))));
        assert_eq!(get_details(&pool, pid).await.unwrap().unwrap().price, 10.0);

        let empty = UpdateProductRequest {
            price: None,
            stock_count: None,
        };
        let err = update_product(&pool, pid, &empty).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let good = UpdateProductRequest {
            price: Some(15.0),
            stock_count: Some(2),
        };
        let product = update_product(&pool, pid, &good).await.unwrap();
        assert_eq!((product.price, product.stock_count), (15.0, 2));

        let err = update_product(&pool, pid + 100, &good).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
