//! # 상품 데이터베이스 쿼리 모듈
//!
//! 상품 상세 조회, 키워드 검색, 영업 계정의 가격/재고 변경,
//! 그리고 체크아웃 중의 재고 차감을 담당합니다.

use crate::error::AppError;
use crate::models::{Product, ProductSummary};
use sqlx::{Executor, Sqlite};

/// ID로 상품 하나를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Product))`: 상품을 찾은 경우
/// - `Ok(None)`: 해당 pid의 상품이 없는 경우
pub async fn get_product<'e, E>(executor: E, pid: i64) -> Result<Option<Product>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT pid, name, category, price, stock_count, descr
        FROM products
        WHERE pid = ?
        "#,
    )
    .bind(pid)
    .fetch_optional(executor)
    .await?;

    Ok(product)
}

/// LIKE 패턴의 특수문자(`%`, `_`, `\`)를 이스케이프합니다.
///
/// 사용자가 입력한 "50%" 같은 키워드가 와일드카드로 해석되지 않도록 합니다.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 키워드로 상품을 검색합니다.
///
/// 키워드마다 `(이름 LIKE %k% OR 설명 LIKE %k%)` 조건을 만들고,
/// 키워드 사이는 AND로 묶습니다. 대소문자는 ASCII 범위에서만 구분하지 않습니다
/// (SQLite `LOWER()`와 같은 규칙).
///
/// 예: ["red", "lamp"] →
/// ```text
/// WHERE (LOWER(name) LIKE '%red%' ESCAPE '\' OR LOWER(descr) LIKE '%red%' ESCAPE '\')
///   AND (LOWER(name) LIKE '%lamp%' ESCAPE '\' OR LOWER(descr) LIKE '%lamp%' ESCAPE '\')
/// ```
///
/// 키워드가 비어 있으면 쿼리 없이 빈 결과를 반환합니다.
pub async fn search_products<'e, E>(
    executor: E,
    keywords: &[String],
) -> Result<Vec<ProductSummary>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    // ── 동적 쿼리 구성 ──
    // 조건 문자열과 바인딩 값을 따로 모은 뒤, 마지막에 순서대로 바인딩합니다.
    let mut conditions: Vec<&str> = Vec::with_capacity(keywords.len());
    let mut bindings: Vec<String> = Vec::with_capacity(keywords.len() * 2);

    for keyword in keywords {
        conditions.push(
            r"(LOWER(name) LIKE ? ESCAPE '\' OR LOWER(descr) LIKE ? ESCAPE '\')",
        );
        let pattern = format!("%{}%", escape_like(&keyword.to_ascii_lowercase()));
        bindings.push(pattern.clone());
        bindings.push(pattern);
    }

    let query = format!(
        "SELECT pid, name, category, price, stock_count FROM products WHERE {} ORDER BY pid",
        conditions.join(" AND ")
    );

    let mut query_builder = sqlx::query_as::<_, ProductSummary>(&query);
    for binding in bindings {
        query_builder = query_builder.bind(binding);
    }

    let products = query_builder.fetch_all(executor).await?;
    Ok(products)
}

/// 상품 가격을 변경합니다. 음수 검사는 서비스 계층에서 합니다.
///
/// 반환값: 해당 상품이 있었는지 여부
pub async fn update_price<'e, E>(executor: E, pid: i64, price: f64) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE products SET price = ? WHERE pid = ?")
        .bind(price)
        .bind(pid)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 상품 재고를 절대값으로 설정합니다.
pub async fn update_stock<'e, E>(executor: E, pid: i64, stock_count: i64) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE products SET stock_count = ? WHERE pid = ?")
        .bind(stock_count)
        .bind(pid)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 재고를 `qty`만큼 차감합니다.
///
/// `stock_count >= qty` 조건을 WHERE에 함께 걸어서,
/// 재고가 모자라면 아무 행도 바뀌지 않고 `false`를 반환합니다.
pub async fn decrement_stock<'e, E>(executor: E, pid: i64, qty: i64) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock_count = stock_count - ?
        WHERE pid = ? AND stock_count >= ?
        "#,
    )
    .bind(qty)
    .bind(pid)
    .bind(qty)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
