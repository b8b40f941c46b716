//! # 상품 모델 정의
//!
//! - `Product`: `products` 테이블 한 행 (상세 조회용)
//! - `ProductSummary`: 검색 결과 목록에 쓰는 요약
//! - `UpdateProductRequest`: 영업 계정의 가격/재고 수정 요청

use serde::{Deserialize, Serialize};

/// 상품 엔티티
///
/// `stock_count`는 어떤 변경 후에도 0 이상이어야 합니다.
/// (코드에서 검사하고, 스키마의 CHECK 제약이 한 번 더 막습니다.)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub pid: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock_count: i64,
    pub descr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSummary {
    pub pid: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock_count: i64,
}

/// 상품 수정 요청: `PATCH /api/v1/products/{pid}`
///
/// 두 필드 모두 Option입니다. 빠진 필드는 변경하지 않습니다.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub price: Option<f64>,
    pub stock_count: Option<i64>,
}
