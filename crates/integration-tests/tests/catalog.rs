//! Product listing, filtering and pagination.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use vibe_commerce_integration_tests::{TestContext, numbered_catalog};

#[tokio::test]
async fn test_listing_shows_products_and_stock() {
    let ctx = TestContext::new().await;

    let body = ctx.page("/products").await;
    assert!(body.contains("Featured Products"));
    assert!(body.contains("Pour Over Kettle"));
    assert!(body.contains("Desk Lamp"));
    assert!(body.contains("Out of stock"));
    assert_eq!(
        ctx.api.requests_to("GET", "/products")[0].query.as_deref(),
        Some("page=1&limit=12")
    );
}

#[tokio::test]
async fn test_filters_are_forwarded() {
    let ctx = TestContext::new().await;

    let body = ctx
        .page("/products?search=apron&category=Kitchen&minPrice=10&maxPrice=30")
        .await;

    assert!(body.contains("Linen Apron"));
    assert!(!body.contains("Pour Over Kettle"));
    let query = ctx
        .api
        .requests_to("GET", "/products")
        .last()
        .and_then(|r| r.query.clone())
        .unwrap();
    assert_eq!(
        query,
        "search=apron&category=Kitchen&minPrice=10&maxPrice=30&page=1&limit=12"
    );
}

#[tokio::test]
async fn test_no_matches_message() {
    let ctx = TestContext::new().await;

    let body = ctx.page("/products?search=teapot").await;
    assert!(body.contains("No products found matching your filters"));
}

#[tokio::test]
async fn test_second_page_requests_page_two() {
    let ctx = TestContext::with_products(numbered_catalog(20)).await;

    let first = ctx.page("/products").await;
    assert!(first.contains("Next"));
    assert!(first.contains("Product 12"));
    assert!(!first.contains("Product 13"));

    let second = ctx.page("/products?page=2").await;
    assert!(second.contains("Product 13"));
    assert!(second.contains("Product 20"));
    assert!(!second.contains("Product 12"));
    assert!(!second.contains("Product 1<"));
    assert_eq!(
        ctx.api
            .requests_to("GET", "/products")
            .last()
            .and_then(|r| r.query.as_deref()),
        Some("page=2&limit=12")
    );
}

#[tokio::test]
async fn test_product_detail_and_missing_product() {
    let ctx = TestContext::new().await;

    let body = ctx.page("/products/1").await;
    assert!(body.contains("Pour Over Kettle description"));
    assert!(body.contains("8 in stock"));

    let missing = ctx.client.get(ctx.url("/products/99")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let garbage = ctx.client.get(ctx.url("/products/abc")).send().await.unwrap();
    assert_eq!(garbage.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_readiness_reaches_commerce_api() {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
