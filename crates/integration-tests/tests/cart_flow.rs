//! Cart flows through the storefront against the in-process commerce API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::json;
use vibe_commerce_integration_tests::TestContext;

#[tokio::test]
async fn test_add_to_cart_mirrors_server_cart() {
    let ctx = TestContext::new().await;

    let response = ctx.add_to_cart(1).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Added Pour Over Kettle to your cart"));
    assert!(body.contains("Pour Over Kettle"));
    assert!(body.contains("$45.00"));

    let posts = ctx.api.requests_to("POST", "/cart");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, json!({"productId": 1, "quantity": 1}));
    assert_eq!(ctx.api.store().cart.len(), 1);
}

#[tokio::test]
async fn test_cart_totals_follow_pricing_rules() {
    let ctx = TestContext::new().await;
    for _ in 0..3 {
        ctx.add_to_cart(2).await;
    }

    // 3 x $20.00: tax $6.00, shipping $5.00
    let body = ctx.page("/cart").await;
    assert!(body.contains("$60.00"));
    assert!(body.contains("$6.00"));
    assert!(body.contains("$5.00"));
    assert!(body.contains("$71.00"));
    assert!(!body.contains("Free shipping on orders over $100!"));

    ctx.add_to_cart(1).await;
    ctx.add_to_cart(1).await;

    // $60.00 + $90.00 ships free
    let body = ctx.page("/cart").await;
    assert!(body.contains("$150.00"));
    assert!(body.contains("$165.00"));
    assert!(body.contains("Free shipping on orders over $100!"));
}

#[tokio::test]
async fn test_out_of_stock_product_is_refused_locally() {
    let ctx = TestContext::new().await;

    let body = ctx.add_to_cart(3).await.text().await.unwrap();
    assert!(body.contains("Desk Lamp is out of stock"));
    assert!(ctx.api.requests_to("POST", "/cart").is_empty());
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(1).await;

    let body = ctx
        .submit(
            "/cart/update",
            &[("product_id", "1"), ("quantity", "0"), ("return_to", "/cart")],
        )
        .await
        .text()
        .await
        .unwrap();

    assert!(ctx.api.requests_to("PUT", "/cart/1").is_empty());
    assert_eq!(ctx.api.requests_to("DELETE", "/cart/1").len(), 1);
    assert!(ctx.api.store().cart.is_empty());
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_update_sends_new_quantity() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(1).await;

    ctx.submit(
        "/cart/update",
        &[("product_id", "1"), ("quantity", "3"), ("return_to", "/cart")],
    )
    .await;

    let puts = ctx.api.requests_to("PUT", "/cart/1");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body, json!({"quantity": 3}));
    assert_eq!(ctx.api.store().cart[0].quantity, 3);
}

#[tokio::test]
async fn test_failed_mutation_keeps_cart_and_shows_message() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(1).await;
    ctx.api.fail_with("Cart service unavailable");

    let body = ctx
        .submit(
            "/cart/update",
            &[("product_id", "1"), ("quantity", "2"), ("return_to", "/cart")],
        )
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Cart service unavailable"));
    assert!(body.contains("$45.00"));
    assert!(!body.contains("$90.00"));
    assert_eq!(ctx.api.store().cart[0].quantity, 1);
}

#[tokio::test]
async fn test_clear_empties_cart_and_refetches() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(1).await;
    ctx.add_to_cart(2).await;

    let body = ctx
        .submit("/cart/clear", &[("return_to", "/cart")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Your cart has been cleared"));
    assert!(body.contains("Your cart is empty"));
    assert_eq!(ctx.api.requests_to("DELETE", "/cart").len(), 1);

    // Initial load plus the refetch after clearing
    assert!(ctx.api.requests_to("GET", "/cart").len() >= 2);
}

#[tokio::test]
async fn test_mutation_redirects_to_local_return_path_only() {
    let ctx = TestContext::new().await;

    let response = ctx
        .raw
        .post(ctx.url("/cart/add"))
        .form(&[("product_id", "1"), ("return_to", "//evil.example/")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.starts_with('/') && !location.starts_with("//"));
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(1).await;
    ctx.add_to_cart(2).await;

    let body = ctx.page("/cart/count").await;
    assert!(body.contains('2'));
}
