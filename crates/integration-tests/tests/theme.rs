//! Light/dark theme preference.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use vibe_commerce_integration_tests::TestContext;

#[tokio::test]
async fn test_theme_defaults_to_light_and_toggles() {
    let ctx = TestContext::new().await;

    assert!(ctx.page("/products").await.contains(r#"class="theme-light""#));

    let response = ctx
        .raw
        .post(ctx.url("/theme"))
        .form(&[("return_to", "/cart")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/cart");
    let cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("theme=dark"));

    // The cookie persists across pages
    assert!(ctx.page("/products").await.contains(r#"class="theme-dark""#));
    assert!(ctx.page("/orders").await.contains(r#"class="theme-dark""#));

    ctx.submit("/theme", &[("return_to", "/products")]).await;
    assert!(ctx.page("/products").await.contains(r#"class="theme-light""#));
}
