//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the product grid
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (commerce API reachable)
//!
//! # Products
//! GET  /products               - Product grid (filters + pagination)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (mutations redirect back with a flash)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit of a product
//! POST /cart/update            - Set quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart badge fragment
//!
//! # Checkout
//! GET  /checkout               - Checkout form
//! POST /checkout               - Place the order, redirect to the receipt
//! GET  /checkout/receipt       - Receipt of the last placed order
//!
//! # Orders
//! GET  /orders                 - Order history
//! GET  /orders/{order_id}      - Order details
//!
//! # Theme
//! POST /theme                  - Toggle light/dark
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod products;
pub mod theme;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::form).post(checkout::submit))
        .route("/receipt", get(checkout::receipt))
}

/// Create the order history routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{order_id}", get(orders::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .route("/theme", post(theme::toggle))
}

/// Resolve a `return_to` form field to a same-site path.
///
/// Anything that is not a local absolute path (including protocol-relative
/// `//host` URLs) falls back to `fallback`.
#[must_use]
pub fn local_return_path(candidate: Option<&str>, fallback: &str) -> String {
    candidate
        .map(str::trim)
        .filter(|path| {
            path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control)
        })
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_return_path_accepts_local_paths() {
        assert_eq!(
            local_return_path(Some("/products?page=2"), "/"),
            "/products?page=2"
        );
        assert_eq!(local_return_path(Some(" /cart "), "/"), "/cart");
    }

    #[test]
    fn test_local_return_path_rejects_offsite_targets() {
        assert_eq!(local_return_path(Some("//evil.example"), "/cart"), "/cart");
        assert_eq!(local_return_path(Some("/\\evil.example"), "/cart"), "/cart");
        assert_eq!(
            local_return_path(Some("https://evil.example"), "/cart"),
            "/cart"
        );
        assert_eq!(local_return_path(Some("/a\r\nb"), "/cart"), "/cart");
        assert_eq!(local_return_path(None, "/products"), "/products");
    }
}
