//! End-to-end tests for the Vibe Commerce storefront.
//!
//! Each test gets its own in-process commerce API ([`FakeCommerce`]) and a
//! storefront wired to it, both bound to ephemeral ports on `127.0.0.1`.
//! Nothing outside the process is contacted.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vibe-commerce-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use vibe_commerce_integration_tests::TestContext;
//!
//! #[tokio::test]
//! async fn test_products_page() {
//!     let ctx = TestContext::new().await;
//!     let body = ctx.page("/products").await;
//!     assert!(body.contains("Featured Products"));
//! }
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::response::Json;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use vibe_commerce_core::{
    CartItem, Order, OrderLine, OrderStatus, OrderSummary, Price, PricingBreakdown, Product,
    ProductId,
};
use vibe_commerce_storefront::api::CommerceClient;
use vibe_commerce_storefront::config::{CommerceApiConfig, StorefrontConfig};
use vibe_commerce_storefront::state::AppState;

/// A request as the fake API saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

/// Server-side state of the fake commerce API.
#[derive(Debug, Default)]
pub struct Store {
    pub products: Vec<Product>,
    pub cart: Vec<CartItem>,
    pub orders: Vec<Order>,
    pub requests: Vec<Recorded>,
    /// When set, cart mutations and checkout fail with this message.
    pub outage: Option<String>,
}

type Reply = (StatusCode, Json<Value>);

/// In-process commerce API holding a catalog, one cart and placed orders.
#[derive(Clone)]
pub struct FakeCommerce {
    store: Arc<Mutex<Store>>,
    base_url: String,
}

impl FakeCommerce {
    /// Serve `products` on an ephemeral port.
    pub async fn spawn(products: Vec<Product>) -> Self {
        let store = Arc::new(Mutex::new(Store {
            products,
            ..Store::default()
        }));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake commerce API");
        let addr = listener.local_addr().expect("fake API address");
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&store));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            store,
            base_url: format!("http://{addr}/api"),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lock the server state for inspection or setup.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("fake store lock")
    }

    /// Make every cart mutation and checkout fail with `message`.
    pub fn fail_with(&self, message: &str) {
        self.store().outage = Some(message.to_string());
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<Recorded> {
        self.store().requests.clone()
    }

    /// Requests matching `method` and a path under `/api`.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        let full = format!("/api{path}");
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full)
            .collect()
    }
}

/// A storefront running against a fresh [`FakeCommerce`].
pub struct TestContext {
    pub api: FakeCommerce,
    pub storefront_url: String,
    /// Follows redirects, like a browser.
    pub client: reqwest::Client,
    /// Shares cookies with `client` but stops at redirects.
    pub raw: reqwest::Client,
}

impl TestContext {
    /// Storefront over the default [`catalog`].
    pub async fn new() -> Self {
        Self::with_products(catalog()).await
    }

    pub async fn with_products(products: Vec<Product>) -> Self {
        let api = FakeCommerce::spawn(products).await;

        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("API client");
        let commerce_config =
            CommerceApiConfig::with_base_url(api.base_url()).expect("fake API base URL");
        let commerce = CommerceClient::with_http_client(&commerce_config, http);
        let state = AppState::with_client(StorefrontConfig::local(commerce_config), commerce);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind storefront");
        let addr = listener.local_addr().expect("storefront address");
        let app = vibe_commerce_storefront::app(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let jar = Arc::new(Jar::default());
        let browser = |policy: Policy| {
            reqwest::Client::builder()
                .no_proxy()
                .cookie_provider(Arc::clone(&jar))
                .redirect(policy)
                .build()
                .expect("storefront client")
        };

        Self {
            api,
            storefront_url: format!("http://{addr}"),
            client: browser(Policy::limited(10)),
            raw: browser(Policy::none()),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// GET a page and return its body, asserting a 200.
    pub async fn page(&self, path: &str) -> String {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("storefront request");
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        response.text().await.expect("page body")
    }

    /// Submit a form and follow the redirect, returning the final response.
    pub async fn submit(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("form submission")
    }

    /// Add one unit of `product_id` from the cart page.
    pub async fn add_to_cart(&self, product_id: i64) -> reqwest::Response {
        let id = product_id.to_string();
        self.submit("/cart/add", &[("product_id", &id), ("return_to", "/cart")])
            .await
    }
}

/// Three products across two categories, one of them sold out.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        product(1, "Pour Over Kettle", 4500, "Kitchen", 8),
        product(2, "Linen Apron", 2000, "Kitchen", 3),
        product(3, "Desk Lamp", 7500, "Office", 0),
    ]
}

/// `count` in-stock products named `Product N`.
#[must_use]
pub fn numbered_catalog(count: i64) -> Vec<Product> {
    (1..=count)
        .map(|id| product(id, &format!("Product {id}"), 1000, "General", 10))
        .collect()
}

#[must_use]
pub fn product(id: i64, name: &str, cents: i64, category: &str, stock: u32) -> Product {
    Product {
        product_id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} description"),
        price: Price::from_cents(cents),
        category: category.to_string(),
        stock,
        image: None,
    }
}

// =============================================================================
// Fake API routing
// =============================================================================

async fn handle(State(store): State<Arc<Mutex<Store>>>, request: Request<Body>) -> Reply {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(query)| query)
        .unwrap_or_default();

    let mut store = store.lock().expect("fake store lock");
    store.requests.push(Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_owned),
        body: body.clone(),
    });

    let path = parts.uri.path().trim_start_matches("/api/");
    let segments: Vec<&str> = path.split('/').collect();
    match (parts.method.as_str(), segments.as_slice()) {
        ("GET", ["products"]) => store.list_products(&query),
        ("GET", ["products", id]) => store.product(id),
        ("GET", ["cart"]) => ok(json!({ "items": store.cart })),
        ("POST", ["cart"]) => store.add_to_cart(&body),
        ("PUT", ["cart", id]) => store.update_line(id, &body),
        ("DELETE", ["cart", id]) => store.remove_line(id),
        ("DELETE", ["cart"]) => store.clear_cart(),
        ("POST", ["checkout"]) => store.checkout(&body),
        ("GET", ["checkout", "orders"]) => store.list_orders(&query),
        ("GET", ["checkout", "orders", id]) => store.order(id),
        _ => failure(StatusCode::NOT_FOUND, "Route not found"),
    }
}

impl Store {
    fn list_products(&self, query: &HashMap<String, String>) -> Reply {
        let param = |key: &str| query.get(key).map(String::as_str);
        let price = |key: &str| param(key).and_then(|raw| raw.parse::<Price>().ok());
        let search = param("search").map(str::to_lowercase);
        let (min, max) = (price("minPrice"), price("maxPrice"));

        let matching: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                search
                    .as_deref()
                    .is_none_or(|s| p.name.to_lowercase().contains(s))
            })
            .filter(|p| param("category").is_none_or(|c| p.category == c))
            .filter(|p| min.is_none_or(|min| p.price >= min))
            .filter(|p| max.is_none_or(|max| p.price <= max))
            .collect();

        paged(&matching, query)
    }

    fn product(&self, id: &str) -> Reply {
        self.find_product(id).map_or_else(
            || failure(StatusCode::NOT_FOUND, "Product not found"),
            |p| ok(json!(p)),
        )
    }

    fn add_to_cart(&mut self, body: &Value) -> Reply {
        if let Some(reply) = self.outage_reply() {
            return reply;
        }
        let id = body["productId"].as_i64().unwrap_or_default();
        let quantity = body["quantity"]
            .as_u64()
            .and_then(|q| u32::try_from(q).ok())
            .unwrap_or(1);
        let Some(product) = self.find_product(&id.to_string()).cloned() else {
            return failure(StatusCode::NOT_FOUND, "Product not found");
        };

        let in_cart = self
            .line(product.product_id)
            .map_or(0, |line| line.quantity);
        if in_cart + quantity > product.stock {
            return failure(StatusCode::BAD_REQUEST, "Insufficient stock");
        }

        match self
            .cart
            .iter_mut()
            .find(|line| line.product_id == product.product_id)
        {
            Some(line) => line.quantity += quantity,
            None => {
                let mut line = CartItem::from_product(&product);
                line.quantity = quantity;
                self.cart.push(line);
            }
        }
        ok(json!({ "items": self.cart }))
    }

    fn update_line(&mut self, id: &str, body: &Value) -> Reply {
        if let Some(reply) = self.outage_reply() {
            return reply;
        }
        let quantity = body["quantity"].as_u64().unwrap_or_default();
        let Some(line) = self
            .cart
            .iter_mut()
            .find(|line| line.product_id.to_string() == id)
        else {
            return failure(StatusCode::NOT_FOUND, "Item not in cart");
        };
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        ok(json!({ "items": self.cart }))
    }

    fn remove_line(&mut self, id: &str) -> Reply {
        if let Some(reply) = self.outage_reply() {
            return reply;
        }
        self.cart.retain(|line| line.product_id.to_string() != id);
        ok(json!({ "items": self.cart }))
    }

    fn clear_cart(&mut self) -> Reply {
        if let Some(reply) = self.outage_reply() {
            return reply;
        }
        self.cart.clear();
        ok(json!({ "items": [] }))
    }

    fn checkout(&mut self, body: &Value) -> Reply {
        if let Some(reply) = self.outage_reply() {
            return reply;
        }
        let requested = body["cartItems"].as_array().cloned().unwrap_or_default();
        if requested.is_empty() {
            return failure(StatusCode::BAD_REQUEST, "Cart is empty");
        }

        let mut items = Vec::with_capacity(requested.len());
        for entry in &requested {
            let id = entry["productId"].as_i64().unwrap_or_default();
            let quantity = entry["quantity"]
                .as_u64()
                .and_then(|q| u32::try_from(q).ok())
                .unwrap_or_default();
            let Some(product) = self.find_product(&id.to_string()) else {
                return failure(StatusCode::NOT_FOUND, "Product not found");
            };
            items.push(OrderLine {
                product_id: Some(product.product_id),
                name: product.name.clone(),
                price: product.price,
                quantity,
                subtotal: Some(product.price * quantity),
                image: None,
            });
        }

        let pricing =
            PricingBreakdown::from_subtotal(items.iter().map(OrderLine::line_total).sum());
        let order = Order {
            order_id: format!("ORD-{}", 1001 + self.orders.len()).into(),
            created_at: None,
            items,
            pricing,
            status: OrderStatus::Completed,
        };
        self.orders.push(order.clone());
        self.cart.clear();

        ok(json!({
            "orderId": order.order_id,
            "items": order.items,
            "subtotal": pricing.subtotal,
            "tax": pricing.tax,
            "shipping": pricing.shipping,
            "total": pricing.total,
            "status": order.status,
        }))
    }

    fn list_orders(&self, query: &HashMap<String, String>) -> Reply {
        let status = query.get("status").map(String::as_str);
        let summaries: Vec<OrderSummary> = self
            .orders
            .iter()
            .rev()
            .filter(|order| status.is_none_or(|s| order.status.as_str() == s))
            .map(|order| OrderSummary {
                order_id: order.order_id.clone(),
                total_amount: order.pricing.total,
                total_items: order.items.iter().map(|line| line.quantity).sum(),
                status: order.status.clone(),
                created_at: order.created_at,
            })
            .collect();
        paged(&summaries.iter().collect::<Vec<_>>(), query)
    }

    fn order(&self, id: &str) -> Reply {
        self.orders
            .iter()
            .find(|order| order.order_id.as_str() == id)
            .map_or_else(
                || failure(StatusCode::NOT_FOUND, "Order not found"),
                |order| ok(json!(order)),
            )
    }

    fn find_product(&self, id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.product_id.to_string() == id)
    }

    fn line(&self, id: ProductId) -> Option<&CartItem> {
        self.cart.iter().find(|line| line.product_id == id)
    }

    fn outage_reply(&self) -> Option<Reply> {
        self.outage
            .as_deref()
            .map(|message| failure(StatusCode::SERVICE_UNAVAILABLE, message))
    }
}

fn ok(data: Value) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

fn failure(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "success": false, "message": message })))
}

fn paged<T: serde::Serialize>(items: &[&T], query: &HashMap<String, String>) -> Reply {
    let number = |key: &str, default: usize| {
        query
            .get(key)
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(default)
    };
    let (page, limit) = (number("page", 1), number("limit", 12));
    let pages = items.len().div_ceil(limit).max(1);
    let slice: Vec<&&T> = items.iter().skip((page - 1) * limit).take(limit).collect();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": slice, "pages": pages })),
    )
}
