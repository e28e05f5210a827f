//! Order history route handlers.
//!
//! Both pages read straight from the commerce API on every view; nothing is
//! carried from the list to the detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use vibe_commerce_core::{Order, OrderId, OrderSummary, PageRequest};

use crate::error::AppError;
use crate::filters;
use crate::models::{Layout, PageContext, Pagination, listing_href};
use crate::state::AppState;

/// Status filter options offered on the history page.
const STATUS_OPTIONS: [&str; 2] = ["pending", "completed"];

/// History query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub page: Option<String>,
    pub status: Option<String>,
}

impl OrderQuery {
    fn status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::orders(self.page.as_deref().and_then(|p| p.trim().parse().ok()))
    }

    fn page_href(&self, page: u32) -> String {
        listing_href(
            "/orders",
            [
                ("status", self.status().unwrap_or_default().to_string()),
                ("page", page.to_string()),
            ],
        )
    }
}

/// An entry of the status dropdown.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderSummary>,
    pub statuses: Vec<StatusOption>,
    pub filtered: bool,
    pub error: Option<String>,
    pub pagination: Option<Pagination>,
}

/// Order details template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub layout: Layout,
    pub order_id: String,
    pub order: Option<Order>,
    pub error: Option<String>,
}

/// Display the order history.
#[instrument(skip(state, session, context))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
    Query(query): Query<OrderQuery>,
) -> Result<OrdersIndexTemplate, AppError> {
    let (layout, _cart) = Layout::load(&state, &session, context).await?;
    let status = query.status();

    let (orders, pagination, error) = match state
        .commerce()
        .checkout()
        .orders(query.page_request(), status)
        .await
    {
        Ok(page) => {
            let pagination = Pagination::for_page(&page, |n| query.page_href(n));
            (page.items, pagination, None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load orders");
            (Vec::new(), None, Some(e.user_message()))
        }
    };

    Ok(OrdersIndexTemplate {
        layout,
        orders,
        statuses: STATUS_OPTIONS
            .into_iter()
            .map(|value| StatusOption {
                value,
                selected: status == Some(value),
            })
            .collect(),
        filtered: status.is_some(),
        error,
        pagination,
    })
}

/// Display a single order, fetched fresh.
#[instrument(skip(state, session, context))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
    Path(order_id): Path<String>,
) -> Result<(StatusCode, OrderShowTemplate), AppError> {
    let (layout, _cart) = Layout::load(&state, &session, context).await?;

    let (status, order, error) = match state
        .commerce()
        .checkout()
        .order(&OrderId::new(order_id.as_str()))
        .await
    {
        Ok(order) => (StatusCode::OK, Some(order), None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load order");
            let status = if e.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            };
            (status, None, Some(e.user_message()))
        }
    };

    Ok((
        status,
        OrderShowTemplate {
            layout,
            order_id,
            order,
            error,
        },
    ))
}
