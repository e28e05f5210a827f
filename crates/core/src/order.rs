//! Orders: the checkout payload, placed orders, history rows and receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::PricingBreakdown;
use crate::types::{CustomerDetails, OrderId, OrderStatus, Price, ProductId};

/// One entry of the checkout payload.
///
/// Deliberately carries no price: the commerce API prices the order from
/// its own catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart_items: Vec<CheckoutLine>,
}

/// A line of a placed order, priced by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderLine {
    /// The server's line subtotal, or unit price times quantity if absent.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.subtotal.unwrap_or(self.price * self.quantity)
    }
}

/// A placed order as returned by `GET /checkout/orders/{orderId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub pricing: PricingBreakdown,
    #[serde(default)]
    pub status: OrderStatus,
}

/// A row of the order history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub total_amount: Price,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Confirmation of a successful checkout.
///
/// Totals are exactly what the server returned. Customer details are
/// attached by the storefront from the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReceiptPayload", rename_all = "camelCase")]
pub struct Receipt {
    pub order_id: OrderId,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderLine>,
    pub pricing: PricingBreakdown,
    pub status: OrderStatus,
    pub customer: Option<CustomerDetails>,
}

impl Receipt {
    /// Attach the customer who placed the order.
    #[must_use]
    pub fn with_customer(mut self, customer: CustomerDetails) -> Self {
        self.customer = Some(customer);
        self
    }
}

/// The checkout response reports totals at the top level, while stored
/// orders nest them under `pricing`. Accept either.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptPayload {
    order_id: OrderId,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    items: Vec<OrderLine>,
    #[serde(default)]
    pricing: Option<PricingBreakdown>,
    #[serde(default)]
    subtotal: Option<Price>,
    #[serde(default)]
    tax: Option<Price>,
    #[serde(default)]
    shipping: Option<Price>,
    #[serde(default)]
    total: Option<Price>,
    #[serde(default = "placed_status")]
    status: OrderStatus,
    #[serde(default)]
    customer: Option<CustomerDetails>,
}

/// A confirmed checkout that reports no status has been placed.
const fn placed_status() -> OrderStatus {
    OrderStatus::Completed
}

impl From<ReceiptPayload> for Receipt {
    fn from(payload: ReceiptPayload) -> Self {
        let pricing = payload.pricing.unwrap_or_else(|| {
            let subtotal = payload.subtotal.unwrap_or_default();
            let tax = payload.tax.unwrap_or_default();
            let shipping = payload.shipping.unwrap_or_default();
            PricingBreakdown {
                subtotal,
                tax,
                shipping,
                total: payload.total.unwrap_or(subtotal + tax + shipping),
            }
        });

        Self {
            order_id: payload.order_id,
            created_at: payload.created_at,
            items: payload.items,
            pricing,
            status: payload.status,
            customer: payload.customer,
        }
    }
}
