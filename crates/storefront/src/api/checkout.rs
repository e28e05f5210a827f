//! Checkout and order endpoints.

use tracing::instrument;
use vibe_commerce_core::{CheckoutRequest, Order, OrderId, OrderSummary, Page, PageRequest, Receipt};

use super::{ApiError, CommerceClient, Envelope};

/// `POST /checkout`, `GET /checkout/orders` and `GET /checkout/orders/{orderId}`.
#[derive(Clone, Copy)]
pub struct CheckoutApi<'a> {
    client: &'a CommerceClient,
}

impl<'a> CheckoutApi<'a> {
    pub(super) const fn new(client: &'a CommerceClient) -> Self {
        Self { client }
    }

    /// Place an order for the given lines.
    ///
    /// The returned receipt carries the server's totals; no customer details
    /// are attached yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the order or the request fails.
    #[instrument(skip(self, request), fields(lines = request.cart_items.len()))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Receipt, ApiError> {
        let envelope: Envelope<Receipt> = self.client.post(&["checkout"], request).await?;
        Ok(envelope.data)
    }

    /// Fetch one page of order history, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(page = page.page))]
    pub async fn orders(
        &self,
        page: PageRequest,
        status: Option<&str>,
    ) -> Result<Page<OrderSummary>, ApiError> {
        let query = [
            ("page", page.page.to_string()),
            ("limit", page.limit.to_string()),
            ("status", status.map(str::trim).unwrap_or_default().to_string()),
        ];
        let envelope: Envelope<Vec<OrderSummary>> =
            self.client.get(&["checkout", "orders"], &query).await?;

        Ok(Page::new(envelope.data, page.page, envelope.pages))
    }

    /// Fetch a single order. Always hits the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        let envelope: Envelope<Order> = self
            .client
            .get(&["checkout", "orders", id.as_str()], &[])
            .await?;
        Ok(envelope.data)
    }
}
