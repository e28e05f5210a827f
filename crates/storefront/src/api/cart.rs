//! Server-side cart endpoints.

use serde::Serialize;
use serde::de::IgnoredAny;
use tracing::instrument;
use vibe_commerce_core::{Cart, CartMutation, ProductId};

use super::{ApiError, CommerceClient, Envelope};

/// `GET|POST|DELETE /cart` and `PUT|DELETE /cart/{productId}`.
#[derive(Clone, Copy)]
pub struct CartApi<'a> {
    client: &'a CommerceClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartBody {
    product_id: ProductId,
    quantity: u32,
}

#[derive(Serialize)]
struct UpdateQuantityBody {
    quantity: u32,
}

impl<'a> CartApi<'a> {
    pub(super) const fn new(client: &'a CommerceClient) -> Self {
        Self { client }
    }

    /// Fetch the caller's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Cart, ApiError> {
        let envelope: Envelope<Cart> = self.client.get(&["cart"], &[]).await?;
        Ok(envelope.data)
    }

    /// Add `quantity` units of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(
                &["cart"],
                &AddToCartBody {
                    product_id,
                    quantity,
                },
            )
            .await?;
        Ok(())
    }

    /// Replace a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .put(
                &["cart", &product_id.to_string()],
                &UpdateQuantityBody { quantity },
            )
            .await?;
        Ok(())
    }

    /// Drop a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: ProductId) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .delete(&["cart", &product_id.to_string()])
            .await?;
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.delete(&["cart"]).await?;
        Ok(())
    }

    /// Send a mutation to the server.
    ///
    /// Callers apply the same mutation to their snapshot only once this
    /// returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn apply(&self, mutation: &CartMutation) -> Result<(), ApiError> {
        match mutation {
            CartMutation::Add(item) => self.add(item.product_id, 1).await,
            CartMutation::SetQuantity {
                product_id,
                quantity,
            } => self.update(*product_id, *quantity).await,
            CartMutation::Remove { product_id } => self.remove(*product_id).await,
            CartMutation::Clear => self.clear().await,
        }
    }
}
