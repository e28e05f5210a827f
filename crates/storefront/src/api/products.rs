//! Product catalog endpoints.

use tracing::instrument;
use vibe_commerce_core::{Page, PageRequest, Product, ProductFilter, ProductId};

use super::{ApiError, CommerceClient, Envelope};

/// `GET /products` and `GET /products/{id}`.
#[derive(Clone, Copy)]
pub struct ProductsApi<'a> {
    client: &'a CommerceClient,
}

impl<'a> ProductsApi<'a> {
    pub(super) const fn new(client: &'a CommerceClient) -> Self {
        Self { client }
    }

    /// Fetch one page of products.
    ///
    /// Every set filter plus `page` and `limit` is sent on each call. The
    /// returned page holds exactly the items the server sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(page = page.page))]
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, ApiError> {
        let envelope: Envelope<Vec<Product>> = self
            .client
            .get(&["products"], &filter.query_pairs(page))
            .await?;

        Ok(Page::new(envelope.data, page.page, envelope.pages))
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        let envelope: Envelope<Product> = self
            .client
            .get(&["products", &id.to_string()], &[])
            .await?;
        Ok(envelope.data)
    }
}
