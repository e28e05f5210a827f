//! Product catalog commands.

use vibe_commerce_core::{PageRequest, ProductFilter, ProductId};
use vibe_commerce_storefront::api::CommerceClient;

use super::render;

/// Filters and page for `products list`.
#[derive(Debug, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub page: Option<u32>,
}

impl ListArgs {
    fn filter(&self) -> ProductFilter {
        ProductFilter::from_form(
            self.search.as_deref(),
            self.category.as_deref(),
            self.min_price.as_deref(),
            self.max_price.as_deref(),
        )
    }
}

/// Print a page of products.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[allow(clippy::print_stdout)]
pub async fn list(client: &CommerceClient, args: &ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let page = client
        .products()
        .list(&args.filter(), PageRequest::products(args.page))
        .await?;
    println!("{}", render::product_page(&page));
    Ok(())
}

/// Print one product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
#[allow(clippy::print_stdout)]
pub async fn show(client: &CommerceClient, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let product = client.products().get(ProductId::new(id)).await?;
    println!("{}", render::product(&product));
    Ok(())
}
