//! Order history commands.

use vibe_commerce_core::{OrderId, PageRequest};
use vibe_commerce_storefront::api::CommerceClient;

use super::render;

/// Print a page of orders.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[allow(clippy::print_stdout)]
pub async fn list(
    client: &CommerceClient,
    page: Option<u32>,
    status: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let orders = client
        .checkout()
        .orders(PageRequest::orders(page), status)
        .await?;
    println!("{}", render::order_page(&orders));
    Ok(())
}

/// Print one order.
///
/// # Errors
///
/// Returns an error if the order does not exist or the request fails.
#[allow(clippy::print_stdout)]
pub async fn show(client: &CommerceClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order = client.checkout().order(&OrderId::new(id)).await?;
    println!("{}", render::order(&order));
    Ok(())
}
