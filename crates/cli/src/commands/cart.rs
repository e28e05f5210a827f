//! Cart commands.
//!
//! The terminal has no session, so every command works on the server cart
//! directly and prints the cart as the server reports it afterwards.

use vibe_commerce_core::{CartMutation, ProductId};
use vibe_commerce_storefront::api::CommerceClient;

use super::render;

/// Print the cart.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[allow(clippy::print_stdout)]
pub async fn show(client: &CommerceClient) -> Result<(), Box<dyn std::error::Error>> {
    let cart = client.cart().get().await?;
    println!("{}", render::cart(&cart));
    Ok(())
}

/// Add one unit of a product, refusing out-of-stock products.
///
/// # Errors
///
/// Returns an error if the product is unavailable or the request fails.
pub async fn add(client: &CommerceClient, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let product = client.products().get(ProductId::new(id)).await?;
    if !product.in_stock() {
        return Err(format!("{} is out of stock", product.name).into());
    }
    apply(client, &CartMutation::add(&product)).await
}

/// Set a line's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn set(
    client: &CommerceClient,
    id: i64,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    apply(
        client,
        &CartMutation::change_quantity(ProductId::new(id), quantity),
    )
    .await
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn remove(client: &CommerceClient, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    apply(
        client,
        &CartMutation::Remove {
            product_id: ProductId::new(id),
        },
    )
    .await
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn clear(client: &CommerceClient) -> Result<(), Box<dyn std::error::Error>> {
    apply(client, &CartMutation::Clear).await
}

async fn apply(
    client: &CommerceClient,
    mutation: &CartMutation,
) -> Result<(), Box<dyn std::error::Error>> {
    client.cart().apply(mutation).await?;
    tracing::info!(action = mutation.action(), "Cart updated");
    show(client).await
}
