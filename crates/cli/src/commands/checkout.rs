//! Checkout command.

use chrono::Utc;
use vibe_commerce_core::{CheckoutFlow, CheckoutForm};
use vibe_commerce_storefront::api::CommerceClient;

use super::render;

/// Place an order for the server cart and print the receipt.
///
/// Name, email and a non-empty cart are checked before anything is sent.
///
/// # Errors
///
/// Returns an error if validation fails or an API request fails.
#[allow(clippy::print_stdout)]
pub async fn place_order(
    client: &CommerceClient,
    name: String,
    email: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let cart = client.cart().get().await?;
    let mut flow = CheckoutFlow::new();
    let request = flow.submit(&cart, &CheckoutForm { name, email })?;

    let placed = client.checkout().checkout(&request).await?;
    let mut receipt = flow.complete(placed)?.clone();
    receipt.created_at.get_or_insert_with(Utc::now);
    tracing::info!(order_id = %receipt.order_id, "Order placed");

    println!("{}", render::receipt(&receipt));
    Ok(())
}
