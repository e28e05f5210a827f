//! Keeps the session cart snapshot in step with the server cart.
//!
//! The server is always asked first. The snapshot only changes after the
//! server has accepted a mutation, and it is always replaced wholesale.
//! A rejected mutation leaves the snapshot untouched and queues an error
//! flash for the next page.

use tower_sessions::Session;
use tracing::instrument;
use vibe_commerce_core::{Cart, CartMutation};

use crate::api::{ApiError, CommerceClient};
use crate::error::{AppError, add_breadcrumb};
use crate::models::Flash;
use crate::models::session::{get_cart, set_cart, set_flash};

/// Result of sending a mutation to the server.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The server accepted the change; the new snapshot.
    Applied(Cart),
    /// The server refused or could not be reached; the snapshot is unchanged.
    Rejected(ApiError),
}

impl SyncOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// The visitor's cart snapshot, loading it from the server on first use.
///
/// A failed initial load is logged and yields an empty cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip_all)]
pub async fn load_cart(session: &Session, client: &CommerceClient) -> Result<Cart, AppError> {
    if let Some(cart) = get_cart(session).await? {
        return Ok(cart);
    }

    let cart = match client.cart().get().await {
        Ok(cart) => cart,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load cart, starting empty");
            Cart::default()
        }
    };
    set_cart(session, &cart).await?;
    Ok(cart)
}

/// Replace the snapshot with the server's current cart.
///
/// On failure the snapshot is left as it was and the error is logged.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip_all)]
pub async fn refresh_cart(session: &Session, client: &CommerceClient) -> Result<Cart, AppError> {
    match client.cart().get().await {
        Ok(cart) => {
            set_cart(session, &cart).await?;
            Ok(cart)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to refresh cart");
            Ok(get_cart(session).await?.unwrap_or_default())
        }
    }
}

/// Send `mutation` to the server and mirror it locally on success.
///
/// Clearing re-fetches the cart from the server afterwards.
///
/// # Errors
///
/// Returns an error if the session store fails. API failures are reported
/// through [`SyncOutcome::Rejected`], never as `Err`.
#[instrument(skip(session, client), fields(action = mutation.action()))]
pub async fn sync(
    session: &Session,
    client: &CommerceClient,
    mutation: &CartMutation,
) -> Result<SyncOutcome, AppError> {
    let mut cart = load_cart(session, client).await?;

    if let Err(e) = client.cart().apply(mutation).await {
        tracing::warn!(error = %e, "Cart {} rejected", mutation.action());
        set_flash(session, &Flash::error(e.user_message())).await?;
        return Ok(SyncOutcome::Rejected(e));
    }

    match mutation.product_id() {
        Some(id) => add_breadcrumb(
            "cart",
            mutation.action(),
            Some(&[("product_id", id.to_string().as_str())]),
        ),
        None => add_breadcrumb("cart", mutation.action(), None),
    }

    cart.apply(mutation);
    set_cart(session, &cart).await?;

    if matches!(mutation, CartMutation::Clear) {
        cart = refresh_cart(session, client).await?;
    }

    Ok(SyncOutcome::Applied(cart))
}
