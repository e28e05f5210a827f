//! Session-related types.
//!
//! Everything the storefront remembers about a visitor between requests
//! lives in the session: the cart snapshot, a one-shot flash message, the
//! category options of the product grid and the last receipt.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use vibe_commerce_core::{Cart, Receipt};

/// Session keys for visitor state.
pub mod keys {
    /// Key for the cart snapshot mirrored from the commerce API.
    pub const CART: &str = "cart";

    /// Key for the one-shot flash message.
    pub const FLASH: &str = "flash";

    /// Key for the category options taken from the first product page.
    pub const CATEGORIES: &str = "categories";

    /// Key for the receipt of the last placed order.
    pub const RECEIPT: &str = "receipt";
}

/// Tone of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// Message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, FlashKind::Error)
    }

    /// CSS class for the banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash flash-success",
            FlashKind::Error => "flash flash-error",
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart snapshot, if one has been loaded for this visitor.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn get_cart(session: &Session) -> Result<Option<Cart>, tower_sessions::session::Error> {
    session.get::<Cart>(keys::CART).await
}

/// Replace the cart snapshot.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Queue a flash message for the next page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_flash(
    session: &Session,
    flash: &Flash,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::FLASH, flash).await
}

/// Take the pending flash message, clearing it.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove::<Flash>(keys::FLASH).await
}

/// Category options remembered from the first product page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn get_categories(
    session: &Session,
) -> Result<Option<Vec<String>>, tower_sessions::session::Error> {
    session.get::<Vec<String>>(keys::CATEGORIES).await
}

/// Remember the category options.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_categories(
    session: &Session,
    categories: &[String],
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CATEGORIES, categories).await
}

/// Receipt of the last placed order.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn get_receipt(session: &Session) -> Result<Option<Receipt>, tower_sessions::session::Error> {
    session.get::<Receipt>(keys::RECEIPT).await
}

/// Store the receipt of a placed order.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_receipt(
    session: &Session,
    receipt: &Receipt,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::RECEIPT, receipt).await
}
