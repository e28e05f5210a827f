//! Data every page hands to `base.html`.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
};
use tower_sessions::Session;
use vibe_commerce_core::{Cart, Theme};

use crate::error::AppError;
use crate::middleware::{CspNonce, ThemePreference};
use crate::models::Flash;
use crate::models::session::take_flash;
use crate::services::cart_sync::load_cart;
use crate::state::AppState;

/// Request-derived inputs of the layout: theme cookie, CSP nonce and the
/// path the page was requested at.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub theme: Theme,
    pub nonce: String,
    pub path: String,
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ThemePreference(theme) = ThemePreference::from_request_parts(parts, state).await?;
        let CspNonce(nonce) = CspNonce::from_request_parts(parts, state).await?;
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0);
        let path = uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());

        Ok(Self { theme, nonce, path })
    }
}

/// Shared page chrome: theme, CSP nonce, cart badge and flash banner.
#[derive(Debug, Clone)]
pub struct Layout {
    pub theme: Theme,
    pub nonce: String,
    /// Path of the current page, posted back by the theme toggle.
    pub path: String,
    pub cart_count: usize,
    pub flash: Option<Flash>,
}

impl Layout {
    /// Build the layout for a page, consuming any pending flash.
    ///
    /// Loads the visitor's cart from the server on their first page view.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(
        state: &AppState,
        session: &Session,
        page: PageContext,
    ) -> Result<(Self, Cart), AppError> {
        let cart = load_cart(session, state.commerce()).await?;
        let flash = take_flash(session).await?;
        Ok((
            Self {
                theme: page.theme,
                nonce: page.nonce,
                path: page.path,
                cart_count: cart.line_count(),
                flash,
            },
            cart,
        ))
    }

    /// The theme a toggle would switch to.
    #[must_use]
    pub const fn next_theme(&self) -> Theme {
        self.theme.toggled()
    }
}
