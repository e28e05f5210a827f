//! Theme preference cookie.
//!
//! The light/dark choice is the only state kept on the visitor's device. It
//! lives in a long-lived `theme` cookie that is read on every page render.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header::COOKIE, request::Parts},
};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};
use vibe_commerce_core::Theme;

/// Theme cookie name.
pub const THEME_COOKIE_NAME: &str = "theme";

/// Theme cookie lifetime in days.
const THEME_COOKIE_DAYS: i64 = 365;

/// The visitor's theme, read from the `theme` cookie (light if absent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemePreference(pub Theme);

impl ThemePreference {
    /// Read the preference from raw `Cookie` header values.
    #[must_use]
    pub fn from_cookie_headers<'a>(headers: impl IntoIterator<Item = &'a HeaderValue>) -> Self {
        headers
            .into_iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == THEME_COOKIE_NAME)
            .map_or_else(Self::default, |cookie| {
                Self(Theme::from_preference(cookie.value()))
            })
    }
}

impl<S> FromRequestParts<S> for ThemePreference
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_cookie_headers(parts.headers.get_all(COOKIE)))
    }
}

/// Build the `Set-Cookie` value persisting `theme`.
#[must_use]
pub fn theme_cookie(theme: Theme, secure: bool) -> String {
    Cookie::build((THEME_COOKIE_NAME, theme.as_str()))
        .path("/")
        .max_age(Duration::days(THEME_COOKIE_DAYS))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .build()
        .to_string()
}
