//! Theme toggle.

use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use crate::middleware::{ThemePreference, theme_cookie};
use crate::routes::local_return_path;
use crate::state::AppState;

/// Theme toggle form data.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeForm {
    pub return_to: Option<String>,
}

/// Flip light/dark, persist it in the theme cookie and go back.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    ThemePreference(current): ThemePreference,
    Form(form): Form<ThemeForm>,
) -> impl IntoResponse {
    let theme = current.toggled();
    tracing::debug!(theme = %theme, "Theme toggled");

    (
        AppendHeaders([(SET_COOKIE, theme_cookie(theme, state.config().is_secure()))]),
        Redirect::to(&local_return_path(form.return_to.as_deref(), "/products")),
    )
}
