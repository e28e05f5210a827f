//! Checkout route handlers.
//!
//! The form shows locally computed totals for display only. Placing the
//! order sends product ids and quantities, stores the server's receipt in
//! the session and redirects to it, so reloading the receipt never places a
//! second order.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;
use vibe_commerce_core::{Cart, CartItem, CheckoutFlow, CheckoutForm, PricingBreakdown, Receipt};

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::models::session::{get_receipt, set_cart, set_receipt};
use crate::models::{Flash, Layout, PageContext};
use crate::services::cart_sync::refresh_cart;
use crate::state::AppState;

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub layout: Layout,
    pub items: Vec<CartItem>,
    pub pricing: PricingBreakdown,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

impl CheckoutFormTemplate {
    fn new(layout: Layout, cart: &Cart, form: CheckoutForm, error: Option<String>) -> Self {
        Self {
            layout,
            items: cart.items().to_vec(),
            pricing: cart.pricing(),
            form,
            error,
        }
    }
}

/// Receipt template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/receipt.html")]
pub struct ReceiptTemplate {
    pub layout: Layout,
    pub receipt: Receipt,
}

/// Display the checkout form.
#[instrument(skip(state, session, context))]
pub async fn form(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
) -> Result<CheckoutFormTemplate, AppError> {
    let (layout, cart) = Layout::load(&state, &session, context).await?;
    Ok(CheckoutFormTemplate::new(
        layout,
        &cart,
        CheckoutForm::default(),
        None,
    ))
}

/// Place the order.
///
/// Invalid input re-renders the form without calling the server. A server
/// failure re-renders the form with the server's message in the banner.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let (mut layout, cart) = Layout::load(&state, &session, context).await?;
    let mut flow = CheckoutFlow::new();

    let request = match flow.submit(&cart, &form) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Checkout form rejected");
            let error = flow.form_error().map(str::to_owned);
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutFormTemplate::new(layout, &cart, form, error),
            )
                .into_response());
        }
    };

    let placed = match state.commerce().checkout().checkout(&request).await {
        Ok(receipt) => receipt,
        Err(e) => {
            tracing::warn!(error = %e, "Checkout failed");
            flow.fail(e.user_message())
                .map_err(|e| AppError::Internal(e.to_string()))?;
            layout.flash = flow.form_error().map(Flash::error);
            return Ok((
                StatusCode::BAD_GATEWAY,
                CheckoutFormTemplate::new(layout, &cart, form, None),
            )
                .into_response());
        }
    };

    flow.complete(placed)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let mut receipt = flow
        .into_receipt()
        .ok_or_else(|| AppError::Internal("checkout completed without a receipt".to_string()))?;
    if receipt.created_at.is_none() {
        receipt.created_at = Some(Utc::now());
    }

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", receipt.order_id.as_str())]),
    );
    tracing::info!(order_id = %receipt.order_id, "Order placed");

    set_receipt(&session, &receipt).await?;
    set_cart(&session, &Cart::default()).await?;
    refresh_cart(&session, state.commerce()).await?;

    Ok(Redirect::to("/checkout/receipt").into_response())
}

/// Display the receipt of the last placed order.
#[instrument(skip(state, session, context))]
pub async fn receipt(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
) -> Result<Response, AppError> {
    let Some(receipt) = get_receipt(&session).await? else {
        return Ok(Redirect::to("/cart").into_response());
    };
    let (layout, _cart) = Layout::load(&state, &session, context).await?;

    Ok(ReceiptTemplate { layout, receipt }.into_response())
}
