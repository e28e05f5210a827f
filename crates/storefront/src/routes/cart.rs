//! Cart route handlers.
//!
//! Every mutation is a form post that asks the commerce API first, mirrors
//! the accepted change into the session snapshot, and redirects back to the
//! page it came from. Failures surface as a flash banner on that page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use vibe_commerce_core::{CartItem, CartMutation, PricingBreakdown, ProductId};

use crate::error::AppError;
use crate::filters;
use crate::models::session::set_flash;
use crate::models::{Flash, Layout, PageContext};
use crate::routes::local_return_path;
use crate::services::cart_sync::{SyncOutcome, load_cart, sync};
use crate::state::AppState;

/// A cart row with its stepper targets.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub item: CartItem,
    pub decrement: i64,
    pub increment: i64,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        let quantity = i64::from(item.quantity);
        Self {
            item: item.clone(),
            decrement: quantity - 1,
            increment: quantity + 1,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub return_to: Option<String>,
}

/// Set quantity form data. Zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: i64,
    pub return_to: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
    pub return_to: Option<String>,
}

/// Clear cart form data.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub lines: Vec<CartLineView>,
    pub pricing: PricingBreakdown,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Display cart page.
#[instrument(skip(state, session, context))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
) -> Result<CartShowTemplate, AppError> {
    let (layout, cart) = Layout::load(&state, &session, context).await?;

    Ok(CartShowTemplate {
        layout,
        lines: cart.items().iter().map(CartLineView::from).collect(),
        pricing: cart.pricing(),
    })
}

/// Add one unit of a product.
///
/// The product is looked up first so the new row carries its current name,
/// price and image, and so out-of-stock products are refused.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect, AppError> {
    let back = local_return_path(form.return_to.as_deref(), "/products");

    let product = match state
        .commerce()
        .products()
        .get(ProductId::new(form.product_id))
        .await
    {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to look up product for cart");
            set_flash(&session, &Flash::error(e.user_message())).await?;
            return Ok(Redirect::to(&back));
        }
    };

    if !product.in_stock() {
        set_flash(
            &session,
            &Flash::error(format!("{} is out of stock", product.name)),
        )
        .await?;
        return Ok(Redirect::to(&back));
    }

    let outcome = sync(&session, state.commerce(), &CartMutation::add(&product)).await?;
    if outcome.is_applied() {
        set_flash(
            &session,
            &Flash::success(format!("Added {} to your cart", product.name)),
        )
        .await?;
    }

    Ok(Redirect::to(&back))
}

/// Set a line's quantity; zero or less removes it.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect, AppError> {
    let mutation = CartMutation::change_quantity(ProductId::new(form.product_id), form.quantity);
    sync(&session, state.commerce(), &mutation).await?;

    Ok(Redirect::to(&local_return_path(
        form.return_to.as_deref(),
        "/cart",
    )))
}

/// Remove a line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect, AppError> {
    let mutation = CartMutation::Remove {
        product_id: ProductId::new(form.product_id),
    };
    sync(&session, state.commerce(), &mutation).await?;

    Ok(Redirect::to(&local_return_path(
        form.return_to.as_deref(),
        "/cart",
    )))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ClearCartForm>,
) -> Result<Redirect, AppError> {
    if let SyncOutcome::Applied(_) = sync(&session, state.commerce(), &CartMutation::Clear).await? {
        set_flash(&session, &Flash::success("Your cart has been cleared")).await?;
    }

    Ok(Redirect::to(&local_return_path(
        form.return_to.as_deref(),
        "/cart",
    )))
}

/// Cart badge fragment: the number of distinct lines.
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
) -> Result<CartCountTemplate, AppError> {
    let cart = load_cart(&session, state.commerce()).await?;
    Ok(CartCountTemplate {
        count: cart.line_count(),
    })
}
