//! Product route handlers.
//!
//! The grid's filters and page live in the query string, so every view is
//! a plain link. A failed fetch renders an inline error panel instead of
//! failing the whole page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use vibe_commerce_core::{PageRequest, Product, ProductFilter, ProductId, distinct_categories};

use crate::error::AppError;
use crate::filters;
use crate::models::session::{get_categories, set_categories};
use crate::models::{Layout, PageContext, Pagination, listing_href};
use crate::state::AppState;

/// Grid query parameters, named as in the commerce API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub page: Option<String>,
}

impl ProductQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter::from_form(
            self.search.as_deref(),
            self.category.as_deref(),
            self.min_price.as_deref(),
            self.max_price.as_deref(),
        )
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::products(self.page.as_deref().and_then(|p| p.trim().parse().ok()))
    }

    /// Grid URL for `page` with the current filters.
    fn page_href(&self, page: u32) -> String {
        listing_href(
            "/products",
            [
                ("search", field(self.search.as_ref())),
                ("category", field(self.category.as_ref())),
                ("minPrice", field(self.min_price.as_ref())),
                ("maxPrice", field(self.max_price.as_ref())),
                ("page", page.to_string()),
            ],
        )
    }
}

fn field(value: Option<&String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Filter inputs echoed back into the form.
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub search: String,
    pub min_price: String,
    pub max_price: String,
}

/// An entry of the category dropdown.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Product grid template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub products: Vec<Product>,
    pub form: FilterForm,
    pub categories: Vec<CategoryOption>,
    pub filtered: bool,
    pub error: Option<String>,
    pub pagination: Option<Pagination>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: Option<Product>,
    pub in_cart: u32,
    pub error: Option<String>,
}

/// Display the product grid.
#[instrument(skip(state, session, context))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
    Query(query): Query<ProductQuery>,
) -> Result<ProductsIndexTemplate, AppError> {
    let (layout, _cart) = Layout::load(&state, &session, context).await?;
    let filter = query.filter();
    let request = query.page_request();

    let (products, pagination, error) =
        match state.commerce().products().list(&filter, request).await {
            Ok(page) => {
                if request.is_first() {
                    set_categories(&session, &distinct_categories(&page.items)).await?;
                }
                let pagination = Pagination::for_page(&page, |n| query.page_href(n));
                (page.items, pagination, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products");
                (Vec::new(), None, Some(e.user_message()))
            }
        };

    let mut names = get_categories(&session).await?.unwrap_or_default();
    if let Some(selected) = &filter.category
        && !names.contains(selected)
    {
        names.push(selected.clone());
    }
    let categories = names
        .into_iter()
        .map(|name| CategoryOption {
            selected: filter.category.as_ref() == Some(&name),
            name,
        })
        .collect();

    Ok(ProductsIndexTemplate {
        products,
        form: FilterForm {
            search: field(query.search.as_ref()),
            min_price: field(query.min_price.as_ref()),
            max_price: field(query.max_price.as_ref()),
        },
        categories,
        filtered: filter.is_active(),
        error,
        pagination,
        layout,
    })
}

/// Display a single product.
#[instrument(skip(state, session, context))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    context: PageContext,
    Path(id): Path<String>,
) -> Result<(StatusCode, ProductShowTemplate), AppError> {
    let (layout, cart) = Layout::load(&state, &session, context).await?;

    let fetched = match id.parse::<ProductId>() {
        Ok(product_id) => state.commerce().products().get(product_id).await,
        Err(_) => {
            return Ok((
                StatusCode::NOT_FOUND,
                ProductShowTemplate {
                    layout,
                    product: None,
                    in_cart: 0,
                    error: Some("Product not found".to_string()),
                },
            ));
        }
    };

    let (status, product, error) = match fetched {
        Ok(product) => (StatusCode::OK, Some(product), None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load product");
            let status = if e.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            };
            (status, None, Some(e.user_message()))
        }
    };

    let in_cart = product
        .as_ref()
        .and_then(|p| cart.get(p.product_id))
        .map_or(0, |item| item.quantity);

    Ok((
        status,
        ProductShowTemplate {
            layout,
            product,
            in_cart,
            error,
        },
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Uri;

    use super::*;

    fn query(raw: &str) -> ProductQuery {
        let uri: Uri = format!("/products?{raw}").parse().unwrap();
        Query::<ProductQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_page_href_keeps_filters() {
        let q = query("search=mug&category=Kitchen&minPrice=&page=1");
        assert_eq!(
            q.page_href(3),
            "/products?search=mug&category=Kitchen&page=3"
        );
    }

    #[test]
    fn test_bad_page_falls_back_to_first() {
        assert_eq!(query("page=abc").page_request().page, 1);
        assert_eq!(query("page=0").page_request().page, 1);
        assert_eq!(query("page=4").page_request().page, 4);
        assert_eq!(query("").page_request().limit, 12);
    }

    #[test]
    fn test_blank_filters_are_inactive() {
        assert!(!query("search=+&category=").filter().is_active());
        assert!(query("maxPrice=50").filter().is_active());
    }
}
