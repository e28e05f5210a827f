//! Product catalog types and listing filters.

use serde::{Deserialize, Serialize};

use crate::pagination::PageRequest;
use crate::types::{Price, ProductId};

/// A product as served by the commerce API. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Stock label shown on product cards.
    #[must_use]
    pub fn stock_label(&self) -> String {
        if self.in_stock() {
            format!("{} in stock", self.stock)
        } else {
            "Out of stock".to_string()
        }
    }
}

/// Listing filters for the product grid.
///
/// Every field is optional; the server applies the filtering semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
}

impl ProductFilter {
    /// Build a filter from raw form input, treating blank or unparseable
    /// values as "not set".
    #[must_use]
    pub fn from_form(
        search: Option<&str>,
        category: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> Self {
        Self {
            search: non_blank(search),
            category: non_blank(category),
            min_price: non_blank(min_price).and_then(|s| s.parse().ok()),
            max_price: non_blank(max_price).and_then(|s| s.parse().ok()),
        }
    }

    /// Whether any filter is set (drives the "Reset" link).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.search.is_some()
            || self.category.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// Query parameters for `GET /products`, in the API's naming.
    ///
    /// Unset filters are omitted; `page` and `limit` are always sent.
    #[must_use]
    pub fn query_pairs(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.amount().normalize().to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.amount().normalize().to_string()));
        }
        pairs.push(("page", page.page.to_string()));
        pairs.push(("limit", page.limit.to_string()));
        pairs
    }
}

/// Distinct categories of a page of products, in first-seen order.
///
/// The grid derives its category options from page one only, so categories
/// that first appear on later pages are not offered.
#[must_use]
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, category: &str, stock: u32) -> Product {
        Product {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(1000),
            category: category.to_string(),
            stock,
            image: None,
        }
    }

    #[test]
    fn test_product_deserializes_api_shape() {
        let json = r#"{
            "_id": "65a1",
            "productId": 3,
            "name": "Desk Lamp",
            "description": "Warm light",
            "price": 24.5,
            "category": "Home",
            "stock": 0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id, ProductId::new(3));
        assert_eq!(product.price, Price::from_cents(2450));
        assert!(product.image.is_none());
        assert!(!product.in_stock());
        assert_eq!(product.stock_label(), "Out of stock");
    }

    #[test]
    fn test_filter_from_form_ignores_blanks() {
        let filter = ProductFilter::from_form(Some("  "), Some("Books"), Some(""), Some("abc"));
        assert_eq!(filter.search, None);
        assert_eq!(filter.category.as_deref(), Some("Books"));
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);
        assert!(filter.is_active());
        assert!(!ProductFilter::default().is_active());
    }

    #[test]
    fn test_query_pairs_use_api_names() {
        let filter = ProductFilter::from_form(Some("lamp"), None, Some("10"), Some("99.50"));
        let pairs = filter.query_pairs(PageRequest::new(2, 12));
        assert_eq!(
            pairs,
            vec![
                ("search", "lamp".to_string()),
                ("minPrice", "10".to_string()),
                ("maxPrice", "99.5".to_string()),
                ("page", "2".to_string()),
                ("limit", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_distinct_categories_keeps_first_seen_order() {
        let products = vec![
            product(1, "Books", 1),
            product(2, "Home", 1),
            product(3, "Books", 1),
            product(4, "", 1),
        ];
        assert_eq!(distinct_categories(&products), vec!["Books", "Home"]);
    }
}
