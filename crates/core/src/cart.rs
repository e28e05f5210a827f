//! Client-side cart snapshot and the mutations applied to it.
//!
//! The commerce API owns the cart. The storefront keeps a [`Cart`] snapshot
//! per visitor and applies a [`CartMutation`] to it only after the server
//! has accepted the same mutation.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::order::CheckoutLine;
use crate::pricing::PricingBreakdown;
use crate::types::{Price, ProductId};

/// A line in the cart. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// A fresh line for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// A cart change, expressed the way the commerce API receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutation {
    /// Add one unit of a product (`POST /cart`).
    Add(CartItem),
    /// Replace a line's quantity (`PUT /cart/{id}`). Always positive.
    SetQuantity { product_id: ProductId, quantity: u32 },
    /// Drop a line (`DELETE /cart/{id}`).
    Remove { product_id: ProductId },
    /// Empty the cart (`DELETE /cart`).
    Clear,
}

impl CartMutation {
    /// Add one unit of `product`.
    #[must_use]
    pub fn add(product: &Product) -> Self {
        Self::Add(CartItem::from_product(product))
    }

    /// Change a line to `requested` units.
    ///
    /// Anything at or below zero becomes a removal, so a decrement past 1
    /// never produces a zero-quantity row.
    #[must_use]
    pub fn change_quantity(product_id: ProductId, requested: i64) -> Self {
        if requested <= 0 {
            return Self::Remove { product_id };
        }
        Self::SetQuantity {
            product_id,
            quantity: u32::try_from(requested).unwrap_or(u32::MAX),
        }
    }

    /// Product the mutation targets, if any.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Add(item) => Some(item.product_id),
            Self::SetQuantity { product_id, .. } | Self::Remove { product_id } => {
                Some(*product_id)
            }
            Self::Clear => None,
        }
    }

    /// Short verb for logs and messages.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::SetQuantity { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::Clear => "clear",
        }
    }
}

/// Snapshot of the visitor's cart.
///
/// Deserialization goes through [`Cart::from_items`], so a payload can never
/// smuggle in a zero-quantity or duplicated row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartRows")]
pub struct Cart {
    items: Vec<CartItem>,
}

#[derive(Deserialize)]
struct CartRows {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl From<CartRows> for Cart {
    fn from(rows: CartRows) -> Self {
        Self::from_items(rows.items)
    }
}

impl Cart {
    /// Build a cart from server rows, merging duplicate products and
    /// dropping rows with a zero quantity.
    #[must_use]
    pub fn from_items(rows: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::default();
        for row in rows.into_iter().filter(|row| row.quantity > 0) {
            match cart.position(row.product_id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(row.quantity);
                    }
                }
                None => cart.items.push(row),
            }
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (the header badge count).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Display-only pricing for the cart.
    #[must_use]
    pub fn pricing(&self) -> PricingBreakdown {
        PricingBreakdown::from_subtotal(self.subtotal())
    }

    /// The checkout payload: product IDs and quantities, never prices.
    #[must_use]
    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.items
            .iter()
            .map(|item| CheckoutLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    }

    /// Apply a mutation the server has already accepted.
    pub fn apply(&mut self, mutation: &CartMutation) {
        match mutation {
            CartMutation::Add(item) => match self.position(item.product_id) {
                Some(index) => {
                    if let Some(existing) = self.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(1);
                    }
                }
                None => self.items.push(CartItem {
                    quantity: 1,
                    ..item.clone()
                }),
            },
            CartMutation::SetQuantity {
                product_id,
                quantity,
            } => {
                if *quantity == 0 {
                    self.items.retain(|item| item.product_id != *product_id);
                } else if let Some(index) = self.position(*product_id)
                    && let Some(existing) = self.items.get_mut(index)
                {
                    existing.quantity = *quantity;
                }
            }
            CartMutation::Remove { product_id } => {
                self.items.retain(|item| item.product_id != *product_id);
            }
            CartMutation::Clear => self.items.clear(),
        }
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i64, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Price::from_cents(cents),
            quantity,
            image: None,
        }
    }

    #[test]
    fn test_single_line_pricing_example() {
        let cart = Cart::from_items([item(1, 2000, 3)]);
        let pricing = cart.pricing();
        assert_eq!(pricing.subtotal.to_string(), "$60.00");
        assert_eq!(pricing.tax.to_string(), "$6.00");
        assert_eq!(pricing.shipping.to_string(), "$5.00");
        assert_eq!(pricing.total.to_string(), "$71.00");
    }

    #[test]
    fn test_free_shipping_example() {
        let cart = Cart::from_items([item(1, 4000, 3)]);
        let pricing = cart.pricing();
        assert_eq!(pricing.subtotal, Price::from_cents(12_000));
        assert!(pricing.free_shipping());
        assert_eq!(pricing.total, Price::from_cents(13_200));
    }

    #[test]
    fn test_add_new_then_existing_product() {
        let mut cart = Cart::default();
        let added = CartMutation::Add(item(5, 999, 7));
        cart.apply(&added);
        assert_eq!(cart.get(ProductId::new(5)).unwrap().quantity, 1);
        cart.apply(&added);
        assert_eq!(cart.get(ProductId::new(5)).unwrap().quantity, 2);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_decrement_to_zero_is_removal() {
        assert_eq!(
            CartMutation::change_quantity(ProductId::new(1), 0),
            CartMutation::Remove {
                product_id: ProductId::new(1)
            }
        );
        assert_eq!(
            CartMutation::change_quantity(ProductId::new(1), -3),
            CartMutation::Remove {
                product_id: ProductId::new(1)
            }
        );

        let mut via_decrement = Cart::from_items([item(1, 100, 1), item(2, 100, 2)]);
        let mut via_remove = via_decrement.clone();
        via_decrement.apply(&CartMutation::change_quantity(ProductId::new(1), 0));
        via_remove.apply(&CartMutation::Remove {
            product_id: ProductId::new(1),
        });
        assert_eq!(via_decrement, via_remove);
        assert!(via_decrement.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::from_items([item(1, 100, 1)]);
        cart.apply(&CartMutation::change_quantity(ProductId::new(1), 4));
        assert_eq!(cart.total_quantity(), 4);
        // Unknown product: nothing to update
        cart.apply(&CartMutation::change_quantity(ProductId::new(9), 4));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear_empties() {
        let mut cart = Cart::from_items([item(1, 100, 1), item(2, 100, 1)]);
        cart.apply(&CartMutation::Clear);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_from_items_merges_and_drops_zero_rows() {
        let cart = Cart::from_items([item(1, 100, 1), item(2, 100, 0), item(1, 100, 2)]);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 3);
    }

    #[test]
    fn test_checkout_lines_carry_no_price() {
        let cart = Cart::from_items([item(1, 2000, 3), item(2, 50, 1)]);
        let json = serde_json::to_value(cart.checkout_lines()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"productId": 1, "quantity": 3},
                {"productId": 2, "quantity": 1}
            ])
        );
    }

    #[test]
    fn test_deserialize_normalizes_rows() {
        let json = r#"{"items": [
            {"productId": 1, "name": "Mug", "price": "1.00", "quantity": 0}
        ]}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_deserializes_server_payload() {
        let json = r#"{"items": [
            {"productId": 1, "name": "Mug", "price": 12.5, "quantity": 2, "image": "https://img/mug.png"}
        ], "totalItems": 2}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.subtotal(), Price::from_cents(2500));
        assert_eq!(
            cart.items().first().unwrap().image.as_deref(),
            Some("https://img/mug.png")
        );
    }
}
