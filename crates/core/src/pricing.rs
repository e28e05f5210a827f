//! Order pricing: subtotal, tax, shipping and total.
//!
//! The storefront computes these for display only. The commerce API
//! recomputes them from its own catalog when an order is placed, and the
//! receipt always shows the server's figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Price;

/// Sales tax rate applied to the subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(Decimal::from_parts(100, 0, 0, false, 0));

/// Flat shipping fee charged at or below the threshold.
pub const SHIPPING_FEE: Price = Price::new(Decimal::from_parts(5, 0, 0, false, 0));

/// Price breakdown of a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub subtotal: Price,
    pub tax: Price,
    pub shipping: Price,
    pub total: Price,
}

impl PricingBreakdown {
    /// Derive tax, shipping and total from a subtotal.
    ///
    /// `total == subtotal + subtotal * 0.10 + (subtotal > 100 ? 0 : 5)`,
    /// kept exact. Amounts are rounded to cents only when displayed.
    #[must_use]
    pub fn from_subtotal(subtotal: Price) -> Self {
        let tax = subtotal * TAX_RATE;
        let shipping = shipping_for(subtotal);
        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// Whether shipping was waived.
    #[must_use]
    pub const fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Shipping charged for a given subtotal.
#[must_use]
pub fn shipping_for(subtotal: Price) -> Price {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        SHIPPING_FEE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(TAX_RATE.to_string(), "0.10");
        assert_eq!(FREE_SHIPPING_THRESHOLD, Price::from_cents(10_000));
        assert_eq!(SHIPPING_FEE, Price::from_cents(500));
    }

    #[test]
    fn test_small_order_pays_shipping() {
        let pricing = PricingBreakdown::from_subtotal(Price::from_cents(6000));
        assert_eq!(pricing.subtotal, Price::from_cents(6000));
        assert_eq!(pricing.tax, Price::from_cents(600));
        assert_eq!(pricing.shipping, Price::from_cents(500));
        assert_eq!(pricing.total, Price::from_cents(7100));
        assert!(!pricing.free_shipping());
    }

    #[test]
    fn test_large_order_ships_free() {
        let pricing = PricingBreakdown::from_subtotal(Price::from_cents(12_000));
        assert_eq!(pricing.shipping, Price::ZERO);
        assert_eq!(pricing.total, Price::from_cents(13_200));
        assert!(pricing.free_shipping());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(shipping_for(Price::from_cents(10_000)), SHIPPING_FEE);
        assert_eq!(shipping_for(Price::from_cents(10_001)), Price::ZERO);
    }

    #[test]
    fn test_total_formula_holds_across_subtotals() {
        let tenth = Decimal::new(1, 1);
        for cents in [0_i64, 1, 5, 25, 999, 4_999, 10_000, 10_001, 25_050, 1_000_000] {
            let subtotal = Decimal::new(cents, 2);
            let pricing = PricingBreakdown::from_subtotal(Price::new(subtotal));
            let shipping = if subtotal > Decimal::ONE_HUNDRED {
                Decimal::ZERO
            } else {
                Decimal::new(5, 0)
            };
            assert_eq!(
                pricing.total.amount(),
                subtotal + subtotal * tenth + shipping,
                "subtotal {subtotal}"
            );
        }
    }

    #[test]
    fn test_sub_cent_tax_is_kept_and_shown_rounded() {
        let pricing = PricingBreakdown::from_subtotal(Price::from_cents(5));
        assert_eq!(pricing.tax.amount(), Decimal::new(5, 3));
        assert_eq!(pricing.total.amount(), Decimal::new(50_550, 4));
        assert_eq!(pricing.tax.to_string(), "$0.01");
        assert_eq!(pricing.total.to_string(), "$5.06");

        let pricing = PricingBreakdown::from_subtotal(Price::from_cents(25));
        assert_eq!(pricing.tax.to_string(), "$0.03");
    }
}
