//! Vibe Commerce Core - Shared domain types.
//!
//! This crate provides the types used by every Vibe Commerce component:
//! - `storefront` - Server-rendered storefront over the commerce API
//! - `cli` - Terminal client for the same API
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no HTTP clients,
//! no sessions. Anything that talks to the commerce API lives in the
//! storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for IDs, prices, customer details, statuses, theme
//! - [`catalog`] - Products and listing filters
//! - [`cart`] - Cart snapshot and cart mutations
//! - [`pricing`] - Subtotal, tax, shipping and total
//! - [`order`] - Checkout payload, orders, history rows, receipts
//! - [`checkout`] - Checkout state machine
//! - [`pagination`] - Page requests and result pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod pagination;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartItem, CartMutation};
pub use catalog::{Product, ProductFilter, distinct_categories};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutForm, CheckoutState};
pub use order::{CheckoutLine, CheckoutRequest, Order, OrderLine, OrderSummary, Receipt};
pub use pagination::{ORDER_PAGE_SIZE, PRODUCT_PAGE_SIZE, Page, PageRequest};
pub use pricing::PricingBreakdown;
pub use types::*;
