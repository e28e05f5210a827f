//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart_sync` - Mirrors the commerce API cart into the visitor's session

pub mod cart_sync;
