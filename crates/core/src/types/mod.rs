//! Core newtypes for Vibe Commerce.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod price;
pub mod status;
pub mod theme;

pub use customer::{CustomerDetails, CustomerError, CustomerName, Email};
pub use id::{OrderId, ProductId};
pub use price::Price;
pub use status::OrderStatus;
pub use theme::Theme;
