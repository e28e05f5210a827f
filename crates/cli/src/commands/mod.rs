//! Subcommand implementations.
//!
//! Each command talks to the commerce API through the storefront's resource
//! clients and prints a plain-text rendering built by [`render`].

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod render;
