//! REST client for the commerce API.
//!
//! # Architecture
//!
//! - [`CommerceClient`] issues JSON requests against a configured base URL,
//!   sending the static `user-id` caller header on every call
//! - [`ProductsApi`], [`CartApi`] and [`CheckoutApi`] map storefront
//!   operations onto endpoints
//! - The commerce API is the source of truth: no caching, no retries, one
//!   attempt per call
//!
//! Responses are wrapped in an envelope: `{ "data": ..., "pages": n }`.
//!
//! # Example
//!
//! ```rust,ignore
//! use vibe_commerce_core::{PageRequest, ProductFilter};
//! use vibe_commerce_storefront::api::CommerceClient;
//!
//! let client = CommerceClient::new(&config.commerce);
//!
//! let page = client
//!     .products()
//!     .list(&ProductFilter::default(), PageRequest::products(None))
//!     .await?;
//! ```

mod cart;
mod checkout;
mod client;
mod products;

#[cfg(test)]
pub(crate) mod test_server;

pub use cart::CartApi;
pub use checkout::CheckoutApi;
pub use client::CommerceClient;
pub use products::ProductsApi;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message used when a failed response carries no usable `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

/// Errors that can occur when talking to the commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Text shown to the visitor.
    ///
    /// Server-reported failures show the server's message. Anything else
    /// shows the generic fallback and keeps transport detail in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status reported by the server, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    /// Total page count on paginated endpoints.
    #[serde(default)]
    pub pages: Option<u32>,
}

/// Extract the server's `message` from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message(r#"{"success": false, "message": "Product not found"}"#),
            "Product not found"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(""), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message("<html>Bad Gateway</html>"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message(r#"{"error": "nope"}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message(r#"{"message": "  "}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message(r#"{"message": 42}"#), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_error_display_is_server_message() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Insufficient stock".to_string(),
        };
        assert_eq!(err.to_string(), "Insufficient stock");
        assert_eq!(err.user_message(), "Insufficient stock");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_error_uses_fallback_for_visitors() {
        let err = ApiError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
