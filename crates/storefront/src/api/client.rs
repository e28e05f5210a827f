//! Commerce API request wrapper.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, CartApi, CheckoutApi, ProductsApi, error_message};
use crate::config::CommerceApiConfig;

/// Header carrying the caller identity.
pub const USER_ID_HEADER: &str = "user-id";

/// Client for the commerce REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    http: reqwest::Client,
    base_url: Url,
    user_id: SecretString,
}

impl CommerceClient {
    /// Create a client for the configured API.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client that sends through an existing `reqwest` client.
    #[must_use]
    pub fn with_http_client(config: &CommerceApiConfig, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(CommerceClientInner {
                http,
                base_url: config.base_url.clone(),
                user_id: config.user_id.clone(),
            }),
        }
    }

    /// Product catalog endpoints.
    #[must_use]
    pub const fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    /// Server-side cart endpoints.
    #[must_use]
    pub const fn cart(&self) -> CartApi<'_> {
        CartApi::new(self)
    }

    /// Checkout and order endpoints.
    #[must_use]
    pub const fn checkout(&self) -> CheckoutApi<'_> {
        CheckoutApi::new(self)
    }

    /// Base URL every endpoint is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// `GET` an endpoint. Query pairs with an empty value are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body does not parse as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(segments)?;
        let present: Vec<_> = query.iter().filter(|(_, value)| !value.is_empty()).collect();
        if !present.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in present {
                pairs.append_pair(key, value);
            }
        }
        self.send(Method::GET, url, None::<&()>).await
    }

    /// `POST` a JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// See [`CommerceClient::get`].
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// `PUT` a JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// See [`CommerceClient::get`].
    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::PUT, url, Some(body)).await
    }

    /// `DELETE` an endpoint.
    ///
    /// # Errors
    ///
    /// See [`CommerceClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::DELETE, url, None::<&()>).await
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, method, url, body), fields(method = %method, path = %url.path()))]
    async fn send<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .inner
            .http
            .request(method, url)
            .header(USER_ID_HEADER, self.inner.user_id.expose_secret())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            tracing::warn!(
                status = %status,
                message = %message,
                "Commerce API returned non-success status"
            );
            return Err(ApiError::Status { status, message });
        }

        debug!(status = %status, bytes = text.len(), "Commerce API response");

        // Some mutations answer with an empty body
        let json = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(json).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse commerce API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::StatusCode;
    use serde::de::IgnoredAny;

    use super::*;
    use crate::api::FALLBACK_ERROR_MESSAGE;
    use crate::api::test_server::{FakeApi, Reply};

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_segments() {
        let config = CommerceApiConfig::with_base_url("https://api.example.com/api").unwrap();
        let client = CommerceClient::new(&config);

        let url = client.endpoint(&["checkout", "orders", "ORD 1/2"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/checkout/orders/ORD%201%2F2"
        );

        let config = CommerceApiConfig::with_base_url("https://api.example.com/api/").unwrap();
        let url = CommerceClient::new(&config).endpoint(&["cart"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/cart");
    }

    #[tokio::test]
    async fn test_every_call_sends_identity_and_json_headers() {
        let api = FakeApi::spawn(Reply::json(StatusCode::OK, serde_json::json!({"data": []}))).await;
        let client = api.client();

        let _: IgnoredAny = client.get(&["products"], &[]).await.unwrap();
        let _: IgnoredAny = client
            .post(&["cart"], &serde_json::json!({"productId": 1}))
            .await
            .unwrap();
        let _: IgnoredAny = client.delete(&["cart"]).await.unwrap();

        let requests = api.requests();
        assert_eq!(requests.len(), 3);
        for request in &requests {
            assert_eq!(request.user_id.as_deref(), Some("user_12345"));
            assert_eq!(request.content_type.as_deref(), Some("application/json"));
        }
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].body, serde_json::json!({"productId": 1}));
        assert_eq!(requests[2].method, "DELETE");
        assert_eq!(requests[2].path, "/api/cart");
    }

    #[tokio::test]
    async fn test_empty_query_values_are_omitted() {
        let api = FakeApi::spawn(Reply::json(StatusCode::OK, serde_json::json!({"data": []}))).await;

        let _: IgnoredAny = api
            .client()
            .get(
                &["checkout", "orders"],
                &[("page", "1".to_string()), ("status", String::new())],
            )
            .await
            .unwrap();

        assert_eq!(api.requests()[0].query.as_deref(), Some("page=1"));
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let api = FakeApi::spawn(Reply::json(
            StatusCode::BAD_REQUEST,
            serde_json::json!({"success": false, "message": "Insufficient stock"}),
        ))
        .await;

        let err = api
            .client()
            .post::<_, IgnoredAny>(&["checkout"], &serde_json::json!({"cartItems": []}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status { status, ref message }
                if status == StatusCode::BAD_REQUEST && message == "Insufficient stock"
        ));
    }

    #[tokio::test]
    async fn test_error_without_json_body_uses_fallback() {
        let api = FakeApi::spawn(Reply::text(StatusCode::BAD_GATEWAY, "upstream down")).await;

        let err = api
            .client()
            .get::<IgnoredAny>(&["products"], &[])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_accepted() {
        let api = FakeApi::spawn(Reply::text(StatusCode::OK, "")).await;

        let body: Option<serde_json::Value> = api.client().delete(&["cart", "3"]).await.unwrap();
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_unexpected_body_is_a_parse_error() {
        let api = FakeApi::spawn(Reply::text(StatusCode::OK, "<html></html>")).await;

        let err = api
            .client()
            .get::<IgnoredAny>(&["products"], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
