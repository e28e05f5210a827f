//! Throwaway commerce API for client tests.
//!
//! Records every request and answers from a fixed route table.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;

use super::CommerceClient;
use crate::config::CommerceApiConfig;

/// A request as the fake API saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub user_id: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
    content_type: &'static str,
}

impl Reply {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "text/plain",
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        response
    }
}

#[derive(Clone)]
struct FakeState {
    routes: Arc<Vec<(String, String, Reply)>>,
    fallback: Reply,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Running fake API.
pub struct FakeApi {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeApi {
    /// Answer every request with `reply`.
    pub async fn spawn(reply: Reply) -> Self {
        Self::spawn_routes(Vec::new(), reply).await
    }

    /// Answer `(method, path)` pairs from `routes`, anything else with
    /// `fallback`. Paths include the `/api` prefix.
    #[allow(clippy::unwrap_used)]
    pub async fn spawn_routes(routes: Vec<(&str, &str, Reply)>, fallback: Reply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(method, path, reply)| (method.to_string(), path.to_string(), reply))
                    .collect(),
            ),
            fallback,
            requests: Arc::clone(&requests),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    #[allow(clippy::unwrap_used)]
    pub fn client(&self) -> CommerceClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        CommerceClient::with_http_client(
            &CommerceApiConfig::with_base_url(&self.base_url).unwrap(),
            http,
        )
    }

    #[allow(clippy::unwrap_used)]
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[allow(clippy::unwrap_used)]
async fn handle(State(state): State<FakeState>, request: Request<Body>) -> Reply {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_owned),
        user_id: header("user-id"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
    };

    let reply = state
        .routes
        .iter()
        .find(|(method, path, _)| *method == recorded.method && *path == recorded.path)
        .map_or_else(|| state.fallback.clone(), |(_, _, reply)| reply.clone());

    state.requests.lock().unwrap().push(recorded);
    reply
}
