//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CSP nonce (generate per-request nonce for the inline script)
//! 5. Security headers (CSP built from the nonce, framing, sniffing)
//! 6. Session layer (tower-sessions with in-memory store)
//!
//! The theme cookie is read per handler through [`ThemePreference`].

pub mod csp;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod theme;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use theme::{ThemePreference, theme_cookie};
