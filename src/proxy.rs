//! Same-origin forwarding of `/api/*` to the remote backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client only ever calls relative `/api/...` paths. This module
//! replays each such request against `GRADYZE_BACKEND_URL` with the same
//! method, path, query, headers and body, then streams back the status,
//! headers and body unchanged. The backend owns every schema; nothing here
//! inspects payloads.
//!
//! DESIGN
//! ======
//! - Hop-by-hop headers are dropped in both directions.
//! - Request bodies are not size-limited here; the backend owns the upload cap.
//! - `Authorization` is forwarded but never logged.
//! - Transport failures become `502` with a JSON `message` so the client's
//!   error extraction shows it verbatim.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, any};

use crate::config::HostConfig;
use crate::error::HostError;

pub const BACKEND_UNAVAILABLE: &str = "Backend unavailable";

const HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    header::HOST,
    header::CONTENT_LENGTH,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Shared outbound client plus the backend base URL.
#[derive(Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    backend_url: String,
}

impl ProxyState {
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HostError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, backend_url: config.backend_url.clone() })
    }

    /// Absolute backend URL for an incoming request URI.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
        format!("{}{path}", self.backend_url)
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name) || name.as_str() == "keep-alive"
}

/// Copy end-to-end headers only.
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn unavailable() -> Response {
    (StatusCode::BAD_GATEWAY, axum::Json(serde_json::json!({ "message": BACKEND_UNAVAILABLE }))).into_response()
}

/// Method router for `/api/{*rest}`.
pub fn proxy_route() -> MethodRouter<ProxyState> {
    any(forward).layer(DefaultBodyLimit::disable())
}

/// Forward one request and relay the backend's answer.
pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = state.target_url(&uri);
    let upstream = state
        .http
        .request(method.clone(), &url)
        .headers(forwardable_headers(&headers))
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(%method, path = %uri.path(), error = %e, "backend request failed");
            return unavailable();
        }
    };

    let status = upstream.status();
    let response_headers = forwardable_headers(upstream.headers());
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, path = %uri.path(), error = %e, "backend body read failed");
            return unavailable();
        }
    };
    tracing::debug!(%method, path = %uri.path(), status = status.as_u16(), "proxied");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}
