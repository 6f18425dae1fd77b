//! Shared request helper for every backend call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen follows the same contract: attach the bearer token, send,
//! decode on 2xx, otherwise surface the backend's `message` verbatim or a
//! caller-supplied fallback. Endpoint modules describe *what* to send as an
//! `ApiRequest`; a `Transport` decides *how* it travels.
//!
//! Client-side (hydrate): `GlooTransport` issues real `fetch` calls.
//! Server-side (SSR): the same transport reports `ApiError::Unavailable`.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries. Transport failures, backend rejections and decode
//! failures are distinct `ApiError` variants so screens can choose wording
//! without re-parsing response bodies.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::session::{Session, StoreError};

/// Fallback shown when the backend gave no usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong";
pub const STORAGE_FAILURE: &str = "Could not save your sign-in in this browser.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A file chosen by the user, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Text(String),
    File(FilePart),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(String, FormField)>),
}

/// Platform-neutral description of one backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), bearer: None, body: RequestBody::Empty }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn authorized(self, session: &Session) -> Self {
        self.bearer(session.token.clone())
    }

    /// Append a query parameter. Blank values are skipped so unset filters
    /// never reach the backend as empty strings.
    #[must_use]
    pub fn query(mut self, key: &str, value: &str) -> Self {
        if !value.trim().is_empty() {
            self.query.push((key.to_owned(), value.trim().to_owned()));
        }
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Encode` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, fields: Vec<(String, FormField)>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Value of the `Authorization` header, when a token is attached.
    pub fn authorization_header(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }

    /// Path plus percent-encoded query string.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// Status, content type and raw body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response arrived (offline, DNS, CORS, aborted fetch).
    #[error("network request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {status}")]
    Backend { status: u16, message: Option<String> },

    /// A 2xx body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("request encode failed: {0}")]
    Encode(String),

    /// A protected call was attempted without a session.
    #[error("not signed in")]
    Unauthenticated,

    /// The session could not be written to the tab's storage.
    #[error("session storage failed: {0}")]
    Storage(#[from] StoreError),

    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// The backend-supplied message, if the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { message: Some(message), .. } => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the server message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let ApiError::Storage(_) = self {
            return STORAGE_FAILURE.to_owned();
        }
        self.server_message().map_or_else(|| fallback.to_owned(), str::to_owned)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": ..}`, `{"error": ..}` or `{"msg": ..}`; blank strings
/// count as absent.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Sends an `ApiRequest` and returns the raw response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Reject non-2xx responses, keeping the backend's message.
///
/// # Errors
///
/// Returns `ApiError::Backend` for any status outside `200..300`.
pub fn expect_success(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Backend { status: response.status, message: extract_message(&response.body) })
    }
}

/// Decode a JSON body from a successful response.
///
/// An empty 2xx body decodes as JSON `null`, which suits `Option<_>`,
/// `serde_json::Value` and `()` targets.
///
/// # Errors
///
/// Returns `ApiError::Backend` for non-2xx responses and `ApiError::Decode`
/// when the body does not match `T`.
pub fn interpret<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    let response = expect_success(response)?;
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) { b"null" } else { &response.body };
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send and decode a JSON response.
///
/// # Errors
///
/// Propagates transport, backend and decode failures.
pub async fn send_json<T: DeserializeOwned, X: Transport + ?Sized>(
    transport: &X,
    request: ApiRequest,
) -> Result<T, ApiError> {
    interpret(transport.send(request).await?)
}

/// Send and only check the status.
///
/// # Errors
///
/// Propagates transport and backend failures.
pub async fn send_empty<X: Transport + ?Sized>(transport: &X, request: ApiRequest) -> Result<(), ApiError> {
    expect_success(transport.send(request).await?).map(|_| ())
}

/// Send and return the raw body bytes (PDF downloads).
///
/// # Errors
///
/// Propagates transport and backend failures.
pub async fn send_bytes<X: Transport + ?Sized>(transport: &X, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
    expect_success(transport.send(request).await?).map(|r| r.body)
}

/// Browser `fetch` transport backed by `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        gloo::send(request).await
    }
}

#[cfg(not(feature = "hydrate"))]
impl Transport for GlooTransport {
    async fn send(&self, _request: ApiRequest) -> Result<RawResponse, ApiError> {
        Err(ApiError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
mod gloo {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};

    use super::{ApiError, ApiRequest, FormField, Method, RawResponse, RequestBody};

    fn http_method(method: Method) -> HttpMethod {
        match method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        }
    }

    fn js_error(e: wasm_bindgen::JsValue) -> ApiError {
        ApiError::Transport(format!("{e:?}"))
    }

    fn form_data(fields: &[(String, FormField)]) -> Result<web_sys::FormData, ApiError> {
        let form = web_sys::FormData::new().map_err(js_error)?;
        for (name, field) in fields {
            match field {
                FormField::Text(value) => form.append_with_str(name, value).map_err(js_error)?,
                FormField::File(part) => {
                    let blob = crate::util::download::bytes_to_blob(&part.bytes, &part.content_type).map_err(js_error)?;
                    form.append_with_blob_and_filename(name, &blob, &part.file_name)
                        .map_err(js_error)?;
                }
            }
        }
        Ok(form)
    }

    pub(super) async fn send(request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = request.url();
        let mut builder = RequestBuilder::new(&url).method(http_method(request.method));
        if let Some(auth) = request.authorization_header() {
            builder = builder.header("Authorization", &auth);
        }
        let outgoing = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => builder.body(form_data(fields)?),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let resp = outgoing.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let content_type = resp.headers().get("content-type");
        let body = resp.binary().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse { status, content_type, body })
    }
}
