//! Pluggable HTTP backends.
//!
//! The client only ever issues signed `POST` requests and needs three things back from the
//! backend: the status code, a couple of response headers and the body. Anything that can do that
//! implements [`Transport`].
use std::{future::Future, pin::Pin, sync::Arc};

#[cfg(feature = "reqwest")]
mod reqwest;
#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub use self::reqwest::ReqwestTransport;

/// Boxed error returned by a [`Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, BoxError>> + Send + 'a>>;

/// An HTTP backend able to deliver a signed request.
pub trait Transport: Send + Sync + 'static {
    /// Send the request and collect the full response.
    ///
    /// Non-2xx statuses are not errors at this level; they must be returned as a response so the
    /// client can decode the service error body.
    fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        (**self).send(request)
    }
}

/// A signed `POST` request.
#[derive(Debug, Clone)]
#[must_use = "HttpRequest does nothing until you hand it to a Transport"]
pub struct HttpRequest {
    /// Absolute URL of the service endpoint.
    pub url: String,
    /// Request headers, lowercase names.
    pub headers: Vec<(&'static str, String)>,
    /// JSON request body.
    pub body: Vec<u8>,
}

/// The parts of an HTTP response the client inspects.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `x-amzn-RequestId` header.
    pub request_id: Option<String>,
    /// Value of the `x-amzn-ErrorType` header.
    pub error_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a `POST` request to `url` with no headers and an empty body.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::with_capacity(8),
            body: Vec::new(),
        }
    }

    /// Append a header.
    pub fn header(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((key, value.into()));
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Look up the first header named `key`, ignoring ASCII case.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }
}

impl HttpResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
