use crate::client::{
    headers,
    transport::{HttpRequest, HttpResponse, Transport, TransportFuture},
};
use async_lock::OnceCell;

static HTTP_CLIENT: OnceCell<HttpClient> = OnceCell::new();

struct HttpClient {
    inner: reqwest::Client,
}

/// [`Transport`] backed by a process-wide [`reqwest::Client`].
///
/// The underlying client is built lazily on first use and shared by every
/// `ReqwestTransport`, so constructing one is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport {
    _private: (),
}

type Result<T, E = reqwest::Error> = std::result::Result<T, E>;

impl HttpClient {
    async fn new() -> Result<Self> {
        Ok(Self {
            inner: reqwest::ClientBuilder::new()
                .user_agent(headers::USER_AGENT_VALUE)
                .build()?,
        })
    }

    async fn get_or_try_init() -> Result<&'static Self> {
        HTTP_CLIENT.get_or_try_init(HttpClient::new).await
    }
}

impl ReqwestTransport {
    /// Create a new reqwest transport.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let client = HttpClient::get_or_try_init().await?;

            let mut builder = client.inner.post(&request.url);
            for (key, value) in request.headers {
                builder = builder.header(key, value);
            }
            let res = builder.body(request.body).send().await?;

            let status = res.status().as_u16();
            let request_id = header_string(res.headers(), headers::AMZN_REQUEST_ID);
            let error_type = header_string(res.headers(), headers::AMZN_ERROR_TYPE);
            let body = res.bytes().await?.to_vec();

            Ok(HttpResponse {
                status,
                request_id,
                error_type,
                body,
            })
        })
    }
}

fn header_string(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
