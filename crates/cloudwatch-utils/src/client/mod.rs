//! CloudWatch and CloudWatch Logs client

pub use self::builder::{ClientBuilderError, CloudWatchClientBuilder};
pub use self::error::{ClientError, ErrorKind, ServiceError};
use crate::{proto::ResponseMetadata, time::Clock};
use jiff::Timestamp;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt, sync::Arc};
use tracing::{Instrument, Level};
use transport::{HttpRequest, Transport};

mod builder;
mod error;
mod headers;
mod signer;
pub mod transport;

/// The AWS service an operation is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// CloudWatch Logs (`logs`).
    Logs,
    /// CloudWatch metrics (`monitoring`).
    Monitoring,
}

/// A client for CloudWatch Logs and CloudWatch metrics.
///
/// Cheap to clone; clones share configuration and transport.
#[derive(Clone)]
pub struct CloudWatchClient {
    inner: Arc<CloudWatchClientInner>,
}

struct CloudWatchClientInner {
    logs_endpoint: Endpoint,
    monitoring_endpoint: Endpoint,
    signer: signer::Signer,
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
    enable_trace: bool,
    print_internal_error: bool,
}

struct Endpoint {
    url: String,
    host: String,
    path: String,
}

impl Service {
    fn signing_name(self) -> &'static str {
        match self {
            Service::Logs => "logs",
            Service::Monitoring => "monitoring",
        }
    }

    fn target_prefix(self) -> &'static str {
        match self {
            Service::Logs => "Logs_20140328",
            Service::Monitoring => "GraniteServiceVersion20100801",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            Service::Logs => "application/x-amz-json-1.1",
            Service::Monitoring => "application/x-amz-json-1.0",
        }
    }

    fn default_endpoint(self, region: &str) -> String {
        format!("https://{}.{region}.amazonaws.com/", self.signing_name())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signing_name())
    }
}

impl CloudWatchClientInner {
    fn endpoint(&self, service: Service) -> &Endpoint {
        match service {
            Service::Logs => &self.logs_endpoint,
            Service::Monitoring => &self.monitoring_endpoint,
        }
    }
}

impl CloudWatchClient {
    /// Create a new client builder.
    pub fn builder() -> CloudWatchClientBuilder {
        CloudWatchClientBuilder::default()
    }

    /// Create a client configured from the standard AWS environment variables.
    ///
    /// See [`CloudWatchClientBuilder::from_env`].
    pub fn from_env() -> Result<Self, ClientBuilderError> {
        CloudWatchClientBuilder::from_env().build()
    }

    pub(crate) fn now_millis(&self) -> i64 {
        self.inner.clock.now_millis()
    }

    pub(crate) fn enable_trace(&self) -> bool {
        self.inner.enable_trace
    }

    /// Invoke one remote operation and decode its response, reporting any failure.
    pub(crate) async fn call<I, O>(
        &self,
        service: Service,
        action: &'static str,
        input: &I,
    ) -> Result<(O, ResponseMetadata), ClientError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let result = self.call_unreported(service, action, input).await;
        if let Err(e) = &result {
            self.report_error(service, action, e);
        }
        result
    }

    /// Like [`call`](Self::call), but leaves reporting to the caller.
    ///
    /// For operations that may recover from the error themselves.
    pub(crate) async fn call_unreported<I, O>(
        &self,
        service: Service,
        action: &'static str,
        input: &I,
    ) -> Result<(O, ResponseMetadata), ClientError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let fut = self.call_inner(service, action, input);
        if self.inner.enable_trace {
            fut.instrument(tracing::span!(Level::TRACE, "call", %service, action))
                .await
        } else {
            fut.await
        }
    }

    /// Log a failed operation, or print it to stderr if tracing is disabled and
    /// `print_internal_error` is set.
    pub(crate) fn report_error(&self, service: Service, action: &'static str, e: &ClientError) {
        if self.inner.enable_trace {
            tracing::error!(%service, action, err = %e, "cloudwatch call failed");
        } else if self.inner.print_internal_error {
            eprintln!("{}", internal_error_line(service, action, e));
        }
    }

    async fn call_inner<I, O>(
        &self,
        service: Service,
        action: &'static str,
        input: &I,
    ) -> Result<(O, ResponseMetadata), ClientError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let endpoint = self.inner.endpoint(service);
        let body = serde_json::to_vec(input)?;

        let mut request = HttpRequest::post(endpoint.url.as_str())
            .header(headers::CONTENT_TYPE, service.content_type())
            .header(headers::HOST, endpoint.host.as_str())
            .header(
                headers::AMZ_TARGET,
                format!("{}.{action}", service.target_prefix()),
            )
            .body(body);
        self.inner.signer.sign(
            &mut request,
            &endpoint.path,
            service.signing_name(),
            Timestamp::now(),
        );

        let response = self
            .inner
            .transport
            .send(request)
            .await
            .map_err(ClientError::Transport)?;
        if self.inner.enable_trace {
            tracing::trace!(
                status = response.status,
                request_id = response.request_id.as_deref(),
                body = %String::from_utf8_lossy(&response.body),
            );
        }
        if !response.is_success() {
            return Err(error::ServiceError::from_response(&response).into());
        }

        // Operations without output may answer with an empty body.
        let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &response.body
        };
        let output = serde_json::from_slice(body)?;
        let metadata = ResponseMetadata {
            request_id: response.request_id,
            http_status_code: response.status,
        };
        Ok((output, metadata))
    }
}

fn internal_error_line(service: Service, action: &str, e: &ClientError) -> String {
    format!("[cloudwatch-utils] error calling {service} {action}: {e}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        proto::Empty,
        testing::{MockTransport, test_client},
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_request_shape() {
        let transport = MockTransport::new();
        transport.respond_ok(json!({}));
        let client = test_client(&transport);

        let (_, metadata): (Empty, _) = client
            .call(Service::Logs, "DescribeLogGroups", &json!({}))
            .await
            .unwrap();
        assert_eq!(metadata.http_status_code, 200);
        assert_eq!(metadata.request_id.as_deref(), Some("mock-request-1"));

        let request = transport.single_request();
        assert_eq!(request.url, "https://logs.us-east-1.amazonaws.com/");
        assert_eq!(request.target(), "Logs_20140328.DescribeLogGroups");
        assert_eq!(
            request.header("content-type"),
            Some("application/x-amz-json-1.1")
        );
        assert!(request.header("x-amz-date").is_some());
        assert!(
            request
                .header("authorization")
                .unwrap()
                .contains("/us-east-1/logs/aws4_request")
        );
    }

    #[tokio::test]
    async fn test_monitoring_request_shape() {
        let transport = MockTransport::new();
        transport.respond_ok(json!({}));
        let client = test_client(&transport);

        let _: (Empty, _) = client
            .call(Service::Monitoring, "ListMetrics", &json!({}))
            .await
            .unwrap();

        let request = transport.single_request();
        assert_eq!(request.url, "https://monitoring.us-east-1.amazonaws.com/");
        assert_eq!(request.target(), "GraniteServiceVersion20100801.ListMetrics");
        assert_eq!(
            request.header("content-type"),
            Some("application/x-amz-json-1.0")
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_accepted() {
        let transport = MockTransport::new();
        transport.respond_raw(200, b"");
        let client = test_client(&transport);

        let result: Result<(Empty, _), _> =
            client.call(Service::Logs, "DeleteLogGroup", &json!({})).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_service_error() {
        let transport = MockTransport::new();
        transport.respond(
            400,
            json!({"__type": "ResourceNotFoundException", "message": "gone"}),
        );
        let client = test_client(&transport);

        let err = client
            .call::<_, Empty>(Service::Logs, "DeleteLogGroup", &json!({}))
            .await
            .unwrap_err();
        let service = err.as_service_error().unwrap();
        assert_eq!(service.kind, ErrorKind::ResourceNotFound);
        assert_eq!(&*service.message, "gone");
    }

    #[test]
    fn test_internal_error_line() {
        let err = ClientError::Transport("connection reset".into());
        assert_eq!(
            internal_error_line(Service::Logs, "PutLogEvents", &err),
            "[cloudwatch-utils] error calling logs PutLogEvents: transport error: connection reset"
        );
    }

    #[tokio::test]
    async fn test_transport_error() {
        let transport = MockTransport::new();
        transport.fail("connection reset");
        let client = test_client(&transport);

        let err = client
            .call::<_, Empty>(Service::Logs, "DeleteLogGroup", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
