//! Thin async wrappers around [CloudWatch Logs](https://docs.aws.amazon.com/AmazonCloudWatchLogs/latest/APIReference/Welcome.html)
//! and [CloudWatch](https://docs.aws.amazon.com/AmazonCloudWatch/latest/APIReference/Welcome.html) metrics.
//!
//! Every operation comes in two flavours on [`CloudWatchClient`]:
//!
//! - `try_*` returns a plain `Result` for use with `?`.
//! - the unprefixed one never fails and returns an [`OperationResult`], pairing the outcome with
//!   the unwrapped response payload (empty on failure).
//!
//! [`CloudWatchClient::publish_log_event`] keeps track of sequence tokens for you: if the stream
//! expects a different token than the one supplied, the append is retried once with the token
//! the service reported.
//!
//! ## Feature Flags
//!
//! ### Http backend
//!
//! - [`reqwest`]:
//!   `reqwest` feature gate Use [`reqwest`] as the HTTP backend, but do not enable any TLS features.
//!   - `reqwest-default-tls`: use [`reqwest`] as the HTTP backend and default TLS provider.
//!   - `reqwest-rustls`: use [`reqwest`] as the HTTP backend and [`rustls`] TLS provider.
//!   - or, you can configure the TLS provider by manually enabling feature gates in [`reqwest`].
//!
//! Without any of these, supply your own [`transport::Transport`] to the builder.
//!
//! [`reqwest`]: https://docs.rs/reqwest
//! [`rustls`]: https://docs.rs/rustls
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
pub mod logs;
pub mod metrics;
mod proto;
mod result;
pub mod time;

#[cfg(test)]
mod testing;

pub use client::{
    ClientBuilderError, ClientError, CloudWatchClient, CloudWatchClientBuilder, ErrorKind,
    Service, ServiceError, transport,
};
pub use logs::{CreateLogGroupRequest, GetLogEventsRequest, PublishLogEventRequest};
pub use metrics::PutMetricDataRequest;
pub use proto::{
    Dimension, LogGroup, LogStream, Metric, MetricDatum, OutputLogEvent, PutLogEventsOutput,
    RejectedLogEventsInfo, ResponseMetadata, StandardUnit,
};
pub use result::{OperationResult, OperationStatus};

#[cfg(test)]
#[cfg_attr(test, ctor::ctor)]
fn init() {
    // Initialize the tracing subscriber for tests
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .init();
}
