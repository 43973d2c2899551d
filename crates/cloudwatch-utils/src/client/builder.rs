use crate::{
    client::{CloudWatchClient, CloudWatchClientInner, Endpoint, Service, signer},
    client::transport::Transport,
    time::{Clock, SystemClock},
};
use http::Uri;
use std::sync::Arc;

/// Builder error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientBuilderError {
    /// Missing required field in the builder.
    #[error("missing required field: {0}")]
    Missing(&'static str),
    /// The region is not a valid AWS region name.
    #[error("invalid region: {0:?}")]
    InvalidRegion(String),
    /// An endpoint override is not an absolute `http(s)` URL.
    #[error("invalid endpoint: {0:?}")]
    InvalidEndpoint(String),
}

/// Builder for creating a CloudWatch client with required and optional parameters.
pub struct CloudWatchClientBuilder {
    region: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
    logs_endpoint: Option<String>,
    monitoring_endpoint: Option<String>,
    transport: Option<Box<dyn Transport>>,
    clock: Option<Box<dyn Clock>>,
    enable_trace: bool,
    print_internal_error: bool,
}

type Result<T, E = ClientBuilderError> = std::result::Result<T, E>;

impl Default for CloudWatchClientBuilder {
    fn default() -> Self {
        Self {
            region: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            logs_endpoint: None,
            monitoring_endpoint: None,
            transport: None,
            clock: None,
            enable_trace: true,
            print_internal_error: false,
        }
    }
}

impl CloudWatchClientBuilder {
    /// Create a builder pre-populated from the standard AWS environment variables.
    ///
    /// - `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`
    /// - `AWS_ACCESS_KEY_ID`
    /// - `AWS_SECRET_ACCESS_KEY`
    /// - `AWS_SESSION_TOKEN`
    /// - `AWS_ENDPOINT_URL_CLOUDWATCH_LOGS` and `AWS_ENDPOINT_URL_CLOUDWATCH` for endpoint overrides
    ///
    /// Unset or empty variables are skipped; later builder calls override what was read.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        builder.region = env_var("AWS_REGION").or_else(|| env_var("AWS_DEFAULT_REGION"));
        builder.access_key_id = env_var("AWS_ACCESS_KEY_ID");
        builder.secret_access_key = env_var("AWS_SECRET_ACCESS_KEY");
        builder.session_token = env_var("AWS_SESSION_TOKEN");
        builder.logs_endpoint = env_var("AWS_ENDPOINT_URL_CLOUDWATCH_LOGS");
        builder.monitoring_endpoint = env_var("AWS_ENDPOINT_URL_CLOUDWATCH");
        builder
    }

    /// Set the region, e.g. `eu-west-1`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the access key id.
    pub fn access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set the secret access key.
    pub fn secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set the session token for temporary credentials.
    pub fn session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Override the endpoint of one service, e.g. `http://localhost:4566` for a local emulator.
    pub fn endpoint(mut self, service: Service, url: impl Into<String>) -> Self {
        match service {
            Service::Logs => self.logs_endpoint = Some(url.into()),
            Service::Monitoring => self.monitoring_endpoint = Some(url.into()),
        }
        self
    }

    /// Use a custom HTTP backend.
    ///
    /// Defaults to [`ReqwestTransport`](crate::transport::ReqwestTransport) when the `reqwest`
    /// feature is enabled; required otherwise.
    pub fn transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Use a custom clock for log event timestamps.
    ///
    /// Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Enable or disable tracing for the client.
    ///
    /// Enabled by default.
    /// If enabled, client will log via [`tracing`](https://docs.rs/tracing/latest/tracing/) crate.
    pub fn enable_trace(mut self, enable_trace: bool) -> Self {
        self.enable_trace = enable_trace;
        self
    }

    /// Enable or disable printing internal errors to stderr.
    ///
    /// Disabled by default.
    /// If enabled and tracing is not enabled, client will print errors to stderr.
    pub fn print_internal_error(mut self, print_internal_error: bool) -> Self {
        self.print_internal_error = print_internal_error;
        self
    }

    /// Build the CloudWatch client with the provided configuration.
    pub fn build(self) -> Result<CloudWatchClient> {
        let region = self.region.ok_or(ClientBuilderError::Missing("region"))?;
        let access_key_id = self
            .access_key_id
            .ok_or(ClientBuilderError::Missing("access_key_id"))?;
        let secret_access_key = self
            .secret_access_key
            .ok_or(ClientBuilderError::Missing("secret_access_key"))?;

        if region.is_empty()
            || !region
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(ClientBuilderError::InvalidRegion(region));
        }

        let logs_endpoint = match self.logs_endpoint {
            Some(url) => parse_endpoint(url)?,
            None => parse_endpoint(Service::Logs.default_endpoint(&region))?,
        };
        let monitoring_endpoint = match self.monitoring_endpoint {
            Some(url) => parse_endpoint(url)?,
            None => parse_endpoint(Service::Monitoring.default_endpoint(&region))?,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };

        let client = CloudWatchClientInner {
            logs_endpoint,
            monitoring_endpoint,
            signer: signer::Signer {
                access_key_id,
                secret_access_key,
                session_token: self.session_token,
                region,
            },
            transport,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            enable_trace: self.enable_trace,
            print_internal_error: self.print_internal_error,
        };

        Ok(CloudWatchClient {
            inner: Arc::new(client),
        })
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "reqwest")] {
        fn default_transport() -> Result<Box<dyn Transport>> {
            Ok(Box::new(crate::transport::ReqwestTransport::new()))
        }
    } else {
        fn default_transport() -> Result<Box<dyn Transport>> {
            Err(ClientBuilderError::Missing("transport"))
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_endpoint(url: String) -> Result<Endpoint> {
    let uri: Uri = match url.parse() {
        Ok(uri) => uri,
        Err(_) => return Err(ClientBuilderError::InvalidEndpoint(url)),
    };
    let valid_scheme = matches!(uri.scheme_str(), Some("http" | "https"));
    let Some(authority) = uri.authority().filter(|_| valid_scheme) else {
        return Err(ClientBuilderError::InvalidEndpoint(url));
    };
    let host = authority.as_str().to_string();
    let path = match uri.path() {
        "" => "/".to_string(),
        path => path.to_string(),
    };
    Ok(Endpoint { url, host, path })
}
