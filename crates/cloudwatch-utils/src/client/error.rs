use crate::client::transport::{BoxError, HttpResponse};
use serde::Deserialize;

/// Error type for CloudWatch client operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The service answered with a non-successful status.
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// The HTTP backend failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// A request could not be encoded or a response could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An error reported by CloudWatch or CloudWatch Logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("service error [{status}] {code}: {message}")]
#[non_exhaustive]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Short error code, e.g. `ResourceNotFoundException`.
    pub code: Box<str>,
    /// Human-readable message from the service.
    pub message: Box<str>,
    /// Request id assigned by the service.
    pub request_id: Option<Box<str>>,
    /// Classification of the error.
    pub kind: ErrorKind,
}

/// Coarse classification of a [`ServiceError`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The append was rejected because the stream expects a different sequence token.
    ///
    /// Reported as `InvalidSequenceTokenException` or `DataAlreadyAcceptedException`, both of
    /// which carry the token the stream expects next.
    SequenceTokenMismatch {
        /// Token the stream expects on the next append.
        expected_sequence_token: Box<str>,
    },
    /// The named log group, log stream or metric does not exist.
    ResourceNotFound,
    /// The named resource already exists.
    ResourceAlreadyExists,
    /// The request was throttled.
    Throttling,
    /// Anything else.
    Other,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
    #[serde(rename = "expectedSequenceToken")]
    expected_sequence_token: Option<String>,
}

impl ClientError {
    /// The service error, if this is one.
    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            ClientError::Service(e) => Some(e),
            _ => None,
        }
    }

    /// The token the stream expects, if this is a sequence token mismatch.
    pub fn expected_sequence_token(&self) -> Option<&str> {
        self.as_service_error()
            .and_then(ServiceError::expected_sequence_token)
    }
}

impl ServiceError {
    /// The token the stream expects, if this is a sequence token mismatch.
    pub fn expected_sequence_token(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::SequenceTokenMismatch {
                expected_sequence_token,
            } => Some(expected_sequence_token.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        let body = serde_json::from_slice::<ErrorBody>(&response.body).ok();

        let raw_code = body
            .as_ref()
            .and_then(|body| body.error_type.as_deref())
            .or(response.error_type.as_deref())
            .unwrap_or("Unknown");
        let code = normalize_code(raw_code);

        let message = match body.as_ref().and_then(|body| body.message.as_deref()) {
            Some(message) => message.into(),
            None => String::from_utf8_lossy(&response.body).into_owned().into(),
        };

        let expected_sequence_token = body
            .as_ref()
            .and_then(|body| body.expected_sequence_token.clone());
        let kind = match (expected_sequence_token, code) {
            (Some(token), _) => ErrorKind::SequenceTokenMismatch {
                expected_sequence_token: token.into_boxed_str(),
            },
            (None, "ResourceNotFoundException" | "ResourceNotFound") => ErrorKind::ResourceNotFound,
            (None, "ResourceAlreadyExistsException") => ErrorKind::ResourceAlreadyExists,
            (None, "ThrottlingException" | "Throttling") => ErrorKind::Throttling,
            (None, _) => ErrorKind::Other,
        };

        ServiceError {
            status: response.status,
            code: code.into(),
            message,
            request_id: response.request_id.as_deref().map(Into::into),
            kind,
        }
    }
}

/// `com.amazonaws.logs#InvalidSequenceTokenException` and
/// `InvalidSequenceTokenException:http://internal.amazon.com/` both become
/// `InvalidSequenceTokenException`.
fn normalize_code(raw: &str) -> &str {
    let code = raw.rsplit('#').next().unwrap_or(raw);
    code.split(':').next().unwrap_or(code).trim()
}
