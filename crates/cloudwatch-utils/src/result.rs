use crate::ClientError;
use std::fmt;

/// Outcome recorded in an [`OperationResult`].
#[derive(Debug)]
pub enum OperationStatus {
    /// The operation succeeded.
    Ok,
    /// The operation failed; the error is kept as reported.
    Failed(ClientError),
}

/// Uniform two-field result returned by every non-`try_` operation of
/// [`CloudWatchClient`](crate::CloudWatchClient).
///
/// On failure `resultset` keeps its empty default value and the error is kept in
/// `operation_status`; nothing is ever propagated as an `Err`.
#[derive(Debug)]
pub struct OperationResult<T> {
    /// Whether the remote call succeeded.
    pub operation_status: OperationStatus,
    /// The unwrapped response payload.
    pub resultset: T,
}

impl OperationStatus {
    /// Returns `true` for [`OperationStatus::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, OperationStatus::Ok)
    }

    /// The captured error, if the operation failed.
    pub fn error(&self) -> Option<&ClientError> {
        match self {
            OperationStatus::Ok => None,
            OperationStatus::Failed(e) => Some(e),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::Ok => f.write_str("ok"),
            OperationStatus::Failed(e) => write!(f, "{e}"),
        }
    }
}

impl<T> OperationResult<T> {
    /// Returns `true` if the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.operation_status.is_ok()
    }

    /// Convert back into a `Result`, discarding the empty result set on failure.
    pub fn into_result(self) -> Result<T, ClientError> {
        match self.operation_status {
            OperationStatus::Ok => Ok(self.resultset),
            OperationStatus::Failed(e) => Err(e),
        }
    }
}

impl<T: Default> From<Result<T, ClientError>> for OperationResult<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(resultset) => OperationResult {
                operation_status: OperationStatus::Ok,
                resultset,
            },
            Err(e) => OperationResult {
                operation_status: OperationStatus::Failed(e),
                resultset: T::default(),
            },
        }
    }
}
