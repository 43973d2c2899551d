//! CloudWatch Logs operations: log groups, log streams and log events.
use crate::{
    ClientError, CloudWatchClient, ErrorKind, OperationResult, ServiceError,
    client::Service,
    proto::{
        CreateLogGroupInput, CreateLogStreamInput, DeleteLogGroupInput, DescribeLogGroupsInput,
        DescribeLogGroupsOutput, DescribeLogStreamsInput, DescribeLogStreamsOutput, Empty,
        GetLogEventsInput, GetLogEventsOutput, InputLogEvent, LogGroup, LogStream, OutputLogEvent,
        PutLogEventsInput, PutLogEventsOutput, PutRetentionPolicyInput, ResponseMetadata,
    },
    time::start_of_day_millis,
};
use jiff::civil::date;
use std::collections::BTreeMap;

/// Log group used when none is given.
pub const DEFAULT_LOG_GROUP_NAME: &str = "log_group_test";
/// Log stream used when none is given.
pub const DEFAULT_LOG_STREAM_NAME: &str = "log_stream_test";
/// Retention applied to new log groups, in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;
/// Message published when none is given.
pub const DEFAULT_MESSAGE: &str = "Hello Log!";
/// Maximum number of events returned by [`CloudWatchClient::get_log_events`] by default.
pub const DEFAULT_EVENT_LIMIT: u32 = 100;

const PUT_LOG_EVENTS: &str = "PutLogEvents";

/// Tag key always set to the retention period of a new log group.
const RETENTION_PERIOD_TAG: &str = "RetentionPeriod";

/// Tags applied to a new log group when none are given.
///
/// `RetentionPeriod` is added when the group is created.
pub fn default_log_group_tags() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Type".to_string(), "Back end".to_string()),
        ("Environment".to_string(), "Production".to_string()),
    ])
}

/// Parameters of [`CloudWatchClient::create_log_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLogGroupRequest {
    /// Name of the new group.
    pub log_group_name: String,
    /// Days to keep events for.
    pub retention_days: u32,
    /// Tags for the group. `RetentionPeriod` is always overwritten with `retention_days`.
    pub tags: BTreeMap<String, String>,
}

/// Parameters of [`CloudWatchClient::publish_log_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishLogEventRequest {
    /// Stream to append to.
    pub log_stream_name: String,
    /// Group owning the stream.
    pub log_group_name: String,
    /// Event body.
    pub message: String,
    /// Token returned by the previous append, or the stream's `upload_sequence_token`.
    ///
    /// `None` and the empty string both mean "no token", which is only accepted by a stream
    /// that has never been written to. A stale token is recovered from automatically.
    pub sequence_token: Option<String>,
}

/// Parameters of [`CloudWatchClient::get_log_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLogEventsRequest {
    /// Stream to read.
    pub log_stream_name: String,
    /// Group owning the stream.
    pub log_group_name: String,
    /// Inclusive start, milliseconds since the UNIX epoch.
    pub start_time: i64,
    /// Exclusive end, milliseconds since the UNIX epoch.
    pub end_time: i64,
    /// Maximum number of events to return.
    pub limit: u32,
    /// Return the earliest events first.
    pub start_from_head: bool,
}

impl Default for CreateLogGroupRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_GROUP_NAME)
    }
}

impl CreateLogGroupRequest {
    /// A request for `log_group_name` with the default retention and tags.
    pub fn new(log_group_name: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            retention_days: DEFAULT_RETENTION_DAYS,
            tags: default_log_group_tags(),
        }
    }

    /// Set the retention in days.
    pub fn with_retention_days(mut self, retention_days: u32) -> Self {
        self.retention_days = retention_days;
        self
    }

    /// Replace all tags.
    pub fn with_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Add or replace one tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    fn effective_tags(&self) -> BTreeMap<String, String> {
        let mut tags = self.tags.clone();
        tags.insert(
            RETENTION_PERIOD_TAG.to_string(),
            self.retention_days.to_string(),
        );
        tags
    }
}

impl Default for PublishLogEventRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_STREAM_NAME, DEFAULT_LOG_GROUP_NAME, DEFAULT_MESSAGE)
    }
}

impl PublishLogEventRequest {
    /// A request appending `message` to `log_group_name`/`log_stream_name` without a token.
    pub fn new(
        log_stream_name: impl Into<String>,
        log_group_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            log_stream_name: log_stream_name.into(),
            log_group_name: log_group_name.into(),
            message: message.into(),
            sequence_token: None,
        }
    }

    /// Set the sequence token.
    pub fn with_sequence_token(mut self, sequence_token: impl Into<String>) -> Self {
        self.sequence_token = Some(sequence_token.into());
        self
    }

    fn initial_token(&self) -> Option<&str> {
        self.sequence_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

impl Default for GetLogEventsRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_STREAM_NAME, DEFAULT_LOG_GROUP_NAME)
    }
}

impl GetLogEventsRequest {
    /// A request for `log_group_name`/`log_stream_name` over calendar year 2022 in local time,
    /// oldest first, at most [`DEFAULT_EVENT_LIMIT`] events.
    pub fn new(log_stream_name: impl Into<String>, log_group_name: impl Into<String>) -> Self {
        Self {
            log_stream_name: log_stream_name.into(),
            log_group_name: log_group_name.into(),
            start_time: start_of_day_millis(date(2022, 1, 1)),
            end_time: start_of_day_millis(date(2023, 1, 1)),
            limit: DEFAULT_EVENT_LIMIT,
            start_from_head: true,
        }
    }

    /// Set the time window, milliseconds since the UNIX epoch.
    pub fn with_window(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Set the maximum number of events.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Choose between oldest-first (`true`) and newest-first (`false`).
    pub fn with_start_from_head(mut self, start_from_head: bool) -> Self {
        self.start_from_head = start_from_head;
        self
    }
}

type Result<T, E = ClientError> = std::result::Result<T, E>;

impl CloudWatchClient {
    /// Create a log group and set its retention policy.
    ///
    /// Returns the metadata of the retention policy call, the last one issued.
    pub async fn try_create_log_group(
        &self,
        request: &CreateLogGroupRequest,
    ) -> Result<ResponseMetadata> {
        let input = CreateLogGroupInput {
            log_group_name: &request.log_group_name,
            tags: request.effective_tags(),
        };
        let (Empty {}, _) = self.call(Service::Logs, "CreateLogGroup", &input).await?;

        let input = PutRetentionPolicyInput {
            log_group_name: &request.log_group_name,
            retention_in_days: request.retention_days,
        };
        let (Empty {}, metadata) = self
            .call(Service::Logs, "PutRetentionPolicy", &input)
            .await?;
        Ok(metadata)
    }

    /// Create a log group and set its retention policy.
    ///
    /// See [`try_create_log_group`](Self::try_create_log_group).
    pub async fn create_log_group(
        &self,
        request: &CreateLogGroupRequest,
    ) -> OperationResult<ResponseMetadata> {
        self.try_create_log_group(request).await.into()
    }

    /// List the log groups of the region.
    ///
    /// An empty `name_prefix` lists every group; otherwise only groups whose name starts with
    /// it. Only the first page is returned.
    pub async fn try_list_log_groups(&self, name_prefix: &str) -> Result<Vec<LogGroup>> {
        let input = DescribeLogGroupsInput {
            log_group_name_prefix: non_empty(name_prefix),
        };
        let (output, _): (DescribeLogGroupsOutput, _) = self
            .call(Service::Logs, "DescribeLogGroups", &input)
            .await?;
        Ok(output.log_groups)
    }

    /// List the log groups of the region.
    ///
    /// See [`try_list_log_groups`](Self::try_list_log_groups).
    pub async fn list_log_groups(&self, name_prefix: &str) -> OperationResult<Vec<LogGroup>> {
        self.try_list_log_groups(name_prefix).await.into()
    }

    /// Create a log stream in an existing group.
    pub async fn try_create_log_stream(
        &self,
        log_stream_name: &str,
        log_group_name: &str,
    ) -> Result<ResponseMetadata> {
        let input = CreateLogStreamInput {
            log_group_name,
            log_stream_name,
        };
        let (Empty {}, metadata) = self.call(Service::Logs, "CreateLogStream", &input).await?;
        Ok(metadata)
    }

    /// Create a log stream in an existing group.
    ///
    /// See [`try_create_log_stream`](Self::try_create_log_stream).
    pub async fn create_log_stream(
        &self,
        log_stream_name: &str,
        log_group_name: &str,
    ) -> OperationResult<ResponseMetadata> {
        self.try_create_log_stream(log_stream_name, log_group_name)
            .await
            .into()
    }

    /// List the streams of one log group.
    ///
    /// An empty `name_prefix` lists every stream; otherwise only streams whose name starts with
    /// it. Only the first page is returned.
    pub async fn try_list_log_streams(
        &self,
        name_prefix: &str,
        log_group_name: &str,
    ) -> Result<Vec<LogStream>> {
        let input = DescribeLogStreamsInput {
            log_group_name,
            log_stream_name_prefix: non_empty(name_prefix),
        };
        let (output, _): (DescribeLogStreamsOutput, _) = self
            .call(Service::Logs, "DescribeLogStreams", &input)
            .await?;
        Ok(output.log_streams)
    }

    /// List the streams of one log group.
    ///
    /// See [`try_list_log_streams`](Self::try_list_log_streams).
    pub async fn list_log_streams(
        &self,
        name_prefix: &str,
        log_group_name: &str,
    ) -> OperationResult<Vec<LogStream>> {
        self.try_list_log_streams(name_prefix, log_group_name)
            .await
            .into()
    }

    /// Append one message, timestamped now, to a log stream.
    ///
    /// If the stream rejects the append because it expects a different sequence token, the
    /// append is retried exactly once with the token the service reported, stamped with a
    /// fresh timestamp. Any other failure, or a failed retry, is returned as is.
    pub async fn try_publish_log_event(
        &self,
        request: &PublishLogEventRequest,
    ) -> Result<PutLogEventsOutput> {
        let result = match self.put_log_event(request, request.initial_token()).await {
            Err(ClientError::Service(ServiceError {
                kind:
                    ErrorKind::SequenceTokenMismatch {
                        expected_sequence_token,
                    },
                code,
                ..
            })) => {
                if self.enable_trace() {
                    tracing::warn!(
                        %code,
                        log_group = %request.log_group_name,
                        log_stream = %request.log_stream_name,
                        "sequence token mismatch, retrying with the expected token"
                    );
                }
                self.put_log_event(request, Some(&*expected_sequence_token))
                    .await
            }
            result => result,
        };
        // a recovered mismatch is not reported
        if let Err(e) = &result {
            self.report_error(Service::Logs, PUT_LOG_EVENTS, e);
        }
        result
    }

    /// Append one message, timestamped now, to a log stream.
    ///
    /// See [`try_publish_log_event`](Self::try_publish_log_event).
    pub async fn publish_log_event(
        &self,
        request: &PublishLogEventRequest,
    ) -> OperationResult<PutLogEventsOutput> {
        self.try_publish_log_event(request).await.into()
    }

    async fn put_log_event(
        &self,
        request: &PublishLogEventRequest,
        sequence_token: Option<&str>,
    ) -> Result<PutLogEventsOutput> {
        let input = PutLogEventsInput {
            log_group_name: &request.log_group_name,
            log_stream_name: &request.log_stream_name,
            log_events: [InputLogEvent {
                timestamp: self.now_millis(),
                message: &request.message,
            }],
            sequence_token,
        };
        let (output, _) = self
            .call_unreported(Service::Logs, PUT_LOG_EVENTS, &input)
            .await?;
        Ok(output)
    }

    /// Read the events of a stream within `[start_time, end_time)`.
    ///
    /// Only the first page is returned.
    pub async fn try_get_log_events(
        &self,
        request: &GetLogEventsRequest,
    ) -> Result<Vec<OutputLogEvent>> {
        let input = GetLogEventsInput {
            log_group_name: &request.log_group_name,
            log_stream_name: &request.log_stream_name,
            start_time: request.start_time,
            end_time: request.end_time,
            limit: request.limit,
            start_from_head: request.start_from_head,
        };
        let (output, _): (GetLogEventsOutput, _) =
            self.call(Service::Logs, "GetLogEvents", &input).await?;
        Ok(output.events)
    }

    /// Read the events of a stream within `[start_time, end_time)`.
    ///
    /// See [`try_get_log_events`](Self::try_get_log_events).
    pub async fn get_log_events(
        &self,
        request: &GetLogEventsRequest,
    ) -> OperationResult<Vec<OutputLogEvent>> {
        self.try_get_log_events(request).await.into()
    }

    /// Delete a log group and all of its streams.
    pub async fn try_delete_log_group(&self, log_group_name: &str) -> Result<ResponseMetadata> {
        let input = DeleteLogGroupInput { log_group_name };
        let (Empty {}, metadata) = self.call(Service::Logs, "DeleteLogGroup", &input).await?;
        Ok(metadata)
    }

    /// Delete a log group and all of its streams.
    ///
    /// See [`try_delete_log_group`](Self::try_delete_log_group).
    pub async fn delete_log_group(&self, log_group_name: &str) -> OperationResult<ResponseMetadata> {
        self.try_delete_log_group(log_group_name).await.into()
    }
}

/// Filters are passed through unmodified, but an empty one is left out of the request entirely.
pub(crate) fn non_empty(filter: &str) -> Option<&str> {
    (!filter.is_empty()).then_some(filter)
}
