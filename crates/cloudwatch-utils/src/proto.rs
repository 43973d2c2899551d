//! Request and response shapes of the CloudWatch Logs (`Logs_20140328`, camelCase members) and
//! CloudWatch (`GraniteServiceVersion20100801`, PascalCase members) JSON protocols.
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A CloudWatch Logs log group, as returned by `DescribeLogGroups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct LogGroup {
    /// Name of the log group.
    pub log_group_name: String,
    /// Creation time, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub creation_time: Option<i64>,
    /// Retention in days, absent when events never expire.
    #[serde(default)]
    pub retention_in_days: Option<u32>,
    /// Number of metric filters attached to the group.
    #[serde(default)]
    pub metric_filter_count: Option<u32>,
    /// ARN of the resource.
    #[serde(default)]
    pub arn: Option<String>,
    /// Stored bytes (deprecated by the service, usually zero).
    #[serde(default)]
    pub stored_bytes: Option<u64>,
}

/// A log stream inside a log group, as returned by `DescribeLogStreams`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct LogStream {
    /// Name of the log stream.
    pub log_stream_name: String,
    /// Creation time, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub creation_time: Option<i64>,
    /// Timestamp of the earliest event, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub first_event_timestamp: Option<i64>,
    /// Timestamp of the latest event, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub last_event_timestamp: Option<i64>,
    /// Last ingestion time, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub last_ingestion_time: Option<i64>,
    /// Token to present on the next append to this stream.
    ///
    /// Absent on a stream that has never been written to.
    #[serde(default)]
    pub upload_sequence_token: Option<String>,
    /// ARN of the resource.
    #[serde(default)]
    pub arn: Option<String>,
    /// Stored bytes (deprecated by the service, usually zero).
    #[serde(default)]
    pub stored_bytes: Option<u64>,
}

/// A log event read back from a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct OutputLogEvent {
    /// Event time, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Event body.
    #[serde(default)]
    pub message: Option<String>,
    /// Time the service ingested the event, milliseconds since the UNIX epoch.
    #[serde(default)]
    pub ingestion_time: Option<i64>,
}

/// Response of `PutLogEvents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PutLogEventsOutput {
    /// Token to pass on the next append to the same stream.
    #[serde(default)]
    pub next_sequence_token: Option<String>,
    /// Present when some events were rejected.
    #[serde(default)]
    pub rejected_log_events_info: Option<RejectedLogEventsInfo>,
}

/// Indices of events the service refused to store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct RejectedLogEventsInfo {
    /// First rejected event that was too far in the future.
    #[serde(default)]
    pub too_new_log_event_start_index: Option<i32>,
    /// Last rejected event that was too old.
    #[serde(default)]
    pub too_old_log_event_end_index: Option<i32>,
    /// Last rejected event that was already past retention.
    #[serde(default)]
    pub expired_log_event_end_index: Option<i32>,
}

/// Envelope information for operations whose response body is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// Value of the `x-amzn-RequestId` response header.
    pub request_id: Option<String>,
    /// HTTP status of the response.
    pub http_status_code: u16,
}

/// A name/value pair qualifying a metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Dimension value.
    pub value: String,
}

/// One data point for `PutMetricData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDatum {
    /// Name of the metric.
    pub metric_name: String,
    /// Dimensions of the metric.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    /// Observed value.
    pub value: f64,
    /// Unit of `value`.
    #[serde(default)]
    pub unit: StandardUnit,
}

/// A metric known to CloudWatch, as returned by `ListMetrics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Metric {
    /// Namespace of the metric.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Name of the metric.
    #[serde(default)]
    pub metric_name: Option<String>,
    /// Dimensions of the metric.
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

/// Units accepted by
/// [CloudWatch](https://docs.aws.amazon.com/AmazonCloudWatch/latest/APIReference/API_MetricDatum.html).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StandardUnit {
    /// Seconds
    Seconds,
    /// Microseconds
    Microseconds,
    /// Milliseconds
    Milliseconds,
    /// Bytes
    Bytes,
    /// Kilobytes
    Kilobytes,
    /// Megabytes
    Megabytes,
    /// Gigabytes
    Gigabytes,
    /// Terabytes
    Terabytes,
    /// Bits
    Bits,
    /// Kilobits
    Kilobits,
    /// Megabits
    Megabits,
    /// Gigabits
    Gigabits,
    /// Terabits
    Terabits,
    /// Percent
    Percent,
    /// Count
    Count,
    /// Bytes/Second
    #[serde(rename = "Bytes/Second")]
    BytesPerSecond,
    /// Kilobytes/Second
    #[serde(rename = "Kilobytes/Second")]
    KilobytesPerSecond,
    /// Megabytes/Second
    #[serde(rename = "Megabytes/Second")]
    MegabytesPerSecond,
    /// Gigabytes/Second
    #[serde(rename = "Gigabytes/Second")]
    GigabytesPerSecond,
    /// Terabytes/Second
    #[serde(rename = "Terabytes/Second")]
    TerabytesPerSecond,
    /// Bits/Second
    #[serde(rename = "Bits/Second")]
    BitsPerSecond,
    /// Kilobits/Second
    #[serde(rename = "Kilobits/Second")]
    KilobitsPerSecond,
    /// Megabits/Second
    #[serde(rename = "Megabits/Second")]
    MegabitsPerSecond,
    /// Gigabits/Second
    #[serde(rename = "Gigabits/Second")]
    GigabitsPerSecond,
    /// Terabits/Second
    #[serde(rename = "Terabits/Second")]
    TerabitsPerSecond,
    /// Count/Second
    #[serde(rename = "Count/Second")]
    CountPerSecond,
    /// No unit
    #[default]
    None,
}

impl StandardUnit {
    /// The name CloudWatch uses for the unit.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Seconds => "Seconds",
            Self::Microseconds => "Microseconds",
            Self::Milliseconds => "Milliseconds",
            Self::Bytes => "Bytes",
            Self::Kilobytes => "Kilobytes",
            Self::Megabytes => "Megabytes",
            Self::Gigabytes => "Gigabytes",
            Self::Terabytes => "Terabytes",
            Self::Bits => "Bits",
            Self::Kilobits => "Kilobits",
            Self::Megabits => "Megabits",
            Self::Gigabits => "Gigabits",
            Self::Terabits => "Terabits",
            Self::Percent => "Percent",
            Self::Count => "Count",
            Self::BytesPerSecond => "Bytes/Second",
            Self::KilobytesPerSecond => "Kilobytes/Second",
            Self::MegabytesPerSecond => "Megabytes/Second",
            Self::GigabytesPerSecond => "Gigabytes/Second",
            Self::TerabytesPerSecond => "Terabytes/Second",
            Self::BitsPerSecond => "Bits/Second",
            Self::KilobitsPerSecond => "Kilobits/Second",
            Self::MegabitsPerSecond => "Megabits/Second",
            Self::GigabitsPerSecond => "Gigabits/Second",
            Self::TerabitsPerSecond => "Terabits/Second",
            Self::CountPerSecond => "Count/Second",
            Self::None => "None",
        }
    }
}

impl fmt::Display for StandardUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Wire inputs and outputs

/// Response body of operations that return nothing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Empty {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateLogGroupInput<'a> {
    pub log_group_name: &'a str,
    pub tags: BTreeMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PutRetentionPolicyInput<'a> {
    pub log_group_name: &'a str,
    pub retention_in_days: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeLogGroupsInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group_name_prefix: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeLogGroupsOutput {
    #[serde(default)]
    pub log_groups: Vec<LogGroup>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateLogStreamInput<'a> {
    pub log_group_name: &'a str,
    pub log_stream_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeLogStreamsInput<'a> {
    pub log_group_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream_name_prefix: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeLogStreamsOutput {
    #[serde(default)]
    pub log_streams: Vec<LogStream>,
}

#[derive(Serialize)]
pub(crate) struct InputLogEvent<'a> {
    pub timestamp: i64,
    pub message: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PutLogEventsInput<'a> {
    pub log_group_name: &'a str,
    pub log_stream_name: &'a str,
    pub log_events: [InputLogEvent<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_token: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetLogEventsInput<'a> {
    pub log_group_name: &'a str,
    pub log_stream_name: &'a str,
    pub start_time: i64,
    pub end_time: i64,
    pub limit: u32,
    pub start_from_head: bool,
}

#[derive(Deserialize)]
pub(crate) struct GetLogEventsOutput {
    #[serde(default)]
    pub events: Vec<OutputLogEvent>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteLogGroupInput<'a> {
    pub log_group_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PutMetricDataInput<'a> {
    pub namespace: &'a str,
    pub metric_data: &'a [MetricDatum],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListMetricsInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListMetricsOutput {
    #[serde(default)]
    pub metrics: Vec<Metric>,
}
