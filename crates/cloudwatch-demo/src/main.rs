//! CloudWatch demo
//!
//! Walks through every `cloudwatch-utils` operation against a live account: creates a log
//! group and stream, publishes and reads back an event, deletes the group, then publishes and
//! lists a few metrics.
//!
//! # Usage
//!
//! ```bash
//! AWS_REGION=eu-west-1 AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... cloudwatch-demo
//! cloudwatch-demo --metric-count 3 --metric-interval 5
//! ```

#![deny(unsafe_code)]

use clap::Parser;
use cloudwatch_utils::{
    CloudWatchClient, CloudWatchClientBuilder, CreateLogGroupRequest, GetLogEventsRequest,
    PublishLogEventRequest, PutMetricDataRequest,
    logs::{DEFAULT_LOG_GROUP_NAME, DEFAULT_LOG_STREAM_NAME},
    metrics::DEFAULT_METRIC_NAMESPACE,
    time::start_of_day_millis,
};
use jiff::{Zoned, civil::date};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Events are read back from this window.
const EVENT_WINDOW: (jiff::civil::Date, jiff::civil::Date) = (date(2022, 1, 1), date(2022, 5, 20));
const EVENT_LIMIT: u32 = 200;

/// CloudWatch demo - exercise the CloudWatch Logs and metrics wrappers end to end
#[derive(Parser, Debug)]
#[command(name = "cloudwatch-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AWS region, overrides AWS_REGION / AWS_DEFAULT_REGION
    #[arg(short, long)]
    region: Option<String>,

    /// Log group to create, use and delete
    #[arg(long, default_value = DEFAULT_LOG_GROUP_NAME)]
    log_group: String,

    /// Log stream to create and publish to
    #[arg(long, default_value = DEFAULT_LOG_STREAM_NAME)]
    log_stream: String,

    /// Metric namespace to publish to and list
    #[arg(long, default_value = DEFAULT_METRIC_NAMESPACE)]
    namespace: String,

    /// Number of metric data points to publish
    #[arg(long, default_value_t = 10)]
    metric_count: u32,

    /// Seconds to wait after each metric publish
    #[arg(long, default_value_t = 20)]
    metric_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "starting demo");

    let mut builder = CloudWatchClientBuilder::from_env();
    if let Some(region) = &cli.region {
        builder = builder.region(region);
    }
    let client = builder.build()?;

    run_logs(&client, &cli).await;
    run_metrics(&client, &cli).await;
    Ok(())
}

async fn run_logs(client: &CloudWatchClient, cli: &Cli) {
    println!("Creating new log group...");
    let result = client
        .create_log_group(&CreateLogGroupRequest::new(&cli.log_group))
        .await;
    println!("New log group creation result: {}\n", result.operation_status);

    println!("List existing log groups...");
    let groups = client.list_log_groups(&cli.log_group).await;
    for group in &groups.resultset {
        println!("{group:?}");
    }
    println!();

    println!("Create new log stream...");
    let result = client
        .create_log_stream(&cli.log_stream, &cli.log_group)
        .await;
    println!("New log stream creation result: {}\n", result.operation_status);

    tokio::time::sleep(Duration::from_secs(1)).await;
    println!("List existing log streams...");
    let streams = client
        .list_log_streams(&cli.log_stream, &cli.log_group)
        .await;
    let mut sequence_token = None;
    for stream in &streams.resultset {
        println!("{stream:?}");
        if let Some(token) = &stream.upload_sequence_token {
            println!("Next sequence token for this stream is {token}");
            sequence_token = Some(token.clone());
        }
    }
    println!();

    println!("Publish custom log...");
    let message = format!("{} - Published From Rust !", Zoned::now().datetime());
    let mut request = PublishLogEventRequest::new(&cli.log_stream, &cli.log_group, message);
    request.sequence_token = sequence_token;
    let result = client.publish_log_event(&request).await;
    println!("Publish custom log result: {}\n", result.operation_status);

    tokio::time::sleep(Duration::from_secs(1)).await;
    println!("Getting log events...");
    let request = GetLogEventsRequest::new(&cli.log_stream, &cli.log_group)
        .with_window(
            start_of_day_millis(EVENT_WINDOW.0),
            start_of_day_millis(EVENT_WINDOW.1),
        )
        .with_limit(EVENT_LIMIT);
    let events = client.get_log_events(&request).await;
    for event in &events.resultset {
        println!("{event:?}");
    }
    println!();

    println!("Deleting log group...");
    let result = client.delete_log_group(&cli.log_group).await;
    println!("Deleting operation result: {}\n", result.operation_status);
}

async fn run_metrics(client: &CloudWatchClient, cli: &Cli) {
    println!("Creating new metrics...");
    for _ in 0..cli.metric_count {
        let request = PutMetricDataRequest {
            namespace: cli.namespace.clone(),
            ..PutMetricDataRequest::default()
        };
        let result = client.publish_metric(&request).await;
        println!("Metric creation result: {}\n", result.operation_status);
        tokio::time::sleep(Duration::from_secs(cli.metric_interval)).await;
    }

    println!("List existing metrics...");
    let metrics = client.list_metrics(&cli.namespace).await;
    for metric in &metrics.resultset {
        println!("{metric:?}");
    }
    println!();
}
