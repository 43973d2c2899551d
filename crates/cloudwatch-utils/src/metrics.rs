//! CloudWatch metrics operations.
use crate::{
    ClientError, CloudWatchClient, OperationResult,
    client::Service,
    logs::non_empty,
    proto::{
        Dimension, Empty, ListMetricsInput, ListMetricsOutput, Metric, MetricDatum,
        PutMetricDataInput, ResponseMetadata, StandardUnit,
    },
};

/// Namespace used when none is given.
pub const DEFAULT_METRIC_NAMESPACE: &str = "test_metrics";
/// Name of the default sample metric.
pub const DEFAULT_METRIC_NAME: &str = "cpu_load_test_metric";

/// Parameters of [`CloudWatchClient::publish_metric`].
#[derive(Debug, Clone, PartialEq)]
pub struct PutMetricDataRequest {
    /// Namespace the data points belong to.
    pub namespace: String,
    /// Data points to publish.
    pub metric_data: Vec<MetricDatum>,
}

/// A sample data point: [`DEFAULT_METRIC_NAME`] tagged `test_probe=Ubuntu22.04`, valued with a
/// fresh random integer in `1..=99`, counted.
pub fn sample_metric_datum() -> MetricDatum {
    MetricDatum {
        metric_name: DEFAULT_METRIC_NAME.to_string(),
        dimensions: vec![Dimension {
            name: "test_probe".to_string(),
            value: "Ubuntu22.04".to_string(),
        }],
        value: f64::from(rand::random_range(1..=99_u32)),
        unit: StandardUnit::Count,
    }
}

impl Default for PutMetricDataRequest {
    /// One [`sample_metric_datum`] in [`DEFAULT_METRIC_NAMESPACE`], drawn anew on every call.
    fn default() -> Self {
        Self::new(DEFAULT_METRIC_NAMESPACE, vec![sample_metric_datum()])
    }
}

impl PutMetricDataRequest {
    /// A request publishing `metric_data` into `namespace`.
    pub fn new(namespace: impl Into<String>, metric_data: Vec<MetricDatum>) -> Self {
        Self {
            namespace: namespace.into(),
            metric_data,
        }
    }
}

impl CloudWatchClient {
    /// Publish data points to a metric namespace.
    pub async fn try_publish_metric(
        &self,
        request: &PutMetricDataRequest,
    ) -> Result<ResponseMetadata, ClientError> {
        let input = PutMetricDataInput {
            namespace: &request.namespace,
            metric_data: &request.metric_data,
        };
        let (Empty {}, metadata) = self
            .call(Service::Monitoring, "PutMetricData", &input)
            .await?;
        Ok(metadata)
    }

    /// Publish data points to a metric namespace.
    ///
    /// See [`try_publish_metric`](Self::try_publish_metric).
    pub async fn publish_metric(
        &self,
        request: &PutMetricDataRequest,
    ) -> OperationResult<ResponseMetadata> {
        self.try_publish_metric(request).await.into()
    }

    /// List the metrics of a namespace, or of every namespace when `namespace` is empty.
    ///
    /// Only the first page is returned.
    pub async fn try_list_metrics(&self, namespace: &str) -> Result<Vec<Metric>, ClientError> {
        let input = ListMetricsInput {
            namespace: non_empty(namespace),
        };
        let (output, _): (ListMetricsOutput, _) = self
            .call(Service::Monitoring, "ListMetrics", &input)
            .await?;
        Ok(output.metrics)
    }

    /// List the metrics of a namespace, or of every namespace when `namespace` is empty.
    ///
    /// See [`try_list_metrics`](Self::try_list_metrics).
    pub async fn list_metrics(&self, namespace: &str) -> OperationResult<Vec<Metric>> {
        self.try_list_metrics(namespace).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, test_client};
    use serde_json::json;

    #[test]
    fn test_sample_datum_in_range() {
        for _ in 0..200 {
            let datum = sample_metric_datum();
            assert!((1.0..=99.0).contains(&datum.value));
            assert_eq!(datum.value.fract(), 0.0);
        }
    }

    #[test]
    fn test_defaults_are_fresh() {
        let mut first = PutMetricDataRequest::default();
        first.metric_data.push(sample_metric_datum());
        first.namespace.push_str("_changed");

        let second = PutMetricDataRequest::default();
        assert_eq!(second.namespace, DEFAULT_METRIC_NAMESPACE);
        assert_eq!(second.metric_data.len(), 1);
        assert_eq!(second.metric_data[0].metric_name, DEFAULT_METRIC_NAME);
    }

    #[tokio::test]
    async fn test_publish_metric() {
        let transport = MockTransport::new();
        transport.respond_raw(200, b"");
        let client = test_client(&transport);

        let request = PutMetricDataRequest::new(
            "orders",
            vec![MetricDatum {
                metric_name: "latency".to_string(),
                dimensions: vec![],
                value: 12.0,
                unit: StandardUnit::Milliseconds,
            }],
        );
        let result = client.publish_metric(&request).await;
        assert!(result.is_ok());
        assert_eq!(result.resultset.http_status_code, 200);
        assert_eq!(result.resultset.request_id.as_deref(), Some("mock-request-1"));

        let sent = transport.single_request();
        assert_eq!(sent.target(), "GraniteServiceVersion20100801.PutMetricData");
        assert_eq!(
            sent.body,
            json!({
                "Namespace": "orders",
                "MetricData": [{"MetricName": "latency", "Value": 12.0, "Unit": "Milliseconds"}]
            })
        );
    }

    #[tokio::test]
    async fn test_publish_default_metric() {
        let transport = MockTransport::new();
        transport.respond_raw(200, b"");
        let client = test_client(&transport);

        client
            .try_publish_metric(&PutMetricDataRequest::default())
            .await
            .unwrap();

        let body = transport.single_request().body;
        assert_eq!(body["Namespace"], "test_metrics");
        let datum = &body["MetricData"][0];
        assert_eq!(datum["MetricName"], "cpu_load_test_metric");
        assert_eq!(
            datum["Dimensions"],
            json!([{"Name": "test_probe", "Value": "Ubuntu22.04"}])
        );
        assert_eq!(datum["Unit"], "Count");
        let value = datum["Value"].as_f64().unwrap();
        assert!((1.0..=99.0).contains(&value));
    }

    #[tokio::test]
    async fn test_publish_metric_failure() {
        let transport = MockTransport::new();
        transport.respond(
            400,
            json!({"__type": "InvalidParameterValue", "message": "bad unit"}),
        );
        let client = test_client(&transport);

        let result = client
            .publish_metric(&PutMetricDataRequest::default())
            .await;
        assert!(!result.is_ok());
        assert_eq!(result.resultset, ResponseMetadata::default());
    }

    #[tokio::test]
    async fn test_list_metrics_failure() {
        let transport = MockTransport::new();
        transport.respond(
            400,
            json!({"__type": "InvalidParameterValue", "Message": "bad namespace"}),
        );
        let client = test_client(&transport);

        let result = client.list_metrics("test_metrics").await;
        assert!(!result.is_ok());
        assert!(result.resultset.is_empty());
    }

    #[tokio::test]
    async fn test_list_metrics() {
        let transport = MockTransport::new();
        transport.respond_ok(json!({
            "Metrics": [{
                "Namespace": "test_metrics",
                "MetricName": "cpu_load_test_metric",
                "Dimensions": [{"Name": "test_probe", "Value": "Ubuntu22.04"}]
            }]
        }));
        transport.respond_ok(json!({"Metrics": []}));
        let client = test_client(&transport);

        let metrics = client.list_metrics("test_metrics").await;
        assert_eq!(metrics.resultset.len(), 1);
        assert_eq!(
            metrics.resultset[0].metric_name.as_deref(),
            Some("cpu_load_test_metric")
        );
        assert_eq!(metrics.resultset[0].dimensions[0].value, "Ubuntu22.04");

        let all = client.list_metrics("").await;
        assert!(all.is_ok());
        assert!(all.resultset.is_empty());

        let requests = transport.requests();
        assert_eq!(requests[0].target(), "GraniteServiceVersion20100801.ListMetrics");
        assert_eq!(requests[0].body, json!({"Namespace": "test_metrics"}));
        assert_eq!(requests[1].body, json!({}));
    }
}
