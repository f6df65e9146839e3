//! Prometheus request metrics
//!
//! Two instruments, both labelled by the percent-decoded request path:
//! - `image_service_requests_total{method, endpoint, status}`
//! - `image_service_request_latency_seconds{endpoint}`

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Request counter and latency histogram, registered in a private registry
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
}

impl HttpMetrics {
    /// Create the instruments and register them
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("image_service_requests_total", "Total requests to image-service"),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let latency = HistogramVec::new(
            HistogramOpts::new(
                "image_service_request_latency_seconds",
                "Request latency for image-service",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    /// Record one finished request. Never fails; label errors are dropped.
    pub fn record(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        if let Ok(histogram) = self.latency.get_metric_with_label_values(&[path]) {
            histogram.observe(elapsed.as_secs_f64());
        }

        let status = status.to_string();
        if let Ok(counter) = self
            .requests
            .get_metric_with_label_values(&[method, path, status.as_str()])
        {
            counter.inc();
        }
    }

    /// Encode everything gathered so far in the text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Content type of [`render`](Self::render) output
    pub const CONTENT_TYPE: &'static str = prometheus::TEXT_FORMAT;
}
