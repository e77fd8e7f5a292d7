// Prometheus counters for admin request outcomes

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// `result` label for a completed invalidation; failures use `AdminError::kind`
pub const SUCCESS_RESULT: &str = "success";

/// Per-process metrics registry
///
/// `sw_admin_requests_total{result}` counts every admin-path request by the
/// kind it ended with (`success`, `not_found`, `transient_failure`, ...).
pub struct AdminMetrics {
    registry: Registry,
    requests: IntCounterVec,
}

impl AdminMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("sw_admin_requests_total", "Admin endpoint requests by result"),
            &["result"],
        )?;
        registry.register(Box::new(requests.clone()))?;
        Ok(Self { registry, requests })
    }

    pub fn record(&self, result: &str) {
        self.requests.with_label_values(&[result]).inc();
    }

    pub fn count(&self, result: &str) -> u64 {
        self.requests.with_label_values(&[result]).get()
    }

    /// Text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
