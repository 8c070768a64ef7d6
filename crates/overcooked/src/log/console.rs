//! Console logging backend.

use std::collections::BTreeMap;

use super::MetricLogger;

/// Logger that prints metrics via tracing.
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            prefix: "Episode".to_string(),
        }
    }

    /// Label printed in front of the step number, e.g. "Eval"
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// One line summarizing `metrics`, keys in sorted order
    pub fn format_line(&self, metrics: &BTreeMap<String, f64>, step: u64) -> String {
        let body: Vec<String> = metrics
            .iter()
            .map(|(k, v)| format!("{}={:.4}", k, v))
            .collect();
        format!("{} {}: {}", self.prefix, step, body.join(", "))
    }
}

impl MetricLogger for ConsoleLogger {
    fn log_scalar(&self, name: &str, value: f64, step: u64) {
        tracing::info!("{} {}: {} = {:.4}", self.prefix, step, name, value);
    }

    fn log_metrics(&self, metrics: &BTreeMap<String, f64>, step: u64) {
        tracing::info!("{}", self.format_line(metrics, step));
    }
}
