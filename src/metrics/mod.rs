use crate::logging::{LogEvent, LogFields, LogLevel};
use serde::Serialize;
use serde_json::json;

/// Counters collected while the two-tier search walks its parameter space.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchMetrics {
    margins: u64,
    inner_attempts: u64,
    inner_failures: u64,
    outer_attempts: u64,
    outer_failures: u64,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_margin(&mut self) {
        self.margins = self.margins.saturating_add(1);
    }

    pub fn record_inner(&mut self, ok: bool) {
        self.inner_attempts = self.inner_attempts.saturating_add(1);
        if !ok {
            self.inner_failures = self.inner_failures.saturating_add(1);
        }
    }

    pub fn record_outer(&mut self, ok: bool) {
        self.outer_attempts = self.outer_attempts.saturating_add(1);
        if !ok {
            self.outer_failures = self.outer_failures.saturating_add(1);
        }
    }

    /// Engine invocations across both rings.
    pub fn attempts(&self) -> u64 {
        self.inner_attempts + self.outer_attempts
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            margins: self.margins,
            attempts: self.attempts(),
            inner_attempts: self.inner_attempts,
            inner_failures: self.inner_failures,
            outer_attempts: self.outer_attempts,
            outer_failures: self.outer_failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSnapshot {
    pub margins: u64,
    pub attempts: u64,
    pub inner_attempts: u64,
    pub inner_failures: u64,
    pub outer_attempts: u64,
    pub outer_failures: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Debug, target, "search_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("margins".to_string(), json!(self.margins));
        map.insert("attempts".to_string(), json!(self.attempts));
        map.insert("inner_attempts".to_string(), json!(self.inner_attempts));
        map.insert("inner_failures".to_string(), json!(self.inner_failures));
        map.insert("outer_attempts".to_string(), json!(self.outer_attempts));
        map.insert("outer_failures".to_string(), json!(self.outer_failures));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_count_toward_attempts() {
        let mut metrics = SearchMetrics::new();
        metrics.record_margin();
        metrics.record_inner(false);
        metrics.record_inner(true);
        metrics.record_outer(false);

        let snap = metrics.snapshot();
        assert_eq!(snap.inner_attempts, 2);
        assert_eq!(snap.inner_failures, 1);
        assert_eq!(snap.outer_failures, 1);
        assert_eq!(metrics.attempts(), 3);
        assert_eq!(snap.attempts, 3);
    }

    #[test]
    fn snapshot_becomes_log_event() {
        let mut metrics = SearchMetrics::new();
        metrics.record_margin();

        let event = metrics.snapshot().to_log_event("orbit::search");
        assert_eq!(event.message, "search_metrics");
        assert_eq!(event.field("margins"), Some(&json!(1)));
    }
}
