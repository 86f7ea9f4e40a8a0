use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Matching service usage counters
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    pub total_requests: AtomicU64,
    pub errors: AtomicU64,
    pub timeouts: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
        warn!("Matching service request timed out");
    }

    pub fn get_stats(&self) -> ServiceStats {
        ServiceStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Matching service metrics: requests={}, errors={}, timeouts={}",
            stats.total_requests, stats.errors, stats.timeouts
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    pub total_requests: u64,
    pub errors: u64,
    pub timeouts: u64,
}

/// Global metrics instance
static SERVICE_METRICS: std::sync::LazyLock<ServiceMetrics> =
    std::sync::LazyLock::new(ServiceMetrics::new);

pub fn service_metrics() -> &'static ServiceMetrics {
    &SERVICE_METRICS
}

/// Span wrapping one workflow transition
pub fn create_workflow_span(transition: &str, owner_id: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "workflow",
        transition = transition,
        owner.id = owner_id,
        correlation.id = correlation_id,
    )
}

/// Time an operation and log its duration
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = ServiceMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_error();
        metrics.record_timeout();

        assert_eq!(
            metrics.get_stats(),
            ServiceStats {
                total_requests: 2,
                errors: 1,
                timeouts: 1,
            }
        );
    }
}
