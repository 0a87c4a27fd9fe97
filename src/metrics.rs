//! Request metrics for the endpoint client
//!
//! Keeps a rolling window of request latencies plus lifetime counters
//! broken down by endpoint.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum number of samples to keep for latency percentiles
const MAX_SAMPLES: usize = 100;

/// Snapshot of the client's request metrics
#[derive(Debug, Clone)]
pub struct ClientMetrics {
    /// 50th percentile latency of successful requests in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency of successful requests in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Total number of requests (lifetime)
    pub total_requests: u64,
    /// Number of failed requests (lifetime)
    pub failed_requests: u64,
    /// Requests per endpoint path (lifetime)
    pub requests_by_endpoint: HashMap<String, u64>,
}

impl ClientMetrics {
    /// Creates metrics with no data
    pub fn empty() -> Self {
        Self {
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_requests: 0,
            failed_requests: 0,
            requests_by_endpoint: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct LatencySample {
    duration_ms: f64,
    success: bool,
}

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    failed: u64,
    by_endpoint: HashMap<String, u64>,
}

/// Collects request outcomes for one client
#[derive(Debug, Default)]
pub struct MetricsCollector {
    samples: RwLock<VecDeque<LatencySample>>,
    counters: RwLock<Counters>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request against `endpoint` with its duration and outcome
    pub async fn record_request(&self, endpoint: &str, duration: Duration, success: bool) {
        {
            let mut counters = self.counters.write().await;
            counters.total += 1;
            if !success {
                counters.failed += 1;
            }
            *counters
                .by_endpoint
                .entry(endpoint.to_string())
                .or_insert(0) += 1;
        }

        let mut samples = self.samples.write().await;
        if samples.len() >= MAX_SAMPLES {
            samples.pop_front();
        }
        samples.push_back(LatencySample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes current metrics from collected samples
    pub async fn get_metrics(&self) -> ClientMetrics {
        let samples = self.samples.read().await;
        let counters = self.counters.read().await;

        if counters.total == 0 {
            return ClientMetrics::empty();
        }

        let mut latencies: Vec<f64> = samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        ClientMetrics {
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate: (counters.total - counters.failed) as f64 / counters.total as f64,
            total_requests: counters.total,
            failed_requests: counters.failed,
            requests_by_endpoint: counters.by_endpoint.clone(),
        }
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_collector() {
        let collector = MetricsCollector::new();

        collector
            .record_request("/api/v1/drop/projects", Duration::from_millis(100), true)
            .await;
        collector
            .record_request("/api/v1/drop/projects", Duration::from_millis(200), true)
            .await;
        collector
            .record_request("/api/v1/bot/up-price-sales", Duration::from_millis(150), false)
            .await;

        let metrics = collector.get_metrics().await;

        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.failed_requests, 1);
        assert!(metrics.success_rate > 0.6 && metrics.success_rate < 0.7);
        assert_eq!(metrics.requests_by_endpoint["/api/v1/drop/projects"], 2);
        assert_eq!(metrics.latency_p99_ms, 200.0);
    }

    #[tokio::test]
    async fn test_empty_metrics() {
        let metrics = MetricsCollector::new().get_metrics().await;
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.success_rate, 1.0);
    }

    #[test]
    fn test_percentile() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&values, 50.0), 6.0);
        assert_eq!(percentile(&values, 99.0), 10.0);
    }
}
