// Copyright 2026 The Courtside Authors
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics collection.
//!
//! Tracks inbound request counts per endpoint and upstream fetch health.

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};
use std::sync::Arc;

use crate::error::AppError;

#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,

    // Endpoint counters
    pub scoreboard_requests: IntCounter,
    pub boxscore_requests: IntCounter,

    // Upstream fetch metrics
    pub upstream_failures: IntCounter,
    pub upstream_latency: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, AppError> {
        let registry = Registry::new();

        let scoreboard_requests = IntCounter::with_opts(Opts::new(
            "courtside_scoreboard_requests_total",
            "Total number of scoreboard requests received",
        ))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create metric: {}", e)))?;

        let boxscore_requests = IntCounter::with_opts(Opts::new(
            "courtside_boxscore_requests_total",
            "Total number of boxscore requests received",
        ))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create metric: {}", e)))?;

        let upstream_failures = IntCounter::with_opts(Opts::new(
            "courtside_upstream_failures_total",
            "Total number of upstream fetches that resulted in an error",
        ))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create metric: {}", e)))?;

        let upstream_latency = Histogram::with_opts(
            HistogramOpts::new(
                "courtside_upstream_latency_seconds",
                "Duration of upstream fetches in seconds",
            )
            .buckets(vec![
                0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.0, 5.0,
            ]),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create metric: {}", e)))?;

        registry
            .register(Box::new(scoreboard_requests.clone()))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to register metric: {}", e)))?;
        registry
            .register(Box::new(boxscore_requests.clone()))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to register metric: {}", e)))?;
        registry
            .register(Box::new(upstream_failures.clone()))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to register metric: {}", e)))?;
        registry
            .register(Box::new(upstream_latency.clone()))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to register metric: {}", e)))?;

        Ok(Self {
            registry: Arc::new(registry),
            scoreboard_requests,
            boxscore_requests,
            upstream_failures,
            upstream_latency,
        })
    }

    /// Record an inbound scoreboard request
    pub fn record_scoreboard_request(&self) {
        self.scoreboard_requests.inc();
    }

    /// Record an inbound boxscore request
    pub fn record_boxscore_request(&self) {
        self.boxscore_requests.inc();
    }

    /// Record an upstream fetch failure
    pub fn record_upstream_failure(&self) {
        self.upstream_failures.inc();
    }

    /// Observe latency for an upstream fetch in seconds
    pub fn record_upstream_latency(&self, seconds: f64) {
        self.upstream_latency.observe(seconds);
    }

    /// Export metrics in Prometheus format
    pub fn export(&self) -> Result<String, AppError> {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode metrics: {}", e)))?;

        String::from_utf8(buffer).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to convert metrics to string: {}",
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_includes_registered_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_scoreboard_request();
        metrics.record_boxscore_request();
        metrics.record_upstream_failure();
        metrics.record_upstream_latency(0.042);

        let exported = metrics.export().unwrap();
        assert!(exported.contains("courtside_scoreboard_requests_total 1"));
        assert!(exported.contains("courtside_boxscore_requests_total 1"));
        assert!(exported.contains("courtside_upstream_failures_total 1"));
        assert!(exported.contains("courtside_upstream_latency_seconds"));
    }
}
