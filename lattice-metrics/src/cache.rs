//! Cache instrumentation: hit/miss counters and latency histograms by tag.
//!
//! Operations carry an optional classification tag. A tag selects the label
//! the sample is recorded under; no tag means the sample is skipped entirely,
//! it is never recorded as an "untagged" series. The disabled case is a
//! separate [`CacheMetrics`] implementation ([`NoopCacheMetrics`]) so callers
//! stay branch-free with respect to instrumentation state.

use once_cell::sync::Lazy;
use prometheus::{CounterVec, HistogramTimer, HistogramVec, Registry};
use std::sync::Arc;

use crate::registry::{register_counter_vec, register_histogram_vec};

/// Collaborator interface recorded against by cache backends.
///
/// Implementations must never fail: recording problems are swallowed (or
/// logged) inside the collaborator and cannot surface as cache errors.
pub trait CacheMetrics: Send + Sync {
    /// Record a cache hit for `tag`.
    fn count_hit(&self, tag: Option<&str>);

    /// Record a cache miss for `tag`.
    fn count_miss(&self, tag: Option<&str>);

    /// Start timing a read operation.
    fn start_get_timer(&self, tag: Option<&str>) -> LatencyTimer;

    /// Start timing a write operation.
    fn start_set_timer(&self, tag: Option<&str>) -> LatencyTimer;
}

/// A running latency measurement.
///
/// [`stop`](Self::stop) records the elapsed time; dropping a running timer
/// records it as well. Timers handed out for an absent tag are inert.
pub enum LatencyTimer {
    /// Measurement backed by a histogram.
    Running(HistogramTimer),
    /// No measurement is taken.
    Disabled,
}

impl LatencyTimer {
    /// Stop the timer and record the elapsed time.
    pub fn stop(self) {
        if let LatencyTimer::Running(timer) = self {
            timer.observe_duration();
        }
    }
}

/// Prometheus-backed cache metrics.
pub struct PrometheusCacheMetrics {
    hits: CounterVec,
    misses: CounterVec,
    get_latency: HistogramVec,
    set_latency: HistogramVec,
}

impl PrometheusCacheMetrics {
    /// Create and register the cache metric families with `registry`.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        Ok(Self {
            hits: register_counter_vec(registry, "cache_hits_total", "Cache hits", &["tag"])?,
            misses: register_counter_vec(registry, "cache_misses_total", "Cache misses", &["tag"])?,
            get_latency: register_histogram_vec(
                registry,
                "cache_get_duration_seconds",
                "Cache read latency",
                &["tag"],
            )?,
            set_latency: register_histogram_vec(
                registry,
                "cache_set_duration_seconds",
                "Cache write latency",
                &["tag"],
            )?,
        })
    }
}

impl CacheMetrics for PrometheusCacheMetrics {
    fn count_hit(&self, tag: Option<&str>) {
        if let Some(tag) = tag {
            self.hits.with_label_values(&[tag]).inc();
        }
    }

    fn count_miss(&self, tag: Option<&str>) {
        if let Some(tag) = tag {
            self.misses.with_label_values(&[tag]).inc();
        }
    }

    fn start_get_timer(&self, tag: Option<&str>) -> LatencyTimer {
        match tag {
            Some(tag) => {
                LatencyTimer::Running(self.get_latency.with_label_values(&[tag]).start_timer())
            }
            None => LatencyTimer::Disabled,
        }
    }

    fn start_set_timer(&self, tag: Option<&str>) -> LatencyTimer {
        match tag {
            Some(tag) => {
                LatencyTimer::Running(self.set_latency.with_label_values(&[tag]).start_timer())
            }
            None => LatencyTimer::Disabled,
        }
    }
}

/// Cache metrics that record nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheMetrics;

impl CacheMetrics for NoopCacheMetrics {
    fn count_hit(&self, _tag: Option<&str>) {}

    fn count_miss(&self, _tag: Option<&str>) {}

    fn start_get_timer(&self, _tag: Option<&str>) -> LatencyTimer {
        LatencyTimer::Disabled
    }

    fn start_set_timer(&self, _tag: Option<&str>) -> LatencyTimer {
        LatencyTimer::Disabled
    }
}

static CACHE_METRICS: Lazy<Arc<dyn CacheMetrics>> = Lazy::new(|| {
    match PrometheusCacheMetrics::new(crate::default_registry()) {
        Ok(metrics) => Arc::new(metrics),
        Err(e) => {
            tracing::warn!(error = %e, "cache metrics registration failed, recording disabled");
            Arc::new(NoopCacheMetrics)
        }
    }
});

/// Process-wide cache metrics, registered with the default registry.
pub fn cache_metrics() -> Arc<dyn CacheMetrics> {
    CACHE_METRICS.clone()
}
