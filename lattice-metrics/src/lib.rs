//! Prometheus metrics for the lattice service packages.
//!
//! # Features
//!
//! - **Prometheus Integration** - Native Prometheus metrics
//! - **Cache Instrumentation** - Hit/miss counters and latency histograms
//!   keyed by an opaque tag, with a no-op variant for disabled environments
//! - **Labels** - Support for metric labels
//!
//! # Quick Start
//!
//! ```no_run
//! use lattice_metrics::*;
//!
//! // Record a cache hit against the process-wide collector
//! let metrics = cache_metrics();
//! metrics.count_hit(Some("users"));
//!
//! // Export metrics
//! let metrics_text = export_metrics();
//! ```

pub mod cache;
pub mod registry;

pub use cache::*;
pub use prometheus;
pub use registry::*;

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Global default registry
static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Get the default metrics registry
///
/// # Examples
///
/// ```
/// use lattice_metrics::*;
///
/// let registry = default_registry();
/// ```
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Export all metrics as Prometheus text format
pub fn export_metrics() -> String {
    export_metrics_from_registry(&DEFAULT_REGISTRY)
}

/// Export metrics from a specific registry
///
/// # Examples
///
/// ```
/// use lattice_metrics::*;
/// use prometheus::Registry;
///
/// let registry = Registry::new();
/// let metrics = export_metrics_from_registry(&registry);
/// ```
pub fn export_metrics_from_registry(registry: &Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer)
        .unwrap_or_else(|_| String::from("# Error converting metrics to UTF-8\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry() as *const Registry;
        let b = default_registry() as *const Registry;
        assert_eq!(a, b);
    }

    #[test]
    fn test_export_empty_registry() {
        let registry = Registry::new();
        let text = export_metrics_from_registry(&registry);
        assert!(text.is_empty());
    }
}
