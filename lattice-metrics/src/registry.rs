//! Metric registration helpers

use prometheus::{CounterVec, HistogramVec, Registry};

/// Register a labeled counter with a registry
///
/// # Examples
///
/// ```
/// use lattice_metrics::*;
/// use prometheus::Registry;
///
/// let registry = Registry::new();
/// let counter = register_counter_vec(
///     &registry,
///     "requests_total",
///     "Total requests",
///     &["route"],
/// ).unwrap();
///
/// counter.with_label_values(&["/users"]).inc();
/// ```
pub fn register_counter_vec(
    registry: &Registry,
    name: &str,
    help: &str,
    label_names: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    let counter = CounterVec::new(prometheus::Opts::new(name, help), label_names)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

/// Register a labeled histogram with a registry
///
/// # Examples
///
/// ```
/// use lattice_metrics::*;
/// use prometheus::Registry;
///
/// let registry = Registry::new();
/// let histogram = register_histogram_vec(
///     &registry,
///     "request_duration_seconds",
///     "Request duration",
///     &["route"],
/// ).unwrap();
///
/// histogram.with_label_values(&["/users"]).observe(0.05);
/// ```
pub fn register_histogram_vec(
    registry: &Registry,
    name: &str,
    help: &str,
    label_names: &[&str],
) -> Result<HistogramVec, prometheus::Error> {
    let histogram = HistogramVec::new(prometheus::HistogramOpts::new(name, help), label_names)?;
    registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

/// Register a labeled histogram with custom buckets
pub fn register_histogram_vec_with_buckets(
    registry: &Registry,
    name: &str,
    help: &str,
    label_names: &[&str],
    buckets: Vec<f64>,
) -> Result<HistogramVec, prometheus::Error> {
    let opts = prometheus::HistogramOpts::new(name, help).buckets(buckets);
    let histogram = HistogramVec::new(opts, label_names)?;
    registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}
