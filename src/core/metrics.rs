//! Render metrics collection
//!
//! Block services declare the metrics they emit; the renderer records timing
//! and result counters per render. The collector is thread-safe and keeps raw
//! samples, aggregating on demand.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Declares a metric a service or the renderer emits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Unique identifier for the metric
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Type of metric
    pub metric_type: MetricType,
    /// Unit of measurement (e.g. "ms", "items")
    pub unit: String,
    /// What this metric measures
    pub description: String,
}

/// Type of metric being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricType {
    /// Monotonically increasing counter
    Counter,
    /// Point-in-time value
    Gauge,
    /// Duration measurement
    Timing,
}

/// Aggregation over collected samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    /// Sum of all samples
    Sum,
    /// Mean of all samples
    Avg,
    /// Smallest sample
    Min,
    /// Largest sample
    Max,
    /// 95th percentile (interpolated)
    P95,
}

/// Thread-safe metrics collector
///
/// # Example
/// ```
/// use block_render::core::metrics::{Aggregation, MetricsCollector};
///
/// let collector = MetricsCollector::new();
/// collector.record("render_time_ms", 12.0);
/// collector.record("render_time_ms", 18.0);
/// assert_eq!(collector.aggregate("render_time_ms", Aggregation::Avg), Some(15.0));
/// ```
pub struct MetricsCollector {
    samples: Arc<Mutex<HashMap<String, Vec<f64>>>>,
}

impl MetricsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self {
            samples: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record a sample for a metric
    pub fn record(&self, metric_id: &str, value: f64) {
        let mut samples = self.samples.lock().unwrap();
        samples
            .entry(metric_id.to_string())
            .or_insert_with(Vec::new)
            .push(value);
    }

    /// Increment a counter metric by 1
    pub fn increment(&self, metric_id: &str) {
        self.record(metric_id, 1.0);
    }

    /// All recorded samples for a metric
    pub fn values(&self, metric_id: &str) -> Vec<f64> {
        let samples = self.samples.lock().unwrap();
        samples.get(metric_id).cloned().unwrap_or_default()
    }

    /// Number of samples recorded for a metric
    pub fn count(&self, metric_id: &str) -> usize {
        let samples = self.samples.lock().unwrap();
        samples.get(metric_id).map(|v| v.len()).unwrap_or(0)
    }

    /// Aggregate a metric's samples; `None` when nothing was recorded
    pub fn aggregate(&self, metric_id: &str, aggregation: Aggregation) -> Option<f64> {
        let values = self.values(metric_id);
        if values.is_empty() {
            return None;
        }

        match aggregation {
            Aggregation::Sum => Some(values.iter().sum()),
            Aggregation::Avg => Some(values.iter().sum::<f64>() / values.len() as f64),
            Aggregation::Min => values
                .iter()
                .cloned()
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)),
            Aggregation::Max => values
                .iter()
                .cloned()
                .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)),
            Aggregation::P95 => percentile(&values, 0.95),
        }
    }

    /// Drop all recorded samples
    pub fn clear(&self) {
        self.samples.lock().unwrap().clear();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        let samples = self.samples.lock().unwrap();
        Self {
            samples: Arc::new(Mutex::new(samples.clone())),
        }
    }
}

/// Linear-interpolation percentile over unsorted samples
fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = (sorted.len() as f64 - 1.0) * p;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;

    if lo == hi {
        sorted.get(lo).copied()
    } else {
        let frac = idx - lo as f64;
        Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
    }
}
