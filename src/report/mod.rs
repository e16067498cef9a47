//! Data types produced by a load test run and consumed by output
//! renderers.

pub use hdrhistogram::Histogram;

/// A point-in-time snapshot of how far a named phase of the run has
/// progressed.
///
/// Each report supersedes the previous one for the same `section` and
/// `step` pair. `completeness` is a fraction between `0.0` and `1.0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressReport {
    pub section: String,
    pub step: String,
    pub completeness: f64,
}

impl ProgressReport {
    pub fn new(
        section: impl Into<String>,
        step: impl Into<String>,
        completeness: f64,
    ) -> Self {
        Self {
            section: section.into(),
            step: step.into(),
            completeness,
        }
    }

    /// Completeness on the `0.0..=100.0` display scale.
    pub fn percent(&self) -> f64 {
        self.completeness * 100.0
    }
}

/// Transaction throughput achieved by a completed scenario run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThroughputResult {
    pub scenario: String,
    pub total_rate_per_second: f64,
}

impl ThroughputResult {
    pub fn new(scenario: impl Into<String>, total_rate_per_second: f64) -> Self {
        Self {
            scenario: scenario.into(),
            total_rate_per_second,
        }
    }
}

/// Latency distribution recorded by a completed scenario run.
///
/// The histogram holds microsecond samples. Renderers read the sample
/// count, summary statistics and fixed percentiles from it and convert
/// values to milliseconds for display.
#[derive(Debug, Clone)]
pub struct LatencyResult {
    pub scenario: String,
    pub total_histogram: Histogram<u64>,
}

impl LatencyResult {
    pub fn new(scenario: impl Into<String>, total_histogram: Histogram<u64>) -> Self {
        Self {
            scenario: scenario.into(),
            total_histogram,
        }
    }
}
