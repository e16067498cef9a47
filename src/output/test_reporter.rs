use std::fmt;

use crate::output::Reporter;
use crate::report::{LatencyResult, ProgressReport, ThroughputResult};

/// Reporter that records every call for later verification in tests.
///
/// Unlike the renderers it never throttles progress, so assertions see
/// the full call sequence a driver produced.
#[derive(Debug, Default)]
pub struct TestReporter {
    progress: Vec<ProgressReport>,
    throughput: Vec<ThroughputResult>,
    latency: Vec<LatencyResult>,
    errors: Vec<String>,
}

impl TestReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> &[ProgressReport] {
        &self.progress
    }

    pub fn throughput(&self) -> &[ThroughputResult] {
        &self.throughput
    }

    pub fn latency(&self) -> &[LatencyResult] {
        &self.latency
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl Reporter for TestReporter {
    fn report_progress(&mut self, report: ProgressReport) {
        self.progress.push(report);
    }

    fn report_throughput(&mut self, result: &ThroughputResult) {
        self.throughput.push(result.clone());
    }

    fn report_latency(&mut self, result: &LatencyResult) {
        self.latency.push(result.clone());
    }

    fn report_error(&mut self, message: fmt::Arguments<'_>) {
        self.errors.push(message.to_string());
    }
}
