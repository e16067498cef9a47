use std::fmt;
use std::io::{self, Stderr, Stdout, Write};

use crate::output::{
    fail_output, write_error, write_progress, ProgressThrottle, Reporter, DISPLAY_PERCENTILES,
    MICROS_PER_MILLI,
};
use crate::report::{LatencyResult, ProgressReport, ThroughputResult};

const COMPLETED_BANNER: &str = "== Benchmark Completed! ==";

/// Renders progress and results as human readable text.
///
/// Results go to the primary stream, progress and errors to the
/// diagnostic stream. Every result block is composed in memory and
/// written with a single call, keeping it in one piece on a terminal
/// shared with diagnostic lines.
pub struct InteractiveReporter<O, E> {
    out: O,
    err: E,
    throttle: ProgressThrottle,
}

impl InteractiveReporter<Stdout, Stderr> {
    /// Creates a reporter bound to the process standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O, E> InteractiveReporter<O, E>
where
    O: Write,
    E: Write,
{
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            throttle: ProgressThrottle::default(),
        }
    }

    fn write_result(&mut self, block: String) -> io::Result<()> {
        self.out.write_all(block.as_bytes())?;
        self.out.flush()
    }
}

impl<O, E> Reporter for InteractiveReporter<O, E>
where
    O: Write,
    E: Write,
{
    fn report_progress(&mut self, report: ProgressReport) {
        write_progress(&mut self.throttle, &mut self.err, report);
    }

    fn report_throughput(&mut self, result: &ThroughputResult) {
        let mut block = String::new();
        block.push_str(COMPLETED_BANNER);
        block.push('\n');
        block.push_str(&format!("Scenario: {}\n", result.scenario));
        block.push_str(&format!(
            "Rate: {:.3} transactions per second\n",
            result.total_rate_per_second
        ));

        if let Err(error) = self.write_result(block) {
            fail_output(error);
        }
    }

    fn report_latency(&mut self, result: &LatencyResult) {
        let histogram = &result.total_histogram;

        let mut block = String::new();
        block.push_str(COMPLETED_BANNER);
        block.push('\n');
        block.push_str(&format!("Scenario: {}\n", result.scenario));
        block.push_str(&format!("Total Transactions: {}\n", histogram.len()));
        block.push('\n');
        block.push_str("Latency summary:\n");
        block.push_str(&format!(
            "  Min:    {:.3}ms\n",
            histogram.min() as f64 / MICROS_PER_MILLI
        ));
        block.push_str(&format!(
            "  Mean:   {:.3}ms\n",
            histogram.mean() / MICROS_PER_MILLI
        ));
        block.push_str(&format!(
            "  Max:    {:.3}ms\n",
            histogram.max() as f64 / MICROS_PER_MILLI
        ));
        block.push_str(&format!(
            "  Stddev: {:.3}ms\n",
            histogram.stdev() / MICROS_PER_MILLI
        ));
        block.push('\n');
        block.push_str("Latency distribution:\n");

        for percentile in DISPLAY_PERCENTILES {
            let value = histogram.value_at_percentile(percentile) as f64 / MICROS_PER_MILLI;
            block.push_str(&format!("  P{percentile:.3}: {value:.3}ms\n"));
        }

        if let Err(error) = self.write_result(block) {
            fail_output(error);
        }
    }

    fn report_error(&mut self, message: fmt::Arguments<'_>) {
        write_error(&mut self.err, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Histogram;

    /// Samples below 2048 microseconds keep three significant figure
    /// buckets one unit wide, so every statistic below is exact.
    fn sample_histogram() -> Histogram<u64> {
        let mut histogram = Histogram::new(3).unwrap();

        for value in [500, 1000, 1500, 2000] {
            histogram.record(value).unwrap();
        }

        histogram
    }

    #[test]
    fn writes_progress_to_the_diagnostic_stream() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        reporter.report_progress(ProgressReport::new("load", "init", 0.0));

        assert_eq!(String::from_utf8(err).unwrap(), "[load][init] 0.00%\n");
        assert!(out.is_empty());
    }

    #[test]
    fn suppresses_progress_repeating_the_previous_step() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        reporter.report_progress(ProgressReport::new("load", "init", 0.0));
        reporter.report_progress(ProgressReport::new("load", "init", 0.5));

        assert_eq!(String::from_utf8(err).unwrap(), "[load][init] 0.00%\n");
    }

    #[test]
    fn writes_progress_for_every_step_change() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        reporter.report_progress(ProgressReport::new("load", "init", 0.0));
        reporter.report_progress(ProgressReport::new("load", "schema", 0.2));
        reporter.report_progress(ProgressReport::new("run", "schema", 1.0));

        itertools::assert_equal(
            String::from_utf8(err).unwrap().lines(),
            [
                "[load][init] 0.00%",
                "[load][schema] 20.00%",
                "[run][schema] 100.00%",
            ],
        );
    }

    #[test]
    fn renders_throughput_summary_block() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        reporter.report_throughput(&ThroughputResult::new("tpcb-like", 1234.5));

        itertools::assert_equal(
            String::from_utf8(out).unwrap().lines(),
            [
                "== Benchmark Completed! ==",
                "Scenario: tpcb-like",
                "Rate: 1234.500 transactions per second",
            ],
        );
        assert!(err.is_empty());
    }

    #[test]
    fn renders_latency_summary_with_fixed_percentiles() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        reporter.report_latency(&LatencyResult::new("checkout", sample_histogram()));

        itertools::assert_equal(
            String::from_utf8(out).unwrap().lines(),
            [
                "== Benchmark Completed! ==",
                "Scenario: checkout",
                "Total Transactions: 4",
                "",
                "Latency summary:",
                "  Min:    0.500ms",
                "  Mean:   1.250ms",
                "  Max:    2.000ms",
                "  Stddev: 0.559ms",
                "",
                "Latency distribution:",
                "  P50.000: 1.000ms",
                "  P75.000: 1.500ms",
                "  P95.000: 2.000ms",
                "  P99.000: 2.000ms",
                "  P99.999: 2.000ms",
            ],
        );
        assert!(err.is_empty());
    }

    #[test]
    fn converts_microsecond_statistics_to_milliseconds() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        let mut histogram = Histogram::new(3).unwrap();
        histogram.record(1).unwrap();

        reporter.report_latency(&LatencyResult::new("single", histogram));

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("  Min:    0.001ms\n"), "{rendered}");
        assert!(err.is_empty());
    }

    #[test]
    fn writes_error_lines_to_the_diagnostic_stream() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut reporter = InteractiveReporter::new(&mut out, &mut err);

        reporter.report_error(format_args!("no such scenario: {}", "tpcc"));

        assert_eq!(String::from_utf8(err).unwrap(), "ERROR: no such scenario: tpcc\n");
        assert!(out.is_empty());
    }
}
