use std::fmt;
use std::io::{self, Stderr, Stdout, Write};

use crate::output::{
    fail_output, write_error, write_progress, ProgressThrottle, Reporter, DISPLAY_PERCENTILES,
    MICROS_PER_MILLI,
};
use crate::report::{LatencyResult, ProgressReport, ThroughputResult};

const THROUGHPUT_COLUMNS: &str = "scenario,transactions_per_second";

const LATENCY_COLUMNS: [&str; 10] = [
    "scenario",
    "samples",
    "min_ms",
    "mean_ms",
    "max_ms",
    "stdev",
    "p50_ms",
    "p75_ms",
    "p99_ms",
    "p99999_ms",
];

/// Renders results as CSV on the primary stream.
///
/// Progress and errors use the same line format as the interactive
/// renderer but stay on the diagnostic stream, so the primary stream
/// carries nothing but parseable data. Each result is one header line
/// plus one data row, written together as a single block.
///
/// The latency row keeps the field layout consumers of this format
/// already parse: the quoted scenario name and the sample count share
/// the first field without a separator, and the header has no `p95_ms`
/// column, which shifts the statistics from `min_ms` through `p75_ms`
/// one column label early.
pub struct CsvReporter<O, E> {
    out: O,
    err: E,
    throttle: ProgressThrottle,
}

impl CsvReporter<Stdout, Stderr> {
    /// Creates a reporter bound to the process standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O, E> CsvReporter<O, E>
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

    fn latency_block(result: &LatencyResult) -> String {
        let histogram = &result.total_histogram;

        let summary = [
            histogram.len() as f64,
            histogram.min() as f64 / MICROS_PER_MILLI,
            histogram.mean() / MICROS_PER_MILLI,
            histogram.max() as f64 / MICROS_PER_MILLI,
            histogram.stdev() / MICROS_PER_MILLI,
        ];
        let percentiles = DISPLAY_PERCENTILES
            .map(|percentile| histogram.value_at_percentile(percentile) as f64 / MICROS_PER_MILLI);

        let mut block = LATENCY_COLUMNS.join(",");
        block.push('\n');
        block.push_str(&format!("\"{}\"", result.scenario));

        // No separator before the first cell: it fuses with the quoted
        // scenario name, and downstream parsers rely on the resulting
        // field positions.
        for (index, cell) in summary.iter().chain(percentiles.iter()).enumerate() {
            if index > 0 {
                block.push(',');
            }
            block.push_str(&format!("{cell:.3}"));
        }
        block.push('\n');

        block
    }
}

impl<O, E> Reporter for CsvReporter<O, E>
where
    O: Write,
    E: Write,
{
    fn report_progress(&mut self, report: ProgressReport) {
        write_progress(&mut self.throttle, &mut self.err, report);
    }

    fn report_throughput(&mut self, result: &ThroughputResult) {
        let block = format!(
            "{THROUGHPUT_COLUMNS}\n\"{}\",{:.3}\n",
            result.scenario, result.total_rate_per_second
        );

        if let Err(error) = self.write_result(block) {
            fail_output(error);
        }
    }

    fn report_latency(&mut self, result: &LatencyResult) {
        let block = Self::latency_block(result);

        if let Err(error) = self.write_result(block) {
            fail_output(error);
        }
    }

    fn report_error(&mut self, message: fmt::Arguments<'_>) {
        write_error(&mut self.err, message);
    }
}
