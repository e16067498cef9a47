//! Output renderers that turn load test progress and results into
//! human or machine readable form.

mod csv;
mod interactive;
mod throttle;

#[cfg(any(feature = "test_util", test))]
mod test_reporter;

use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::report::{LatencyResult, ProgressReport, ThroughputResult};

pub use csv::CsvReporter;
pub use interactive::InteractiveReporter;

#[cfg(any(feature = "test_util", test))]
pub use test_reporter::TestReporter;

pub(crate) use throttle::ProgressThrottle;

/// Microseconds per millisecond, the scale between stored histogram
/// samples and displayed latency values.
pub(crate) const MICROS_PER_MILLI: f64 = 1_000.0;

/// Percentiles every latency summary reports, in display order.
pub(crate) const DISPLAY_PERCENTILES: [f64; 5] = [50.0, 75.0, 95.0, 99.0, 99.999];

/// Sink for progress updates and final results of a load test run.
///
/// One reporter instance is selected at startup and receives every event
/// of the run from a single caller at a time. Results go to a primary
/// stream, progress and errors to a diagnostic stream, so machine
/// readable modes keep the primary stream parseable. A reporter that
/// fails to write aborts the run instead of losing output.
pub trait Reporter {
    /// Reports progress of a run phase.
    ///
    /// A report repeating the section and step of the previously written
    /// one is dropped unless ten seconds have passed since that write.
    /// Any change of section or step is written immediately.
    fn report_progress(&mut self, report: ProgressReport);

    /// Writes the throughput summary of a completed scenario.
    fn report_throughput(&mut self, result: &ThroughputResult);

    /// Writes the latency summary of a completed scenario, including its
    /// fixed percentile distribution.
    fn report_latency(&mut self, result: &LatencyResult);

    /// Writes one diagnostic error line.
    ///
    /// Callers pass [`format_args!`]:
    /// `reporter.report_error(format_args!("no such scenario: {name}"))`.
    fn report_error(&mut self, message: fmt::Arguments<'_>);
}

/// Output mode requested in run configuration.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Picks between the two concrete modes by probing the primary
    /// stream for an interactive terminal.
    #[default]
    Auto,
    /// Human readable text blocks.
    Interactive,
    /// Machine readable CSV on the primary stream.
    Csv,
}

/// Error for output format names outside the supported set.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown output format: {0}, supported formats are 'auto', 'interactive' and 'csv'")]
pub struct UnknownFormatError(String);

impl OutputFormat {
    /// Resolves `Auto` into a concrete mode.
    ///
    /// `Auto` becomes `Interactive` when the process standard output is
    /// an interactive terminal and `Csv` otherwise, so a run redirected
    /// into a file or pipe produces parseable output without extra
    /// flags. Concrete modes resolve to themselves.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if atty::is(atty::Stream::Stdout) => Self::Interactive,
            Self::Auto => Self::Csv,
            concrete => concrete,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "auto" => Ok(Self::Auto),
            "interactive" => Ok(Self::Interactive),
            "csv" => Ok(Self::Csv),
            unknown => Err(UnknownFormatError(unknown.into())),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Auto => "auto",
            Self::Interactive => "interactive",
            Self::Csv => "csv",
        })
    }
}

/// Creates the reporter for a configured output format name, bound to
/// the process standard streams.
///
/// Accepts `auto`, `interactive` and `csv`. Selection happens once at
/// startup and the returned reporter serves the whole run.
pub fn new_reporter(name: &str) -> Result<Box<dyn Reporter>, UnknownFormatError> {
    let format: OutputFormat = name.parse()?;
    let resolved = format.resolve();

    debug!(requested = %format, resolved = %resolved, "Selected output renderer");

    Ok(match resolved {
        OutputFormat::Csv => Box::new(CsvReporter::stdio()),
        _ => Box::new(InteractiveReporter::stdio()),
    })
}

/// Aborts the run after a failed stream write.
///
/// A result that cannot be written is lost, there is no retry or
/// recovery path for it.
pub(crate) fn fail_output(error: io::Error) -> ! {
    panic!("failed to write load test output: {error}")
}

/// Writes the throttled progress line shared by every renderer.
pub(crate) fn write_progress<E>(
    throttle: &mut ProgressThrottle,
    stream: &mut E,
    report: ProgressReport,
) where
    E: Write,
{
    if !throttle.admit(&report, Instant::now()) {
        return;
    }

    let line = format!(
        "[{}][{}] {:.2}%\n",
        report.section,
        report.step,
        report.percent()
    );

    if let Err(error) = stream.write_all(line.as_bytes()) {
        fail_output(error);
    }
}

/// Writes the diagnostic error line shared by every renderer.
pub(crate) fn write_error<E>(stream: &mut E, message: fmt::Arguments<'_>)
where
    E: Write,
{
    let line = format!("ERROR: {message}\n");

    if let Err(error) = stream.write_all(line.as_bytes()) {
        fail_output(error);
    }
}
