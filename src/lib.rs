//! Progress and result reporting for command line load testing tools.
//!
//! A load test driver selects one [`Reporter`] at startup from a
//! configured output format name, feeds it progress updates while
//! scenarios run and hands it one throughput and/or latency result per
//! completed scenario.
//!
//! ```
//! use std::io;
//!
//! use readout::{CsvReporter, Reporter, ThroughputResult};
//!
//! let mut out = Vec::new();
//! let mut reporter = CsvReporter::new(&mut out, io::sink());
//! reporter.report_throughput(&ThroughputResult::new("tpcb-like", 1234.5));
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "scenario,transactions_per_second\n\"tpcb-like\",1234.500\n",
//! );
//! ```

mod output;
mod report;

pub use output::*;
pub use report::*;
