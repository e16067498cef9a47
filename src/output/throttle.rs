use std::time::{Duration, Instant};

use tracing::trace;

use crate::report::ProgressReport;

/// Minimum time between two written reports of the same section and step.
const REPEAT_INTERVAL: Duration = Duration::from_secs(10);

/// Rate limiter for progress output.
///
/// Keeps the report written last together with its emission time and
/// suppresses repeats of the same section and step until the repeat
/// interval has passed. A report that moves to a different section or
/// step is always admitted.
#[derive(Debug, Default)]
pub struct ProgressThrottle {
    last: Option<(ProgressReport, Instant)>,
}

impl ProgressThrottle {
    /// Decides whether `report` should be written at time `now`.
    ///
    /// Admitted reports replace the stored report and emission time as
    /// one pair. The first report is always admitted, including one with
    /// empty section and step names.
    pub fn admit(&mut self, report: &ProgressReport, now: Instant) -> bool {
        if let Some((last, emitted_at)) = &self.last {
            if last.section == report.section
                && last.step == report.step
                && now.saturating_duration_since(*emitted_at) < REPEAT_INTERVAL
            {
                trace!(
                    section = %report.section,
                    step = %report.step,
                    "Suppressed repeated progress report"
                );
                return false;
            }
        }

        self.last = Some((report.clone(), now));
        true
    }
}
