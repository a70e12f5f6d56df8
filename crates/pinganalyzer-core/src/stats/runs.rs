//! Run-length extrema over probe outcomes

use crate::parser::sequence::ProbeRecord;
use serde::{Deserialize, Serialize};

/// Which outcome a statistic is counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    Lost,
}

impl Outcome {
    /// Whether `record` has this outcome
    pub fn matches(self, record: &ProbeRecord) -> bool {
        match self {
            Outcome::Delivered => !record.lost,
            Outcome::Lost => record.lost,
        }
    }
}

/// When a finished run is committed to the running maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunBoundary {
    /// Only when the opposite outcome interrupts the run; a run reaching the
    /// end of the sequence is dropped
    #[default]
    AtTransition,
    /// Also commit the run still open at the end of the sequence
    FlushTrailing,
}

/// Length of the longest run of `outcome` records
///
/// # Example
/// ```
/// use pinganalyzer_core::parser::sequence::ProbeRecord;
/// use pinganalyzer_core::stats::runs::{longest_run, Outcome, RunBoundary};
///
/// let records: Vec<ProbeRecord> = (1..=3).map(ProbeRecord::lost).collect();
/// assert_eq!(longest_run(&records, Outcome::Lost, RunBoundary::AtTransition), 0);
/// assert_eq!(longest_run(&records, Outcome::Lost, RunBoundary::FlushTrailing), 3);
/// ```
pub fn longest_run(records: &[ProbeRecord], outcome: Outcome, boundary: RunBoundary) -> usize {
    let mut longest = 0;
    let mut current = 0;

    for record in records {
        if outcome.matches(record) {
            current += 1;
        } else {
            longest = longest.max(current);
            current = 0;
        }
    }

    match boundary {
        RunBoundary::AtTransition => longest,
        RunBoundary::FlushTrailing => longest.max(current),
    }
}
