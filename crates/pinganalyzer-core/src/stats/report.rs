//! Summary rows for presenting analysis results
//!
//! Bundles the per-sequence statistics into serializable values consumed by
//! the command-line tables and JSON output.

use super::runs::{self, Outcome, RunBoundary};
use crate::parser::sequence::ProbeSequence;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;

/// `<host>-YYYY-MM-DD...` as written by the capture scripts
static CAPTURE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)-\d{4}-\d{2}-\d{2}").expect("capture name regex is valid")
});

/// Reliability summary for one log file
#[derive(Debug, Clone, Serialize)]
pub struct ProbeSummary {
    pub host: String,
    pub records: usize,
    pub delivered: usize,
    pub lost: usize,
    /// `null` in JSON when the log was empty
    pub delivery_rate: f64,
    pub longest_consecutive: usize,
    pub longest_lost_burst: usize,
    pub min_rtt_ms: f64,
    pub max_rtt_ms: f64,
    pub first_sequence: Option<u64>,
    pub last_sequence: Option<u64>,
    /// Seconds between the first and last observed reply
    pub time_span_secs: Option<f64>,
}

impl ProbeSummary {
    /// Summarise `sequence`, committing runs according to `boundary`
    pub fn new(host: impl Into<String>, sequence: &ProbeSequence, boundary: RunBoundary) -> Self {
        let records = sequence.records();
        Self {
            host: host.into(),
            records: sequence.len(),
            delivered: sequence.delivered_count(),
            lost: sequence.lost_count(),
            delivery_rate: sequence.delivery_rate(),
            longest_consecutive: runs::longest_run(records, Outcome::Delivered, boundary),
            longest_lost_burst: runs::longest_run(records, Outcome::Lost, boundary),
            min_rtt_ms: sequence.min_rtt(),
            max_rtt_ms: sequence.max_rtt(),
            first_sequence: sequence.first_sequence(),
            last_sequence: sequence.last_sequence(),
            time_span_secs: sequence
                .time_span()
                .map(|d| d.num_microseconds().unwrap_or(i64::MAX) as f64 / 1e6),
        }
    }
}

/// Reply and loss autocorrelation at one lag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutocorrelationRow {
    pub lag: i64,
    pub replied: f64,
    pub lost: f64,
}

/// Autocorrelation rows for every lag in `-max_lag..=max_lag`
pub fn autocorrelation_table(sequence: &ProbeSequence, max_lag: u32) -> Vec<AutocorrelationRow> {
    let max_lag = i64::from(max_lag);
    (-max_lag..=max_lag)
        .map(|lag| AutocorrelationRow {
            lag,
            replied: sequence.autocorrelation_replied(lag),
            lost: sequence.autocorrelation_lost(lag),
        })
        .collect()
}

/// Host name encoded in a capture file name
///
/// `www.ntu.edu.sg-2025-08-01_10-06-34-ping.txt` becomes `www.ntu.edu.sg`;
/// names without a date component fall back to the file stem.
pub fn host_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match CAPTURE_NAME_RE.captures(&stem) {
        Some(caps) => caps[1].to_string(),
        None => stem,
    }
}
