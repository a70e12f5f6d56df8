//! E2E tests for reply and loss autocorrelation
//!
//! Verifies lag handling, sentinels and the table used by the
//! `autocorrelation` command.

mod common;

use approx::assert_relative_eq;
use common::{fixture, reply, write_log};
use pinganalyzer::stats::LAG_OUT_OF_RANGE;
use pinganalyzer::{autocorrelation_table, ProbeSequence};

/// Test lag zero is always one
#[test]
fn test_lag_zero() {
    for name in ["rate5in7", "lost4", "consec3"] {
        let sequence = ProbeSequence::from_path(fixture(name));
        assert_eq!(sequence.autocorrelation_replied(0), 1.0);
        assert_eq!(sequence.autocorrelation_lost(0), 1.0);
    }
}

/// Test lags longer than the log return the sentinel
#[test]
fn test_lag_longer_than_log() {
    let sequence = ProbeSequence::from_path(fixture("rate4in6"));
    assert_eq!(sequence.len(), 6);

    assert_eq!(sequence.autocorrelation_replied(7), LAG_OUT_OF_RANGE);
    assert_eq!(sequence.autocorrelation_lost(7), LAG_OUT_OF_RANGE);
    assert_eq!(sequence.autocorrelation_replied(-7), LAG_OUT_OF_RANGE);
}

/// Test a known pattern at positive and negative lags
#[test]
fn test_known_pattern() {
    // rate4in6 is D L D D L D
    let sequence = ProbeSequence::from_path(fixture("rate4in6"));

    // Replied at 0,2,3 in [0, 5): partners 1,3,4 -> L,D,L
    assert_relative_eq!(sequence.autocorrelation_replied(1), 1.0 / 3.0);
    // Lost at 1,4 in [1, 6): partners 0,3 -> D,D
    assert_eq!(sequence.autocorrelation_lost(-1), 0.0);
    // Lost at 1 in [0, 3): partner 4 -> L
    assert_eq!(sequence.autocorrelation_lost(3), 1.0);
}

/// Test a loss-free log has undefined loss autocorrelation
#[test]
fn test_no_loss_is_undefined() {
    let sequence = ProbeSequence::from_path(fixture("lost0"));

    assert!(sequence.autocorrelation_lost(1).is_nan());
    assert_eq!(sequence.autocorrelation_replied(1), 1.0);
}

/// Test bursty loss shows strong loss autocorrelation at lag 1
#[test]
fn test_bursty_loss() {
    let lines: Vec<String> = [1u64, 2, 10, 11, 20]
        .iter()
        .map(|&seq| reply(seq, 10.0))
        .collect();
    let log = write_log(&lines);
    let sequence = ProbeSequence::from_path(log.path());

    assert_eq!(sequence.len(), 20);
    // Lost 3..=9 and 12..=19 (indices 2..=8, 11..=18); partners are lost except 8 and 18
    assert_relative_eq!(sequence.autocorrelation_lost(1), 13.0 / 15.0);
}

/// Test the table spans the requested lags in order
#[test]
fn test_table() {
    let sequence = ProbeSequence::from_path(fixture("lost3-2"));
    let rows = autocorrelation_table(&sequence, 10);

    assert_eq!(rows.len(), 21);
    let lags: Vec<i64> = rows.iter().map(|r| r.lag).collect();
    assert_eq!(lags, (-10..=10).collect::<Vec<_>>());

    // lost3-2 has 10 records, so |lag| = 10 has no pairs but is in range
    assert!(rows[0].replied.is_nan());
    assert_eq!(rows[10].replied, 1.0);
    for row in &rows {
        assert_eq!(
            row.replied.to_bits(),
            sequence.autocorrelation_replied(row.lag).to_bits()
        );
        assert!(row.lost.is_nan() || (0.0..=1.0).contains(&row.lost));
    }
}
