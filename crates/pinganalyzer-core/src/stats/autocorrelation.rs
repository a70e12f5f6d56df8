//! Lagged autocorrelation of the reply and loss indicators
//!
//! For a lag `k` the estimate is the fraction of records with the chosen
//! outcome whose partner `k` positions away (later for `k > 0`, earlier for
//! `k < 0`) has the same outcome.

use super::runs::Outcome;
use super::LAG_OUT_OF_RANGE;
use crate::parser::sequence::ProbeRecord;

/// Autocorrelation of `outcome` at `lag`
///
/// Returns `1.0` at lag zero, [`LAG_OUT_OF_RANGE`] when the sequence is
/// shorter than `|lag|`, and `NaN` when no record in the compared range has
/// the chosen outcome.
///
/// # Example
/// ```
/// use pinganalyzer_core::parser::sequence::ProbeRecord;
/// use pinganalyzer_core::stats::autocorrelation::autocorrelation;
/// use pinganalyzer_core::stats::runs::Outcome;
///
/// let records: Vec<ProbeRecord> = (1..=4).map(ProbeRecord::lost).collect();
/// assert_eq!(autocorrelation(&records, Outcome::Lost, 1), 1.0);
/// assert_eq!(autocorrelation(&records, Outcome::Lost, 5), -1.0);
/// ```
pub fn autocorrelation(records: &[ProbeRecord], outcome: Outcome, lag: i64) -> f64 {
    let distance = lag.unsigned_abs();
    if (records.len() as u64) < distance {
        return LAG_OUT_OF_RANGE;
    }
    if lag == 0 {
        return 1.0;
    }

    // distance <= len, so it fits in usize
    let distance = distance as usize;
    let head = &records[..records.len() - distance];
    let tail = &records[distance..];
    let (subjects, partners) = if lag > 0 { (head, tail) } else { (tail, head) };

    let mut total = 0u64;
    let mut matched = 0u64;
    for (record, partner) in subjects.iter().zip(partners) {
        if !outcome.matches(record) {
            continue;
        }
        total += 1;
        if outcome.matches(partner) {
            matched += 1;
        }
    }

    matched as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::pattern;
    use approx::assert_relative_eq;

    fn replied(p: &str, lag: i64) -> f64 {
        autocorrelation(pattern(p).records(), Outcome::Delivered, lag)
    }

    fn lost(p: &str, lag: i64) -> f64 {
        autocorrelation(pattern(p).records(), Outcome::Lost, lag)
    }

    #[test]
    fn test_lag_zero_is_one() {
        assert_eq!(replied("DLDL", 0), 1.0);
        assert_eq!(lost("DLDL", 0), 1.0);
        assert_eq!(replied("", 0), 1.0);
    }

    #[test]
    fn test_positive_lag() {
        // Delivered at 0,1,3,4 within [0, 4): 0,1,3; partners 1,2,4 -> D,L,D
        assert_relative_eq!(replied("DDLDD", 1), 2.0 / 3.0);
        // Lost at 2 within [0, 4); partner 3 is delivered
        assert_eq!(lost("DDLDD", 1), 0.0);
    }

    #[test]
    fn test_negative_lag() {
        // Delivered in [1, 5): 1,3,4; partners 0,2,3 -> D,L,D
        assert_relative_eq!(replied("DDLDD", -1), 2.0 / 3.0);
        // Lost in [2, 6): 2,4; partners 0,2 -> L,L
        assert_eq!(lost("LDLDLD", -2), 1.0);
    }

    #[test]
    fn test_alternating_pattern() {
        assert_eq!(replied("DLDLDLDL", 1), 0.0);
        assert_eq!(replied("DLDLDLDL", 2), 1.0);
        assert_eq!(lost("DLDLDLDL", -2), 1.0);
    }

    #[test]
    fn test_lag_beyond_length_is_sentinel() {
        assert_eq!(replied("DDD", 4), LAG_OUT_OF_RANGE);
        assert_eq!(lost("DDD", 4), LAG_OUT_OF_RANGE);
        assert_eq!(replied("DDD", -4), LAG_OUT_OF_RANGE);
        assert_eq!(replied("", 1), LAG_OUT_OF_RANGE);
    }

    #[test]
    fn test_lag_equal_to_length_has_no_pairs() {
        assert!(replied("DDD", 3).is_nan());
        assert!(replied("DDD", -3).is_nan());
    }

    #[test]
    fn test_no_qualifying_records_is_nan() {
        assert!(lost("DDDD", 1).is_nan());
        assert!(replied("LLLL", -2).is_nan());
    }

    #[test]
    fn test_extreme_lags_do_not_panic() {
        assert_eq!(replied("DL", i64::MIN), LAG_OUT_OF_RANGE);
        assert_eq!(replied("DL", i64::MAX), LAG_OUT_OF_RANGE);
    }
}
