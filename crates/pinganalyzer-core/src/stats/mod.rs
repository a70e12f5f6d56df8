//! Reliability and latency statistics over a [`ProbeSequence`]
//!
//! Every function here is a pure read of the sequence. Undefined ratios
//! come back as `NaN`; the remaining sentinels are listed below.

pub mod autocorrelation;
pub mod report;
pub mod rtt;
pub mod runs;

use crate::parser::sequence::ProbeSequence;
use crate::stats::runs::{Outcome, RunBoundary};

/// Returned by the autocorrelation functions when the lag exceeds the sequence
pub const LAG_OUT_OF_RANGE: f64 = -1.0;

/// Returned by [`ProbeSequence::min_rtt`] when nothing was delivered
pub const MIN_RTT_SENTINEL: f64 = 999.0;

/// Returned by [`ProbeSequence::max_rtt`] when nothing was delivered
pub const MAX_RTT_SENTINEL: f64 = 0.0;

impl ProbeSequence {
    /// Fraction of records that received a reply, `NaN` when empty
    pub fn delivery_rate(&self) -> f64 {
        self.delivered_count() as f64 / self.len() as f64
    }

    /// Longest run of delivered records that was ended by a loss
    ///
    /// A run still open at the end of the sequence is not counted; use
    /// [`runs::longest_run`] with [`RunBoundary::FlushTrailing`] to include it.
    pub fn longest_consecutive_delivered(&self) -> usize {
        runs::longest_run(self.records(), Outcome::Delivered, RunBoundary::AtTransition)
    }

    /// Longest run of lost records that was ended by a reply
    pub fn longest_lost_burst(&self) -> usize {
        runs::longest_run(self.records(), Outcome::Lost, RunBoundary::AtTransition)
    }

    /// Smallest round-trip time among delivered records (ms)
    pub fn min_rtt(&self) -> f64 {
        rtt::min_rtt(self.records())
    }

    /// Largest round-trip time among delivered records (ms)
    pub fn max_rtt(&self) -> f64 {
        rtt::max_rtt(self.records())
    }

    /// Probability that a delivered probe is followed, `lag` probes later, by
    /// another delivered probe
    pub fn autocorrelation_replied(&self, lag: i64) -> f64 {
        autocorrelation::autocorrelation(self.records(), Outcome::Delivered, lag)
    }

    /// Probability that a lost probe is followed, `lag` probes later, by
    /// another lost probe
    pub fn autocorrelation_lost(&self, lag: i64) -> f64 {
        autocorrelation::autocorrelation(self.records(), Outcome::Lost, lag)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::pattern;
    use approx::assert_relative_eq;

    #[test]
    fn test_delivery_rate_five_in_seven() {
        assert_relative_eq!(pattern("DDDDDLL").delivery_rate(), 5.0 / 7.0);
    }

    #[test]
    fn test_delivery_rate_three_in_seven() {
        assert_relative_eq!(pattern("LDDDLDL").delivery_rate(), 3.0 / 7.0);
    }

    #[test]
    fn test_delivery_rate_bounds() {
        assert_eq!(pattern("DDDD").delivery_rate(), 1.0);
        assert_eq!(pattern("LLLL").delivery_rate(), 0.0);
    }

    #[test]
    fn test_delivery_rate_empty_is_nan() {
        assert!(pattern("").delivery_rate().is_nan());
    }

    #[test]
    fn test_run_queries_use_transition_boundary() {
        let sequence = pattern("DDLDDDD");
        assert_eq!(sequence.longest_consecutive_delivered(), 2);

        let sequence = pattern("DLLLL");
        assert_eq!(sequence.longest_lost_burst(), 0);
    }
}
