//! Round-trip time extrema over delivered probes

use super::{MAX_RTT_SENTINEL, MIN_RTT_SENTINEL};
use crate::parser::sequence::ProbeRecord;

fn delivered_rtts(records: &[ProbeRecord]) -> impl Iterator<Item = f64> + '_ {
    records.iter().filter(|r| !r.lost).map(|r| r.rtt_ms)
}

/// Minimum RTT (ms), starting from [`MIN_RTT_SENTINEL`]
///
/// RTTs above the sentinel never replace it.
pub fn min_rtt(records: &[ProbeRecord]) -> f64 {
    delivered_rtts(records).fold(MIN_RTT_SENTINEL, f64::min)
}

/// Maximum RTT (ms), starting from [`MAX_RTT_SENTINEL`]
pub fn max_rtt(records: &[ProbeRecord]) -> f64 {
    delivered_rtts(records).fold(MAX_RTT_SENTINEL, f64::max)
}
