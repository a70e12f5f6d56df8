//! Reply line grammar
//!
//! Matches a single `ping -D` reply line such as
//!
//! ```text
//! [1754011851.617662] 64 bytes from 127.0.0.1: icmp_seq=169 ttl=64 time=0.044 ms
//! ```
//!
//! Only the timestamp, `icmp_seq` and `time` fields feed the statistics; the
//! remaining captures are kept on [`ReplyLine`] for callers that want them.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Compiled reply grammar, shared by every parser in the process
static REPLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(\d+\.\d+)\] (\d+) bytes from ([\d.]+): icmp_seq=(\d+) ttl=(\d+) time=([\d.]+) (.*)$",
    )
    .expect("reply line regex is valid")
});

/// Errors produced while parsing a single reply line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line format mismatch")]
    FormatMismatch,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid icmp_seq: {0}")]
    InvalidSequence(String),

    #[error("invalid ping time: {0}")]
    InvalidRtt(String),
}

/// One successfully parsed reply line
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyLine {
    /// Receive time of the reply (`[seconds.fraction]` prefix)
    pub timestamp: DateTime<Utc>,
    /// Reply size in bytes, `None` if the count does not fit in a `u32`
    pub bytes: Option<u32>,
    /// Address the reply came from
    pub source: String,
    /// ICMP sequence number
    pub icmp_seq: u64,
    /// Time to live, `None` if the value does not fit in a `u32`
    pub ttl: Option<u32>,
    /// Round-trip time in milliseconds
    pub rtt_ms: f64,
    /// Trailing unit suffix, normally `ms`
    pub unit: String,
}

/// Parse one reply line
///
/// # Example
/// ```
/// use pinganalyzer_core::parser::line::parse_line;
///
/// let reply = parse_line(
///     "[1754011851.617662] 64 bytes from 127.0.0.1: icmp_seq=169 ttl=64 time=0.044 ms",
/// )
/// .unwrap();
/// assert_eq!(reply.icmp_seq, 169);
/// assert_eq!(reply.rtt_ms, 0.044);
/// ```
pub fn parse_line(line: &str) -> Result<ReplyLine, ParseError> {
    let caps = REPLY_RE.captures(line).ok_or(ParseError::FormatMismatch)?;

    let timestamp = parse_timestamp(&caps[1])?;
    let icmp_seq = caps[4]
        .parse::<u64>()
        .map_err(|e| ParseError::InvalidSequence(e.to_string()))?;
    let rtt_ms = caps[6]
        .parse::<f64>()
        .map_err(|e| ParseError::InvalidRtt(e.to_string()))?;

    Ok(ReplyLine {
        timestamp,
        bytes: caps[2].parse().ok(),
        source: caps[3].to_string(),
        icmp_seq,
        ttl: caps[5].parse().ok(),
        rtt_ms,
        unit: caps[7].to_string(),
    })
}

/// Split fractional epoch seconds into whole seconds and truncated nanoseconds
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| ParseError::InvalidTimestamp(e.to_string()))?;
    if !value.is_finite() {
        return Err(ParseError::InvalidTimestamp(format!("{raw} is out of range")));
    }

    let secs = value.floor();
    let nanos = ((value - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .ok_or_else(|| ParseError::InvalidTimestamp(format!("{raw} is out of range")))
}
