//! Gap-filling probe sequence reconstruction
//!
//! Builds the ordered list of probe outcomes for one log file. Every
//! sequence number between two observed replies gets a record; numbers that
//! never produced a reply are filled in as lost.

use super::line::{parse_line, ReplyLine};
use chrono::{DateTime, Utc};
use std::collections::TryReserveError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a log file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// A sequence gap too large to materialize as lost records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot fill {missing} lost records before icmp_seq={seq}: {source}")]
pub struct GapError {
    /// Sequence number of the reply that opened the gap
    pub seq: u64,
    /// Number of lost records the gap would need
    pub missing: u64,
    #[source]
    pub source: TryReserveError,
}

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRecord {
    /// ICMP sequence number
    pub sequence_number: u64,
    /// True when no reply was observed for this sequence number
    pub lost: bool,
    /// Receive time of the reply (`None` for lost probes)
    pub timestamp: Option<DateTime<Utc>>,
    /// Round-trip time in milliseconds (0.0 for lost probes)
    pub rtt_ms: f64,
}

impl ProbeRecord {
    /// Record for a reply that was observed in the log
    pub fn delivered(sequence_number: u64, timestamp: DateTime<Utc>, rtt_ms: f64) -> Self {
        Self {
            sequence_number,
            lost: false,
            timestamp: Some(timestamp),
            rtt_ms,
        }
    }

    /// Synthetic record for a sequence number with no reply
    pub fn lost(sequence_number: u64) -> Self {
        Self {
            sequence_number,
            lost: true,
            timestamp: None,
            rtt_ms: 0.0,
        }
    }
}

impl From<&ReplyLine> for ProbeRecord {
    fn from(reply: &ReplyLine) -> Self {
        Self::delivered(reply.icmp_seq, reply.timestamp, reply.rtt_ms)
    }
}

/// Append-only builder used while a log is being read
///
/// # Example
/// ```
/// use pinganalyzer_core::parser::sequence::{ProbeRecord, SequenceBuilder};
///
/// let ts = chrono::DateTime::from_timestamp(1_754_011_851, 0).unwrap();
/// let mut builder = SequenceBuilder::new();
/// builder.push_observed(ProbeRecord::delivered(3, ts, 1.0)).unwrap();
/// builder.push_observed(ProbeRecord::delivered(7, ts, 1.0)).unwrap();
///
/// let sequence = builder.finish();
/// assert_eq!(sequence.len(), 5);
/// assert_eq!(sequence.lost_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    records: Vec<ProbeRecord>,
    /// Sequence number of the most recent observed reply
    last_seq: Option<u64>,
}

impl SequenceBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observed reply, filling any gap since the previous one
    ///
    /// Duplicate or backwards sequence numbers are appended as-is without
    /// gap records. A gap that cannot be allocated leaves the builder
    /// unchanged and returns [`GapError`].
    pub fn push_observed(&mut self, record: ProbeRecord) -> Result<(), GapError> {
        let seq = record.sequence_number;

        if let Some(last) = self.last_seq {
            if seq < last {
                tracing::debug!(seq, last, "Sequence number went backwards");
            }
            let gap = last.saturating_add(1)..seq;
            if !gap.is_empty() {
                let missing = gap.end - gap.start;
                let additional = usize::try_from(missing)
                    .unwrap_or(usize::MAX)
                    .saturating_add(1);
                self.records
                    .try_reserve(additional)
                    .map_err(|source| GapError {
                        seq,
                        missing,
                        source,
                    })?;
                tracing::debug!(from = gap.start, to = seq - 1, "Filling sequence gap");
                self.records.extend(gap.map(ProbeRecord::lost));
            }
        }

        self.records.push(record);
        self.last_seq = Some(seq);
        Ok(())
    }

    /// Number of records pushed or synthesized so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Freeze the builder into an immutable sequence
    pub fn finish(self) -> ProbeSequence {
        ProbeSequence {
            records: self.records,
        }
    }
}

/// Immutable, gap-free sequence of probe outcomes for one log file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeSequence {
    records: Vec<ProbeRecord>,
}

impl ProbeSequence {
    /// Load a log file, logging any failure and never aborting
    ///
    /// An unreadable file yields an empty sequence; a read error part way
    /// through yields the records parsed up to that point.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match Self::open(path) {
            Ok(sequence) => sequence,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load ping log");
                Self::default()
            }
        }
    }

    /// Load a log file, returning an error only if it cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Parsing ping log");
        let sequence = Self::from_reader(BufReader::new(file));
        tracing::debug!(
            path = %path.display(),
            records = sequence.len(),
            lost = sequence.lost_count(),
            "Parsed ping log"
        );
        Ok(sequence)
    }

    /// Parse a log from any buffered reader
    ///
    /// The first line is a header and is always skipped. Lines that do not
    /// match the reply grammar, including lines that are not valid UTF-8,
    /// are reported and ignored. Only an I/O error stops reading.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Self {
        let mut builder = SequenceBuilder::new();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            line_no += 1;
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    let e = LoadError::Read {
                        line: line_no,
                        source,
                    };
                    tracing::error!(error = %e, "Stopped reading ping log");
                    break;
                }
            }

            if line_no == 1 {
                continue;
            }

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            let reply = match parse_line(&line) {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(line = line_no, content = %line, error = %e, "Skipping line");
                    continue;
                }
            };
            if let Err(e) = builder.push_observed(ProbeRecord::from(&reply)) {
                tracing::warn!(line = line_no, content = %line, error = %e, "Skipping line");
            }
        }

        builder.finish()
    }

    /// All records in sequence order
    pub fn records(&self) -> &[ProbeRecord] {
        &self.records
    }

    /// Total number of records, observed and synthetic
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the log produced no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of lost records
    pub fn lost_count(&self) -> usize {
        self.records.iter().filter(|r| r.lost).count()
    }

    /// Number of delivered records
    pub fn delivered_count(&self) -> usize {
        self.len() - self.lost_count()
    }

    /// Sequence number of the first record
    pub fn first_sequence(&self) -> Option<u64> {
        self.records.first().map(|r| r.sequence_number)
    }

    /// Sequence number of the last record
    pub fn last_sequence(&self) -> Option<u64> {
        self.records.last().map(|r| r.sequence_number)
    }

    /// Time between the first and last observed replies
    pub fn time_span(&self) -> Option<chrono::Duration> {
        let mut stamps = self.records.iter().filter_map(|r| r.timestamp);
        let first = stamps.next()?;
        let last = stamps.last().unwrap_or(first);
        Some(last - first)
    }
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl From<Vec<ProbeRecord>> for ProbeSequence {
    fn from(records: Vec<ProbeRecord>) -> Self {
        Self { records }
    }
}
