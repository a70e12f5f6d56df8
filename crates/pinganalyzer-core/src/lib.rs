//! Pinganalyzer Core - Ping log reconstruction and reliability statistics
//!
//! This library turns timestamped `ping -D` logs into a gap-free sequence of
//! probe outcomes and computes delivery rate, loss bursts, round-trip time
//! extrema and lagged autocorrelation of the reply/loss indicators.

pub mod config;
pub mod parser;
pub mod stats;

pub use config::{AnalyzerConfig, ConfigError};
pub use parser::{
    line::{parse_line, ParseError, ReplyLine},
    sequence::{GapError, LoadError, ProbeRecord, ProbeSequence, SequenceBuilder},
};
pub use stats::report::{autocorrelation_table, AutocorrelationRow, ProbeSummary};
pub use stats::runs::RunBoundary;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default autocorrelation lag span (`-10..=10`)
pub const DEFAULT_MAX_LAG: u32 = 10;
