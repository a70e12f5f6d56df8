//! Pinganalyzer - reliability statistics for ping logs
//!
//! This library re-exports the parsing and statistics functionality from
//! `pinganalyzer-core` and adds the command-line argument handling used by
//! the `pinganalyzer` binary.

pub mod cli;

pub use pinganalyzer_core::config;
pub use pinganalyzer_core::parser;
pub use pinganalyzer_core::stats;

pub use pinganalyzer_core::{
    autocorrelation_table, AnalyzerConfig, AutocorrelationRow, ProbeRecord, ProbeSequence,
    ProbeSummary, RunBoundary,
};
pub use pinganalyzer_core::{DEFAULT_MAX_LAG, VERSION};
