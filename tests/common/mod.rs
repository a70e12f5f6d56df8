//! Shared helpers for the end-to-end tests

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const HEADER: &str = "PING 10.0.0.1 (10.0.0.1) 56(84) bytes of data.";

/// Path to a checked-in log under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{name}.txt"))
}

/// A reply line for `seq` with the given round-trip time
pub fn reply(seq: u64, rtt_ms: f64) -> String {
    format!(
        "[{}.{:06}] 64 bytes from 10.0.0.1: icmp_seq={} ttl=64 time={} ms",
        1_754_011_850 + seq,
        seq * 1000 % 1_000_000,
        seq,
        rtt_ms
    )
}

/// Write a header plus `lines` to a temporary log file
pub fn write_log(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp log");
    writeln!(file, "{HEADER}").expect("write header");
    for line in lines {
        writeln!(file, "{line}").expect("write line");
    }
    file.flush().expect("flush temp log");
    file
}
