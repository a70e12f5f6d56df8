//! Ping log parsing
//!
//! This module turns raw `ping -D` output into probe records:
//! - Reply line grammar and field extraction ([`line`])
//! - Gap-filling sequence reconstruction ([`sequence`])

pub mod line;
pub mod sequence;
