//! Probe statistics aggregation and report formatting helpers.
mod format;
mod stats;


pub use format::format_duration;
pub use stats::{ProbeStats, StatsSnapshot};
