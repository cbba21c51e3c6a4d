//! Metric and ranking engine for agent performance leaderboards.
//!
//! Reduces three immutable record streams (service calls, peer ratings,
//! leave requests) into per-agent component metrics, combines them into a
//! composite score under a pluggable scoring strategy, and derives ranks
//! and distributional insights. Pure and synchronous; all I/O lives in
//! the `opsrank-fetch` and `opsrank-report` crates.

pub mod analysis;
pub mod error;
pub mod insights;
pub mod metrics;
pub mod ranking;
pub mod records;
pub mod scoring;
pub mod stats;
pub mod types;
