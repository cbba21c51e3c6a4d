//! Report exporter for ranking runs.
//!
//! Renders the ranked board and derived insights for the console, and
//! writes durable artifacts: CSV leaderboards, top-performer exports,
//! and a JSON report with summary statistics.

pub mod csv;
pub mod error;
pub mod report;
pub mod table;
