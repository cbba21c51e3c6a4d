//! CSV building and export for ranked boards.

use std::path::{Path, PathBuf};

use chrono::Utc;

use opsrank_core::ranking::AgentMetrics;

use crate::error::ReportError;

/// Column order of the rankings CSV.
pub const RANKINGS_HEADER: &str =
    "rank,agent_id,agent_name,composite_score,cr50,cdt50_inverse,r50,lr1m_inverse";

/// Fraction of the board exported as "top performers", in percent.
pub const DEFAULT_TOP_PERCENTILE: usize = 20;

/// Build the rankings CSV document (header plus one row per agent,
/// floats at three decimals).
pub fn build_rankings_csv(board: &[AgentMetrics]) -> String {
    let mut lines = Vec::with_capacity(board.len() + 1);
    lines.push(RANKINGS_HEADER.to_string());
    for entry in board {
        lines.push(format!(
            "{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3}",
            entry.rank,
            entry.agent_id,
            csv_escape(&entry.agent_name),
            entry.composite_score,
            entry.cr50,
            entry.cdt50_inverse,
            entry.r50,
            entry.lr1m_inverse,
        ));
    }
    lines.join("\n")
}

/// The leading slice of the board covering the top `percentile` percent,
/// never fewer than one agent for a non-empty board.
pub fn top_performers(board: &[AgentMetrics], percentile: usize) -> &[AgentMetrics] {
    if board.is_empty() {
        return board;
    }
    let count = (board.len() * percentile / 100).max(1);
    &board[..count.min(board.len())]
}

/// Write the full rankings CSV into `dir` with a timestamped filename.
pub fn write_rankings_csv(dir: &Path, board: &[AgentMetrics]) -> Result<PathBuf, ReportError> {
    write_csv(dir, "agent_rankings", board)
}

/// Write the top-performer slice as CSV into `dir`.
pub fn write_top_performers_csv(
    dir: &Path,
    board: &[AgentMetrics],
    percentile: usize,
) -> Result<PathBuf, ReportError> {
    let slice = top_performers(board, percentile);
    write_csv(dir, &format!("top_{percentile}_percent_agents"), slice)
}

fn write_csv(dir: &Path, stem: &str, board: &[AgentMetrics]) -> Result<PathBuf, ReportError> {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{stem}_{timestamp}.csv"));
    std::fs::write(&path, build_rankings_csv(board))?;
    tracing::info!(path = %path.display(), rows = board.len(), "Wrote rankings CSV");
    Ok(path)
}

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
