//! JSON report document: metadata, summary statistics, rankings, and an
//! optional single-agent analysis.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::json;

use opsrank_core::analysis::AgentAnalysis;
use opsrank_core::insights::RankingInsights;
use opsrank_core::ranking::AgentMetrics;
use opsrank_core::stats;

use crate::error::ReportError;

/// Build the full report document.
pub fn build_report(
    board: &[AgentMetrics],
    insights: &RankingInsights,
    analysis: Option<&AgentAnalysis>,
    formula: &str,
) -> Result<serde_json::Value, ReportError> {
    let report = json!({
        "metadata": {
            "generated_at": Utc::now().to_rfc3339(),
            "total_agents": board.len(),
            "scoring_strategy": formula,
        },
        "summary_statistics": summary_statistics(board),
        "rankings": serde_json::to_value(board)?,
        "insights": serde_json::to_value(insights)?,
        "detailed_analysis": match analysis {
            Some(a) => serde_json::to_value(a)?,
            None => serde_json::Value::Null,
        },
    });
    Ok(report)
}

/// Write the report as pretty-printed JSON with a timestamped filename.
pub fn write_report_json(
    dir: &Path,
    board: &[AgentMetrics],
    insights: &RankingInsights,
    analysis: Option<&AgentAnalysis>,
    formula: &str,
) -> Result<PathBuf, ReportError> {
    let report = build_report(board, insights, analysis, formula)?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("agent_ranking_report_{timestamp}.json"));
    std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
    tracing::info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}

fn summary_statistics(board: &[AgentMetrics]) -> serde_json::Value {
    let scores: Vec<f64> = board.iter().map(|m| m.composite_score).collect();
    let column = |f: fn(&AgentMetrics) -> f64| -> Vec<f64> { board.iter().map(f).collect() };

    json!({
        "avg_composite_score": stats::mean(&scores),
        "max_composite_score": scores.iter().cloned().reduce(f64::max),
        "min_composite_score": scores.iter().cloned().reduce(f64::min),
        "std_composite_score": stats::std_dev(&scores),
        "avg_cr50": stats::mean(&column(|m| m.cr50)),
        "avg_cdt50_inverse": stats::mean(&column(|m| m.cdt50_inverse)),
        "avg_r50": stats::mean(&column(|m| m.r50)),
        "avg_lr1m_inverse": stats::mean(&column(|m| m.lr1m_inverse)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(composite: f64, rank: u32) -> AgentMetrics {
        AgentMetrics {
            agent_id: Uuid::nil(),
            agent_name: format!("agent-{rank}"),
            cr50: 3.0,
            cdt50_inverse: 0.1,
            r50: 2.0,
            lr1m_inverse: 1.0,
            composite_score: composite,
            rank,
        }
    }

    #[test]
    fn report_carries_metadata_and_rankings() {
        let board = vec![entry(6.1, 1), entry(4.2, 2)];
        let insights = RankingInsights::default();
        let report = build_report(&board, &insights, None, "direct-sum").unwrap();

        assert_eq!(report["metadata"]["total_agents"], 2);
        assert_eq!(report["metadata"]["scoring_strategy"], "direct-sum");
        assert_eq!(report["rankings"].as_array().unwrap().len(), 2);
        assert!(report["detailed_analysis"].is_null());
        assert_eq!(report["summary_statistics"]["max_composite_score"], 6.1);
    }

    #[test]
    fn empty_board_report_has_null_statistics() {
        let report =
            build_report(&[], &RankingInsights::default(), None, "direct-sum").unwrap();
        assert_eq!(report["metadata"]["total_agents"], 0);
        assert!(report["summary_statistics"]["avg_composite_score"].is_null());
        assert!(report["summary_statistics"]["max_composite_score"].is_null());
    }
}
