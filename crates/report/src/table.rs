//! Console rendering for the leaderboard, insights, and deep dives.

use opsrank_core::analysis::AgentAnalysis;
use opsrank_core::insights::RankingInsights;
use opsrank_core::ranking::{top_n, AgentMetrics};
use opsrank_core::stats;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Render the top of the board as a fixed-width table with summary
/// statistics over the full board.
pub fn render_rankings(board: &[AgentMetrics], limit: usize) -> String {
    if board.is_empty() {
        return "No ranking data available.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "TOP {} AGENT RANKINGS BY COMPOSITE SCORE\n",
        limit.min(board.len())
    ));
    out.push_str(&format!(
        "{:<5} {:<20} {:<10} {:<8} {:<8} {:<8} {:<8}\n",
        "Rank", "Agent", "Score", "CR50", "1/CDT50", "R50", "1/LR1M"
    ));
    out.push_str(RULE);
    out.push('\n');

    for entry in top_n(board, limit) {
        out.push_str(&format!(
            "{:<5} {:<20} {:<10.3} {:<8.3} {:<8.3} {:<8.3} {:<8.3}\n",
            entry.rank,
            truncate(&entry.agent_name, 19),
            entry.composite_score,
            entry.cr50,
            entry.cdt50_inverse,
            entry.r50,
            entry.lr1m_inverse,
        ));
    }

    let scores: Vec<f64> = board.iter().map(|m| m.composite_score).collect();
    out.push_str(&format!("\nTotal agents ranked: {}\n", board.len()));
    out.push_str(&format!(
        "Average score: {:.3}  Highest: {:.3}  Lowest: {:.3}  Std dev: {:.3}\n",
        stats::mean(&scores).unwrap_or(0.0),
        scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        scores.iter().cloned().fold(f64::INFINITY, f64::min),
        stats::std_dev(&scores).unwrap_or(0.0),
    ));
    out
}

/// Render the derived insights: tier distribution, per-metric leaders,
/// and improvement lists.
pub fn render_insights(insights: &RankingInsights) -> String {
    let mut out = String::new();
    let d = &insights.distribution;
    out.push_str("PERFORMANCE DISTRIBUTION\n");
    out.push_str(&format!("  Excellent:     {}\n", d.excellent));
    out.push_str(&format!("  Good:          {}\n", d.good));
    out.push_str(&format!("  Average:       {}\n", d.average));
    out.push_str(&format!("  Below average: {}\n", d.below_average));

    let l = &insights.leaders;
    out.push_str("\nTOP PERFORMERS BY COMPONENT\n");
    out.push_str(&format!("  Best call rating:     {}\n", name_or_dash(&l.best_call_rating)));
    out.push_str(&format!("  Fastest delivery:     {}\n", name_or_dash(&l.fastest_delivery)));
    out.push_str(&format!("  Best peer rating:     {}\n", name_or_dash(&l.best_peer_rating)));
    out.push_str(&format!("  Highest availability: {}\n", name_or_dash(&l.highest_availability)));

    let i = &insights.improvement;
    out.push_str("\nIMPROVEMENT OPPORTUNITIES (below 30th percentile)\n");
    out.push_str(&format!("  Call ratings: {}\n", join_or_none(&i.low_call_ratings)));
    out.push_str(&format!("  Delivery:     {}\n", join_or_none(&i.slow_delivery)));
    out.push_str(&format!("  Peer ratings: {}\n", join_or_none(&i.low_peer_ratings)));
    out
}

/// Render the single-agent deep-dive breakdown.
pub fn render_agent_analysis(analysis: &AgentAnalysis) -> String {
    let mut out = String::new();
    out.push_str("DETAILED AGENT ANALYSIS\n");
    out.push_str(&format!("Agent: {} ({})\n", analysis.agent_name, analysis.agent_id));
    out.push_str(RULE);
    out.push('\n');

    let m = &analysis.metrics;
    out.push_str("SCORE BREAKDOWN\n");
    out.push_str(&format!("  Composite score:        {:.3}\n", analysis.composite_score));
    out.push_str(&format!("  CR50 (call rating):     {:.3}\n", m.cr50));
    out.push_str(&format!("  1/CDT50 (delivery):     {:.3}\n", m.cdt50_inverse));
    out.push_str(&format!("  R50 (peer rating):      {:.3}\n", m.r50));
    out.push_str(&format!("  1/LR1M (availability):  {:.3}\n", m.lr1m_inverse));

    let s = &analysis.statistics;
    out.push_str("\nRECORD COUNTS\n");
    out.push_str(&format!("  Recent calls:   {}\n", s.total_calls));
    out.push_str(&format!("  Recent ratings: {}\n", s.total_ratings));
    out.push_str(&format!("  Recent leaves:  {}\n", s.total_leaves));

    out.push_str("\nAVERAGES OVER RECENT RECORDS\n");
    out.push_str(&format!("  Call rating:   {:.3}\n", s.avg_call_rating));
    out.push_str(&format!("  Delivery time: {:.1} s\n", s.avg_delivery_secs));
    out.push_str(&format!("  Peer rating:   {:.3}\n", s.avg_peer_rating));
    out
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

fn name_or_dash(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("-")
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
