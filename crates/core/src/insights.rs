//! Distributional insights over a ranked board.
//!
//! Tier boundaries and improvement thresholds come from the linear-
//! interpolation quantiles in [`crate::stats`]; changing the quantile
//! method moves boundary agents between tiers.

use serde::Serialize;

use crate::ranking::AgentMetrics;
use crate::stats::quantile;

/// Counts of agents per composite-score tier.
///
/// Tiers partition the real line: `[p80, ∞)`, `[p60, p80)`, `[p40, p60)`,
/// `(-∞, p40)`, so the four counts always sum to the board size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub below_average: usize,
}

/// The agent leading each component metric. Ties go to the earliest
/// occurrence in the ranked sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentLeaders {
    pub best_call_rating: Option<String>,
    pub fastest_delivery: Option<String>,
    pub best_peer_rating: Option<String>,
    pub highest_availability: Option<String>,
}

/// Agents strictly below the 30th percentile of each improvable metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImprovementOpportunities {
    pub low_call_ratings: Vec<String>,
    pub slow_delivery: Vec<String>,
    pub low_peer_ratings: Vec<String>,
}

/// All derived insights for one ranking run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingInsights {
    pub distribution: PerformanceDistribution,
    pub leaders: ComponentLeaders,
    pub improvement: ImprovementOpportunities,
}

/// Percentile below which an agent is an improvement candidate.
const IMPROVEMENT_PERCENTILE: f64 = 0.3;

/// Derive tiers, per-metric leaders, and improvement candidates from a
/// ranked board. An empty board yields the default (empty) insights.
pub fn derive_insights(board: &[AgentMetrics]) -> RankingInsights {
    if board.is_empty() {
        return RankingInsights::default();
    }

    RankingInsights {
        distribution: score_distribution(board),
        leaders: ComponentLeaders {
            best_call_rating: leader_name(board, |m| m.cr50),
            fastest_delivery: leader_name(board, |m| m.cdt50_inverse),
            best_peer_rating: leader_name(board, |m| m.r50),
            highest_availability: leader_name(board, |m| m.lr1m_inverse),
        },
        improvement: ImprovementOpportunities {
            low_call_ratings: below_percentile(board, |m| m.cr50),
            slow_delivery: below_percentile(board, |m| m.cdt50_inverse),
            low_peer_ratings: below_percentile(board, |m| m.r50),
        },
    }
}

fn score_distribution(board: &[AgentMetrics]) -> PerformanceDistribution {
    let scores: Vec<f64> = board.iter().map(|m| m.composite_score).collect();
    // Non-empty board, so the quantiles exist.
    let p80 = quantile(&scores, 0.8).unwrap_or(0.0);
    let p60 = quantile(&scores, 0.6).unwrap_or(0.0);
    let p40 = quantile(&scores, 0.4).unwrap_or(0.0);

    let mut distribution = PerformanceDistribution::default();
    for score in scores {
        if score >= p80 {
            distribution.excellent += 1;
        } else if score >= p60 {
            distribution.good += 1;
        } else if score >= p40 {
            distribution.average += 1;
        } else {
            distribution.below_average += 1;
        }
    }
    distribution
}

/// Name of the agent with the strictly greatest metric value; earlier
/// board entries win ties (`>` keeps the first maximum, unlike `max_by`,
/// which keeps the last).
fn leader_name(board: &[AgentMetrics], metric: impl Fn(&AgentMetrics) -> f64) -> Option<String> {
    let mut best: Option<&AgentMetrics> = None;
    for entry in board {
        match best {
            Some(current) if metric(entry) > metric(current) => best = Some(entry),
            None => best = Some(entry),
            _ => {}
        }
    }
    best.map(|entry| entry.agent_name.clone())
}

fn below_percentile(
    board: &[AgentMetrics],
    metric: impl Fn(&AgentMetrics) -> f64,
) -> Vec<String> {
    let values: Vec<f64> = board.iter().map(&metric).collect();
    let Some(threshold) = quantile(&values, IMPROVEMENT_PERCENTILE) else {
        return Vec::new();
    };
    board
        .iter()
        .filter(|entry| metric(entry) < threshold)
        .map(|entry| entry.agent_name.clone())
        .collect()
}
