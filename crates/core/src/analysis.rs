//! Single-agent detailed analysis: metrics plus the windowed raw records
//! they were computed from, with simple descriptive statistics.

use serde::Serialize;
use uuid::Uuid;

use crate::metrics::{agent_leaves, recent_calls, recent_ratings, score_inputs, ComponentMetrics};
use crate::records::{CallRecord, LeaveRecord, RatingRecord, Snapshots};
use crate::scoring::ScoringStrategy;
use crate::stats;

/// Descriptive statistics over the agent's windowed records.
///
/// Averages are over non-null field values and fall back to `0.0` when no
/// value exists, matching the metric defaults.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatistics {
    pub total_calls: usize,
    pub total_ratings: usize,
    pub total_leaves: usize,
    pub avg_call_rating: f64,
    pub avg_delivery_secs: f64,
    pub avg_peer_rating: f64,
}

/// Deep-dive bundle for one agent: component metrics, composite score,
/// and the recent records behind them.
#[derive(Debug, Clone, Serialize)]
pub struct AgentAnalysis {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub metrics: ComponentMetrics,
    pub composite_score: f64,
    pub recent_calls: Vec<CallRecord>,
    pub recent_ratings: Vec<RatingRecord>,
    pub recent_leaves: Vec<LeaveRecord>,
    pub statistics: AgentStatistics,
}

/// Build the detailed analysis for one agent from full snapshots.
///
/// An agent with no records at all is not an error; every metric takes
/// its documented default and the record lists are empty.
pub fn analyze_agent(
    agent_id: Uuid,
    snapshots: &Snapshots,
    strategy: &dyn ScoringStrategy,
) -> AgentAnalysis {
    let inputs = score_inputs(agent_id, snapshots);
    let metrics = inputs.components();

    let calls: Vec<CallRecord> = recent_calls(&snapshots.calls, agent_id)
        .into_iter()
        .cloned()
        .collect();
    let ratings: Vec<RatingRecord> = recent_ratings(&snapshots.ratings, agent_id)
        .into_iter()
        .cloned()
        .collect();
    let leaves: Vec<LeaveRecord> = snapshots
        .leaves()
        .map(|records| agent_leaves(records, agent_id).into_iter().cloned().collect())
        .unwrap_or_default();

    let call_ratings: Vec<f64> = calls.iter().filter_map(|c| c.internal_rating).collect();
    let delivery_times: Vec<f64> = calls.iter().filter_map(|c| c.delivery_secs).collect();
    let peer_ratings: Vec<f64> = ratings.iter().filter_map(|r| r.rating).collect();

    let statistics = AgentStatistics {
        total_calls: calls.len(),
        total_ratings: ratings.len(),
        total_leaves: leaves.len(),
        avg_call_rating: stats::mean(&call_ratings).unwrap_or(0.0),
        avg_delivery_secs: stats::mean(&delivery_times).unwrap_or(0.0),
        avg_peer_rating: stats::mean(&peer_ratings).unwrap_or(0.0),
    };

    AgentAnalysis {
        agent_id,
        agent_name: agent_display_name(&calls),
        metrics,
        composite_score: strategy.score(&inputs),
        recent_calls: calls,
        recent_ratings: ratings,
        recent_leaves: leaves,
        statistics,
    }
}

fn agent_display_name(calls: &[CallRecord]) -> String {
    calls
        .iter()
        .find_map(|c| c.agent_name.clone())
        .unwrap_or_else(|| crate::ranking::UNKNOWN_AGENT_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::scoring::DirectSum;
    use crate::types::Timestamp;

    fn ts(minutes_ago: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap() - Duration::minutes(minutes_ago)
    }

    fn call(agent_id: Uuid, rating: Option<f64>, delivery: Option<f64>, min: i64) -> CallRecord {
        CallRecord {
            id: Uuid::new_v4(),
            agent_id: Some(agent_id),
            agent_name: Some("Dana".into()),
            internal_rating: rating,
            delivery_secs: delivery,
            created_at: ts(min),
            status: None,
        }
    }

    #[test]
    fn analysis_collects_windowed_records_and_stats() {
        let agent = Uuid::new_v4();
        let snapshots = Snapshots::new(
            vec![
                call(agent, Some(4.0), Some(30.0), 0),
                call(agent, Some(2.0), None, 1),
            ],
            vec![RatingRecord {
                id: Uuid::new_v4(),
                subject_id: Some(agent),
                rating: Some(5.0),
                created_at: ts(0),
                status: None,
            }],
            Some(vec![LeaveRecord {
                id: Uuid::new_v4(),
                subject_id: Some(agent),
                is_leave: true,
                reason: Some("sick".into()),
                created_at: ts(0),
            }]),
        );

        let analysis = analyze_agent(agent, &snapshots, &DirectSum);
        assert_eq!(analysis.agent_name, "Dana");
        assert_eq!(analysis.statistics.total_calls, 2);
        assert_eq!(analysis.statistics.total_ratings, 1);
        assert_eq!(analysis.statistics.total_leaves, 1);
        assert!((analysis.statistics.avg_call_rating - 3.0).abs() < f64::EPSILON);
        assert!((analysis.statistics.avg_delivery_secs - 30.0).abs() < f64::EPSILON);
        assert!((analysis.statistics.avg_peer_rating - 5.0).abs() < f64::EPSILON);
        // Metrics and composite agree with the ranking path.
        assert!((analysis.metrics.lr1m_inverse - 0.5).abs() < f64::EPSILON);
        assert!(
            (analysis.composite_score
                - (analysis.metrics.cr50
                    + analysis.metrics.cdt50_inverse
                    + analysis.metrics.r50
                    + analysis.metrics.lr1m_inverse))
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn analysis_of_unknown_agent_is_all_defaults() {
        let analysis = analyze_agent(Uuid::new_v4(), &Snapshots::default(), &DirectSum);
        assert_eq!(analysis.agent_name, "Unknown");
        assert_eq!(analysis.statistics.total_calls, 0);
        assert_eq!(analysis.statistics.avg_call_rating, 0.0);
        assert_eq!(analysis.metrics.lr1m_inverse, 1.0);
        assert_eq!(analysis.composite_score, 1.0);
        assert!(analysis.recent_leaves.is_empty());
    }
}
