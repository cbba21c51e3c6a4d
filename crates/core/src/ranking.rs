//! Ranking engine: per-agent metrics, composite scores, dense ranks.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::metrics::score_inputs;
use crate::records::Snapshots;
use crate::scoring::ScoringStrategy;

/// One row of the leaderboard. Created fresh each run and never mutated
/// after rank assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AgentMetrics {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub cr50: f64,
    pub cdt50_inverse: f64,
    pub r50: f64,
    pub lr1m_inverse: f64,
    pub composite_score: f64,
    /// Dense 1-based rank by descending composite score.
    pub rank: u32,
}

/// Fallback display name for agents whose call records carry no name.
pub const UNKNOWN_AGENT_NAME: &str = "Unknown";

/// Rank every distinct agent present in the call snapshot.
///
/// Agents are enumerated in first-seen order within the call snapshot;
/// that order is the tie-break for equal composite scores (the sort is
/// stable, and incomparable floats are treated as equal). Agents present
/// only in the rating or leave snapshots are never ranked. An empty call
/// snapshot yields an empty board, not an error.
pub fn rank_all(snapshots: &Snapshots, strategy: &dyn ScoringStrategy) -> Vec<AgentMetrics> {
    let mut seen = HashSet::new();
    let mut agent_ids = Vec::new();
    for record in &snapshots.calls {
        if let Some(id) = record.agent_id {
            if seen.insert(id) {
                agent_ids.push(id);
            }
        }
    }

    let mut board: Vec<AgentMetrics> = agent_ids
        .into_iter()
        .map(|agent_id| {
            let inputs = score_inputs(agent_id, snapshots);
            let m = inputs.components();
            AgentMetrics {
                agent_id,
                agent_name: agent_name(snapshots, agent_id),
                cr50: m.cr50,
                cdt50_inverse: m.cdt50_inverse,
                r50: m.r50,
                lr1m_inverse: m.lr1m_inverse,
                composite_score: strategy.score(&inputs),
                rank: 0,
            }
        })
        .collect();

    board.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
    });
    for (index, entry) in board.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }
    board
}

/// The leading `n` rows of a ranked board.
pub fn top_n(board: &[AgentMetrics], n: usize) -> &[AgentMetrics] {
    &board[..n.min(board.len())]
}

/// First non-empty agent name found in the agent's call records.
fn agent_name(snapshots: &Snapshots, agent_id: Uuid) -> String {
    snapshots
        .calls
        .iter()
        .filter(|c| c.agent_id == Some(agent_id))
        .find_map(|c| c.agent_name.clone())
        .unwrap_or_else(|| UNKNOWN_AGENT_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::records::{CallRecord, LeaveRecord, RatingRecord};
    use crate::scoring::DirectSum;
    use crate::types::Timestamp;

    fn ts(minutes_ago: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap() - Duration::minutes(minutes_ago)
    }

    fn call(
        agent_id: Uuid,
        name: &str,
        rating: Option<f64>,
        delivery: Option<f64>,
        minutes_ago: i64,
    ) -> CallRecord {
        CallRecord {
            id: Uuid::new_v4(),
            agent_id: Some(agent_id),
            agent_name: Some(name.into()),
            internal_rating: rating,
            delivery_secs: delivery,
            created_at: ts(minutes_ago),
            status: Some("completed".into()),
        }
    }

    fn rating(subject_id: Uuid, value: f64, minutes_ago: i64) -> RatingRecord {
        RatingRecord {
            id: Uuid::new_v4(),
            subject_id: Some(subject_id),
            rating: Some(value),
            created_at: ts(minutes_ago),
            status: None,
        }
    }

    fn leave(subject_id: Uuid, minutes_ago: i64) -> LeaveRecord {
        LeaveRecord {
            id: Uuid::new_v4(),
            subject_id: Some(subject_id),
            is_leave: true,
            reason: None,
            created_at: ts(minutes_ago),
        }
    }

    /// Three-agent fixture: A strong, B middling, C present in the call
    /// snapshot but with no usable field values.
    fn three_agent_snapshots() -> (Snapshots, Uuid, Uuid, Uuid) {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let snapshots = Snapshots::new(
            vec![
                call(a, "Asha", Some(4.0), Some(20.0), 0),
                call(b, "Bruno", Some(3.0), Some(10.0), 1),
                call(c, "Cleo", None, None, 2),
            ],
            vec![rating(a, 4.5, 0), rating(b, 3.0, 1)],
            Some(vec![leave(b, 0)]),
        );
        (snapshots, a, b, c)
    }

    #[test]
    fn ranks_descending_with_dense_one_based_ranks() {
        let (snapshots, a, b, c) = three_agent_snapshots();
        let board = rank_all(&snapshots, &DirectSum);

        assert_eq!(board.len(), 3);
        // A: 4.0 + 1/20 + 4.5 + 1.0 = 9.55
        // B: 3.0 + 1/10 + 3.0 + 0.5 = 6.6
        // C: 0 + 0 + 0 + 1.0 = 1.0
        assert_eq!(board[0].agent_id, a);
        assert!((board[0].composite_score - 9.55).abs() < 1e-12);
        assert_eq!(board[1].agent_id, b);
        assert!((board[1].composite_score - 6.6).abs() < 1e-12);
        assert_eq!(board[2].agent_id, c);
        assert!((board[2].composite_score - 1.0).abs() < 1e-12);

        for (i, entry) in board.iter().enumerate() {
            assert_eq!(entry.rank, i as u32 + 1);
        }
        for pair in board.windows(2) {
            assert!(pair[0].composite_score >= pair[1].composite_score);
        }
    }

    #[test]
    fn empty_call_snapshot_yields_empty_board() {
        let snapshots = Snapshots::new(vec![], vec![rating(Uuid::new_v4(), 5.0, 0)], None);
        assert!(rank_all(&snapshots, &DirectSum).is_empty());
    }

    #[test]
    fn agents_only_in_rating_stream_are_not_ranked() {
        let rated_only = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let snapshots = Snapshots::new(
            vec![call(caller, "Caller", Some(2.0), None, 0)],
            vec![rating(rated_only, 5.0, 0)],
            None,
        );
        let board = rank_all(&snapshots, &DirectSum);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].agent_id, caller);
    }

    #[test]
    fn null_agent_ids_are_skipped() {
        let agent = Uuid::new_v4();
        let mut orphan = call(agent, "X", Some(5.0), None, 0);
        orphan.agent_id = None;
        let snapshots = Snapshots::new(
            vec![orphan, call(agent, "Named", Some(3.0), None, 1)],
            vec![],
            None,
        );
        let board = rank_all(&snapshots, &DirectSum);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].agent_name, "Named");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        // Identical records -> identical composites.
        let snapshots = Snapshots::new(
            vec![
                call(first, "First", Some(3.0), Some(30.0), 0),
                call(second, "Second", Some(3.0), Some(30.0), 1),
            ],
            vec![],
            None,
        );
        let board = rank_all(&snapshots, &DirectSum);
        assert_eq!(board[0].agent_id, first);
        assert_eq!(board[1].agent_id, second);
        assert_eq!(board[0].composite_score, board[1].composite_score);
        assert_eq!((board[0].rank, board[1].rank), (1, 2));
    }

    #[test]
    fn missing_name_falls_back_to_unknown() {
        let agent = Uuid::new_v4();
        let mut record = call(agent, "ignored", Some(1.0), None, 0);
        record.agent_name = None;
        let snapshots = Snapshots::new(vec![record], vec![], None);
        let board = rank_all(&snapshots, &DirectSum);
        assert_eq!(board[0].agent_name, UNKNOWN_AGENT_NAME);
    }

    #[test]
    fn top_n_clamps_to_board_size() {
        let (snapshots, ..) = three_agent_snapshots();
        let board = rank_all(&snapshots, &DirectSum);
        assert_eq!(top_n(&board, 2).len(), 2);
        assert_eq!(top_n(&board, 10).len(), 3);
        assert!(top_n(&board, 0).is_empty());
    }

    #[test]
    fn all_null_delivery_window_scores_zero_delivery() {
        let agent = Uuid::new_v4();
        let calls: Vec<CallRecord> = (0..50)
            .map(|i| call(agent, "A", Some(4.0), None, i))
            .collect();
        let snapshots = Snapshots::new(calls, vec![], None);
        let board = rank_all(&snapshots, &DirectSum);
        assert_eq!(board[0].cdt50_inverse, 0.0);
        assert!((board[0].composite_score - 5.0).abs() < 1e-12);
    }
}
