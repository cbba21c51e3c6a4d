//! Per-agent component metric calculation.
//!
//! Each agent is reduced to four bounded-window metrics: average internal
//! call rating (`cr50`), inverse average credential delivery time
//! (`cdt50_inverse`), average peer rating (`r50`), and an availability
//! score derived from recent leave count (`lr1m_inverse`).
//!
//! The missing-data defaults are deliberately asymmetric: call and rating
//! metrics default to `0.0` when no evidence exists, while availability
//! defaults to `1.0` (absence of leave evidence is treated as full
//! availability, not as proof of zero leaves). Collapsing these into one
//! generic default changes who wins ties at the low end of the board.

use serde::Serialize;
use uuid::Uuid;

use crate::records::{CallRecord, LeaveRecord, RatingRecord, Snapshots};
use crate::stats;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of most-recent records considered per metric (the recency window).
pub const RECENT_WINDOW: usize = 50;

// ---------------------------------------------------------------------------
// Metric types
// ---------------------------------------------------------------------------

/// The four component metrics for one agent, already in score space
/// (delivery and leave terms inverted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentMetrics {
    pub cr50: f64,
    pub cdt50_inverse: f64,
    pub r50: f64,
    pub lr1m_inverse: f64,
}

/// Raw inputs shared by every scoring strategy.
///
/// `avg_delivery_secs` is `None` when no record in the window carries a
/// delivery time; `leave_count` is `None` when the leave stream itself is
/// absent (unconfigured or failed source).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreInputs {
    pub cr50: f64,
    pub r50: f64,
    pub avg_delivery_secs: Option<f64>,
    pub leave_count: Option<u32>,
}

impl ScoreInputs {
    /// Derive the score-space component metrics from the raw inputs.
    ///
    /// The direct-sum strategy sums exactly these four values, so the
    /// calculator and the aggregator can never disagree on the guards.
    pub fn components(&self) -> ComponentMetrics {
        ComponentMetrics {
            cr50: self.cr50,
            cdt50_inverse: invert_delivery(self.avg_delivery_secs),
            r50: self.r50,
            lr1m_inverse: availability(self.leave_count),
        }
    }
}

// ---------------------------------------------------------------------------
// Recency windows
// ---------------------------------------------------------------------------

/// The agent's call records, newest first, capped at [`RECENT_WINDOW`].
pub fn recent_calls(calls: &[CallRecord], agent_id: Uuid) -> Vec<&CallRecord> {
    let mut matched: Vec<&CallRecord> = calls
        .iter()
        .filter(|c| c.agent_id == Some(agent_id))
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched.truncate(RECENT_WINDOW);
    matched
}

/// The agent's rating records, newest first, capped at [`RECENT_WINDOW`].
pub fn recent_ratings(ratings: &[RatingRecord], agent_id: Uuid) -> Vec<&RatingRecord> {
    let mut matched: Vec<&RatingRecord> = ratings
        .iter()
        .filter(|r| r.subject_id == Some(agent_id))
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched.truncate(RECENT_WINDOW);
    matched
}

/// All of the agent's leave records, newest first. The upstream fetch
/// already applies the recency cutoff, so no window cap applies here.
pub fn agent_leaves(leaves: &[LeaveRecord], agent_id: Uuid) -> Vec<&LeaveRecord> {
    let mut matched: Vec<&LeaveRecord> = leaves
        .iter()
        .filter(|l| l.subject_id == Some(agent_id))
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

// ---------------------------------------------------------------------------
// Component metrics
// ---------------------------------------------------------------------------

/// `cr50`: mean internal rating over the agent's recency window.
///
/// No matching calls, or no non-null rating in the window, yields `0.0`.
pub fn call_rating(calls: &[CallRecord], agent_id: Uuid) -> f64 {
    let window = recent_calls(calls, agent_id);
    let values: Vec<f64> = window.iter().filter_map(|c| c.internal_rating).collect();
    stats::mean(&values).unwrap_or(0.0)
}

/// Mean credential delivery time over the agent's recency window, or
/// `None` when no record in the window carries a delivery time.
pub fn avg_delivery_secs(calls: &[CallRecord], agent_id: Uuid) -> Option<f64> {
    let window = recent_calls(calls, agent_id);
    let values: Vec<f64> = window.iter().filter_map(|c| c.delivery_secs).collect();
    stats::mean(&values)
}

/// `cdt50_inverse`: reciprocal of the average delivery time.
///
/// Faster delivery scores higher; an undefined or zero average scores
/// `0.0` rather than dividing.
pub fn invert_delivery(avg: Option<f64>) -> f64 {
    match avg {
        Some(t) if t > 0.0 => 1.0 / t,
        _ => 0.0,
    }
}

/// `r50`: mean peer rating over the agent's recency window; `0.0` when
/// no evidence exists.
pub fn peer_rating(ratings: &[RatingRecord], agent_id: Uuid) -> f64 {
    let window = recent_ratings(ratings, agent_id);
    let values: Vec<f64> = window.iter().filter_map(|r| r.rating).collect();
    stats::mean(&values).unwrap_or(0.0)
}

/// Number of leave records for the agent, or `None` when the leave
/// stream is absent as a concept.
pub fn leave_count(leaves: Option<&[LeaveRecord]>, agent_id: Uuid) -> Option<u32> {
    leaves.map(|records| {
        records
            .iter()
            .filter(|l| l.subject_id == Some(agent_id))
            .count() as u32
    })
}

/// `lr1m_inverse`: availability score from recent leave count.
///
/// Strictly decreasing in the count and bounded in `(0, 1]`: zero leaves
/// (or no leave stream at all) scores `1.0`, `n` leaves scores
/// `1 / (n + 1)`.
pub fn availability(leave_count: Option<u32>) -> f64 {
    match leave_count {
        None | Some(0) => 1.0,
        Some(n) => 1.0 / (n as f64 + 1.0),
    }
}

// ---------------------------------------------------------------------------
// Per-agent aggregation
// ---------------------------------------------------------------------------

/// Compute the raw scoring inputs for one agent from the three snapshots.
pub fn score_inputs(agent_id: Uuid, snapshots: &Snapshots) -> ScoreInputs {
    ScoreInputs {
        cr50: call_rating(&snapshots.calls, agent_id),
        r50: peer_rating(&snapshots.ratings, agent_id),
        avg_delivery_secs: avg_delivery_secs(&snapshots.calls, agent_id),
        leave_count: leave_count(snapshots.leaves(), agent_id),
    }
}

/// Compute the four score-space component metrics for one agent.
pub fn compute_metrics(agent_id: Uuid, snapshots: &Snapshots) -> ComponentMetrics {
    score_inputs(agent_id, snapshots).components()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
