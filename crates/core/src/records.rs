//! Input record types for one ranking run.
//!
//! Records are fetched once per run and treated as immutable snapshots;
//! nothing in the engine mutates them in place.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// One service-call outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: Uuid,
    /// Nullable upstream; records without an agent are never ranked.
    pub agent_id: Option<Uuid>,
    pub agent_name: Option<String>,
    /// Internal quality rating on a 0–5 scale.
    pub internal_rating: Option<f64>,
    /// Time to deliver credentials, in seconds.
    pub delivery_secs: Option<f64>,
    pub created_at: Timestamp,
    pub status: Option<String>,
}

/// One peer/customer rating event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub id: Uuid,
    /// The rated agent.
    pub subject_id: Option<Uuid>,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub status: Option<String>,
}

/// One absence event. Only records flagged as leaves are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub id: Uuid,
    pub subject_id: Option<Uuid>,
    pub is_leave: bool,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// Point-in-time snapshots of all three record streams.
///
/// `leaves` distinguishes a stream that is absent as a concept
/// (unconfigured or failed source, `None`) from one that is configured
/// but returned zero records (`Some` with an empty vec). Both yield the
/// optimistic availability default, but the detailed analysis bundle
/// keeps the distinction.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub calls: Vec<CallRecord>,
    pub ratings: Vec<RatingRecord>,
    pub leaves: Option<Vec<LeaveRecord>>,
}

impl Snapshots {
    pub fn new(
        calls: Vec<CallRecord>,
        ratings: Vec<RatingRecord>,
        leaves: Option<Vec<LeaveRecord>>,
    ) -> Self {
        Self {
            calls,
            ratings,
            leaves,
        }
    }

    /// Leave records as a slice, or `None` when the stream is absent.
    pub fn leaves(&self) -> Option<&[LeaveRecord]> {
        self.leaves.as_deref()
    }
}
