//! Typed fetch operations and degraded-snapshot assembly.

use serde::Deserialize;

use opsrank_core::records::{CallRecord, LeaveRecord, RatingRecord, Snapshots};

use crate::client::{FetchError, RecordStoreClient};
use crate::config::FetchConfig;
use crate::queries::{ALL_CALLS_QUERY, ALL_LEAVES_QUERY, ALL_RATINGS_QUERY};

#[derive(Debug, Deserialize)]
struct CallData {
    service_calls: Vec<CallRecord>,
}

#[derive(Debug, Deserialize)]
struct RatingData {
    agent_ratings: Vec<RatingRecord>,
}

#[derive(Debug, Deserialize)]
struct LeaveData {
    leave_requests: Vec<LeaveRecord>,
}

/// Record store facade: one typed fetch per stream plus snapshot assembly.
pub struct RecordStore {
    client: RecordStoreClient,
    config: FetchConfig,
}

impl RecordStore {
    pub fn new(config: FetchConfig) -> Self {
        let client = RecordStoreClient::new(config.endpoint.clone(), config.admin_secret.clone());
        Self { client, config }
    }

    /// Fetch call records, newest first, capped at the configured limit.
    pub async fn fetch_calls(&self) -> Result<Vec<CallRecord>, FetchError> {
        let variables = serde_json::json!({ "limit": self.config.call_limit });
        let data: CallData = self.client.execute(ALL_CALLS_QUERY, variables).await?;
        tracing::debug!(count = data.service_calls.len(), "Fetched call records");
        Ok(data.service_calls)
    }

    /// Fetch rating records, newest first, capped at the configured limit.
    pub async fn fetch_ratings(&self) -> Result<Vec<RatingRecord>, FetchError> {
        let variables = serde_json::json!({ "limit": self.config.rating_limit });
        let data: RatingData = self.client.execute(ALL_RATINGS_QUERY, variables).await?;
        tracing::debug!(count = data.agent_ratings.len(), "Fetched rating records");
        Ok(data.agent_ratings)
    }

    /// Fetch leave records at or after the configured cutoff.
    pub async fn fetch_leaves(&self) -> Result<Vec<LeaveRecord>, FetchError> {
        let variables = serde_json::json!({
            "since": self.config.leave_cutoff.to_rfc3339(),
        });
        let data: LeaveData = self.client.execute(ALL_LEAVES_QUERY, variables).await?;
        tracing::debug!(count = data.leave_requests.len(), "Fetched leave records");
        Ok(data.leave_requests)
    }

    /// Fetch all three streams concurrently and assemble the snapshots.
    ///
    /// A failed calls or ratings fetch degrades to an empty stream; a
    /// failed leaves fetch degrades to an absent stream (availability
    /// falls back to its optimistic default). Ranking always proceeds.
    pub async fn snapshots(&self) -> Snapshots {
        let (calls, ratings, leaves) =
            tokio::join!(self.fetch_calls(), self.fetch_ratings(), self.fetch_leaves());

        let calls = calls.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Call fetch failed, ranking with empty call stream");
            Vec::new()
        });
        let ratings = ratings.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Rating fetch failed, ranking with empty rating stream");
            Vec::new()
        });
        let leaves = match leaves {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(error = %e, "Leave fetch failed, treating stream as absent");
                None
            }
        };

        Snapshots::new(calls, ratings, leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_payload_deserializes_from_graphql_shape() {
        let json = serde_json::json!({
            "service_calls": [{
                "id": "0a0c7c4e-9f1b-4b4e-8a46-0f2f9a6f2d11",
                "agent_id": "4f3f2a1b-6c5d-4e7f-8a9b-0c1d2e3f4a5b",
                "agent_name": "Mira",
                "internal_rating": 4.5,
                "delivery_secs": 42.0,
                "created_at": "2026-02-01T10:00:00Z",
                "status": "completed",
            }],
        });
        let data: CallData = serde_json::from_value(json).unwrap();
        assert_eq!(data.service_calls.len(), 1);
        assert_eq!(data.service_calls[0].agent_name.as_deref(), Some("Mira"));
        assert_eq!(data.service_calls[0].delivery_secs, Some(42.0));
    }

    #[test]
    fn leave_payload_deserializes_with_null_reason() {
        let json = serde_json::json!({
            "leave_requests": [{
                "id": "0a0c7c4e-9f1b-4b4e-8a46-0f2f9a6f2d11",
                "subject_id": "4f3f2a1b-6c5d-4e7f-8a9b-0c1d2e3f4a5b",
                "is_leave": true,
                "reason": null,
                "created_at": "2026-02-01T10:00:00Z",
            }],
        });
        let data: LeaveData = serde_json::from_value(json).unwrap();
        assert!(data.leave_requests[0].is_leave);
        assert!(data.leave_requests[0].reason.is_none());
    }
}
