//! GraphQL queries against the record store.
//!
//! All three queries return records newest first. Call and rating
//! queries exclude records without a subject up front, so the engine
//! never sees an unattributable event; the leave query takes its recency
//! cutoff as a variable rather than a baked-in date.

/// All call records with a non-null agent, newest first, capped at `$limit`.
pub const ALL_CALLS_QUERY: &str = "
query AllCalls($limit: Int!) {
  service_calls(
    where: {agent_id: {_is_null: false}}
    order_by: {created_at: desc}
    limit: $limit
  ) {
    id
    agent_id
    agent_name
    internal_rating
    delivery_secs
    created_at
    status
  }
}
";

/// All rating records with a non-null subject, newest first, capped at `$limit`.
pub const ALL_RATINGS_QUERY: &str = "
query AllRatings($limit: Int!) {
  agent_ratings(
    where: {subject_id: {_is_null: false}}
    order_by: {created_at: desc}
    limit: $limit
  ) {
    id
    subject_id
    rating
    created_at
    status
  }
}
";

/// All leave-flagged records at or after the `$since` cutoff, newest first.
pub const ALL_LEAVES_QUERY: &str = "
query AllLeaves($since: timestamptz!) {
  leave_requests(
    where: {
      is_leave: {_eq: true}
      created_at: {_gte: $since}
    }
    order_by: {created_at: desc}
  ) {
    id
    subject_id
    is_leave
    reason
    created_at
  }
}
";
