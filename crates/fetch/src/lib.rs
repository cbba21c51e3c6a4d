//! Record Store client library.
//!
//! Fetches the three record streams (service calls, peer ratings, leave
//! requests) from an upstream GraphQL data service and assembles them
//! into the immutable snapshots the ranking engine consumes. Fetch
//! failures degrade to empty snapshots instead of aborting the run.

pub mod client;
pub mod config;
pub mod queries;
pub mod store;
