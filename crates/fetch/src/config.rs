//! Record store configuration loaded from environment variables.

use chrono::{Duration, Utc};

use opsrank_core::types::Timestamp;

use crate::client::FetchError;

/// Default cap on fetched call and rating records.
pub const DEFAULT_FETCH_LIMIT: i64 = 1000;

/// Default lookback window for leave records, in days.
pub const DEFAULT_LEAVE_LOOKBACK_DAYS: i64 = 30;

/// Connection and query parameters for the record store.
///
/// | Env Var                     | Required | Default |
/// |-----------------------------|----------|---------|
/// | `RECORD_STORE_URL`          | yes      | --      |
/// | `RECORD_STORE_ADMIN_SECRET` | yes      | --      |
/// | `CALL_FETCH_LIMIT`          | no       | `1000`  |
/// | `RATING_FETCH_LIMIT`        | no       | `1000`  |
/// | `LEAVE_LOOKBACK_DAYS`       | no       | `30`    |
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub endpoint: String,
    pub admin_secret: String,
    pub call_limit: i64,
    pub rating_limit: i64,
    /// Leave records older than this instant are not eligible.
    pub leave_cutoff: Timestamp,
}

impl FetchConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Result<Self, FetchError> {
        let endpoint = required_var("RECORD_STORE_URL")?;
        let admin_secret = required_var("RECORD_STORE_ADMIN_SECRET")?;
        let call_limit = parsed_var("CALL_FETCH_LIMIT", DEFAULT_FETCH_LIMIT)?;
        let rating_limit = parsed_var("RATING_FETCH_LIMIT", DEFAULT_FETCH_LIMIT)?;
        let lookback_days = parsed_var("LEAVE_LOOKBACK_DAYS", DEFAULT_LEAVE_LOOKBACK_DAYS)?;

        Ok(Self {
            endpoint,
            admin_secret,
            call_limit,
            rating_limit,
            leave_cutoff: leave_cutoff(Utc::now(), lookback_days),
        })
    }
}

/// Cutoff instant for leave eligibility: `now` minus the lookback window.
pub fn leave_cutoff(now: Timestamp, lookback_days: i64) -> Timestamp {
    now - Duration::days(lookback_days.max(0))
}

fn required_var(name: &str) -> Result<String, FetchError> {
    std::env::var(name)
        .map_err(|_| FetchError::Config(format!("{name} environment variable is required")))
}

fn parsed_var(name: &str, default: i64) -> Result<i64, FetchError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| FetchError::Config(format!("{name} must be a valid integer"))),
        Err(_) => Ok(default),
    }
}
