//! GraphQL HTTP client for the record store endpoint.
//!
//! Wraps the upstream Hasura-style GraphQL API using [`reqwest`]: one
//! POST per query, admin-secret header authentication, and a typed
//! response envelope.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Header carrying the admin secret on every request.
const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Errors from the record store boundary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("record store error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The endpoint answered 2xx but reported GraphQL-level errors.
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// GraphQL response envelope: either `data` or a list of `errors`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap the envelope into its data, surfacing GraphQL errors.
    pub fn into_data(self) -> Result<T, FetchError> {
        if let Some(errors) = self.errors {
            if !errors.is_empty() {
                let joined = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(FetchError::GraphQl(joined));
            }
        }
        self.data
            .ok_or_else(|| FetchError::GraphQl("response carried no data".into()))
    }
}

/// HTTP client for a single record store endpoint.
pub struct RecordStoreClient {
    client: reqwest::Client,
    endpoint: String,
    admin_secret: String,
}

impl RecordStoreClient {
    /// Create a client for the given endpoint.
    pub fn new(endpoint: String, admin_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            admin_secret,
        }
    }

    /// Execute one GraphQL query and deserialize the `data` payload.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, FetchError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header(ADMIN_SECRET_HEADER, &self.admin_secret)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        envelope.into_data()
    }
}
