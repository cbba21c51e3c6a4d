#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
