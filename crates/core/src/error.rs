#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Validate that a value is a finite, non-negative number.
///
/// Used for scoring weights and normalization reference values, which
/// must never introduce NaN or infinity into a composite score.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}
