//! Composite scoring strategies.
//!
//! Two interchangeable formulas share the raw-input contract in
//! [`ScoreInputs`]: the production direct-sum formula and an experimental
//! normalized-weighted formula. Selection happens at the ranking-engine
//! boundary, so neither strategy touches the metric calculator.

use crate::error::{validate_non_negative, CoreError};
use crate::metrics::{availability, ScoreInputs};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper end of the internal/peer rating scale.
pub const RATING_SCALE_MAX: f64 = 5.0;

/// Reference delivery time (seconds) for normalization: deliveries at or
/// under this time normalize to the best-case value of 1.0.
pub const DEFAULT_REFERENCE_DELIVERY_SECS: f64 = 60.0;

/// Default weight for the two rating components.
pub const DEFAULT_RATING_WEIGHT: f64 = 2.0;

/// Default weight for the delivery and availability components.
pub const DEFAULT_UNIT_WEIGHT: f64 = 1.0;

// ---------------------------------------------------------------------------
// Strategy trait
// ---------------------------------------------------------------------------

/// A composite-score formula over one agent's raw metric inputs.
pub trait ScoringStrategy {
    fn score(&self, inputs: &ScoreInputs) -> f64;

    /// Short label for report metadata.
    fn label(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Direct sum (production)
// ---------------------------------------------------------------------------

/// Production formula: `cr50 + cdt50_inverse + r50 + lr1m_inverse`.
///
/// Intentionally scale-sensitive: each component contributes on its
/// natural scale, so the 0–5 rating terms dominate the inverse-seconds
/// and availability terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSum;

impl ScoringStrategy for DirectSum {
    fn score(&self, inputs: &ScoreInputs) -> f64 {
        let m = inputs.components();
        m.cr50 + m.cdt50_inverse + m.r50 + m.lr1m_inverse
    }

    fn label(&self) -> &'static str {
        "direct-sum"
    }
}

// ---------------------------------------------------------------------------
// Normalized + weighted (experimental)
// ---------------------------------------------------------------------------

/// Per-component weights for the normalized formula.
#[derive(Debug, Clone, Copy)]
pub struct ComponentWeights {
    pub call_rating: f64,
    pub peer_rating: f64,
    pub delivery: f64,
    pub availability: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            call_rating: DEFAULT_RATING_WEIGHT,
            peer_rating: DEFAULT_RATING_WEIGHT,
            delivery: DEFAULT_UNIT_WEIGHT,
            availability: DEFAULT_UNIT_WEIGHT,
        }
    }
}

/// Experimental formula: each component is normalized to `[0, 1]`, then
/// combined as a weighted sum.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedWeighted {
    weights: ComponentWeights,
    reference_delivery_secs: f64,
}

impl Default for NormalizedWeighted {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            reference_delivery_secs: DEFAULT_REFERENCE_DELIVERY_SECS,
        }
    }
}

impl NormalizedWeighted {
    /// Build a strategy with explicit weights and reference time.
    ///
    /// Rejects negative, NaN, or infinite values, which would leak into
    /// every composite score.
    pub fn new(
        weights: ComponentWeights,
        reference_delivery_secs: f64,
    ) -> Result<Self, CoreError> {
        validate_non_negative(weights.call_rating, "call_rating weight")?;
        validate_non_negative(weights.peer_rating, "peer_rating weight")?;
        validate_non_negative(weights.delivery, "delivery weight")?;
        validate_non_negative(weights.availability, "availability weight")?;
        validate_non_negative(reference_delivery_secs, "reference delivery time")?;
        Ok(Self {
            weights,
            reference_delivery_secs,
        })
    }
}

impl ScoringStrategy for NormalizedWeighted {
    fn score(&self, inputs: &ScoreInputs) -> f64 {
        let w = &self.weights;
        w.call_rating * normalize_rating(inputs.cr50)
            + w.peer_rating * normalize_rating(inputs.r50)
            + w.delivery
                * normalize_delivery(inputs.avg_delivery_secs, self.reference_delivery_secs)
            + w.availability * normalize_leaves(inputs.leave_count)
    }

    fn label(&self) -> &'static str {
        "normalized-weighted"
    }
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Normalize a 0–5 rating to `[0, 1]`, capped at 1.0.
pub fn normalize_rating(value: f64) -> f64 {
    (value / RATING_SCALE_MAX).min(1.0)
}

/// Normalize an average delivery time against a reference time.
///
/// An undefined or non-positive average normalizes to the best case of
/// 1.0; otherwise `reference / avg`, capped at 1.0.
pub fn normalize_delivery(avg_secs: Option<f64>, reference_secs: f64) -> f64 {
    match avg_secs {
        Some(t) if t > 0.0 => (reference_secs / t).min(1.0),
        _ => 1.0,
    }
}

/// Normalize a leave count to `(0, 1]` as `1 / (n + 1)`; an absent leave
/// stream counts as zero leaves.
pub fn normalize_leaves(leave_count: Option<u32>) -> f64 {
    let n = leave_count.unwrap_or(0);
    availability(Some(n)).min(1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
