//! Cumulative hazard to event probability.
//!
//! Under proportional hazards the probability of the event by time `T` is
//! `1 - exp(-H(T))`. The transform is evaluated exactly with the natural
//! exponential; there is no approximation and no hidden state.

use crate::model::StepFunction;
use thiserror::Error;

/// One year, the horizon the mortality model reports on.
pub const ONE_YEAR_HORIZON_DAYS: f64 = 365.0;

/// Failure to obtain a usable cumulative hazard from the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("The model expects {expected} feature values but received {found}.")]
    FeatureCount { expected: usize, found: usize },
    #[error("The model could not produce a cumulative hazard: {0}")]
    Model(String),
    #[error("Cumulative hazard at day {horizon} is negative ({value}).")]
    NegativeHazard { horizon: f64, value: f64 },
    #[error("Cumulative hazard at day {horizon} is not finite ({value}).")]
    NonFiniteHazard { horizon: f64, value: f64 },
}

/// Converts a cumulative hazard curve into the event probability at a fixed
/// horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEvaluator {
    horizon_days: f64,
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::one_year()
    }
}

impl RiskEvaluator {
    pub fn one_year() -> Self {
        Self {
            horizon_days: ONE_YEAR_HORIZON_DAYS,
        }
    }

    pub fn horizon_days(&self) -> f64 {
        self.horizon_days
    }

    /// Probability that the event occurs by the horizon.
    pub fn evaluate(&self, hazard: &StepFunction) -> Result<f64, PredictionError> {
        risk_from_cumulative_hazard(hazard.at(self.horizon_days), self.horizon_days)
    }
}

/// `1 - exp(-h)`, clamped to `[0, 1]`. `h` must be finite and non-negative.
pub fn risk_from_cumulative_hazard(h: f64, horizon: f64) -> Result<f64, PredictionError> {
    if !h.is_finite() {
        return Err(PredictionError::NonFiniteHazard { horizon, value: h });
    }
    if h < 0.0 {
        return Err(PredictionError::NegativeHazard { horizon, value: h });
    }
    Ok((1.0 - (-h).exp()).clamp(0.0, 1.0))
}
