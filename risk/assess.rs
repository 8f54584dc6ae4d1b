use crate::classify::{InvalidInput, RiskTier, Thresholds};
use crate::evaluate::{PredictionError, RiskEvaluator};
use crate::features::FeatureVector;
use crate::model::RiskModel;
use crate::order::{SchemaMismatch, order_features};
use log::debug;
use serde::Serialize;
use thiserror::Error;

/// The outcome of one prediction request. Built per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Probability of death within the horizon, in `[0, 1]`.
    pub probability: f64,
    /// `probability * 100`.
    pub percent: f64,
    pub tier: RiskTier,
    pub recommendations: &'static [&'static str],
    pub horizon_days: f64,
    pub thresholds: Thresholds,
}

/// Every way a prediction request can fail. The presenter shows all of them
/// through the same error message surface.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Prediction error: {0}")]
    Schema(#[from] SchemaMismatch),
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),
    #[error("Prediction error: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Runs the full pipeline for one patient: canonical ordering, the model's
/// cumulative hazard, the one-year risk transform and tier classification.
pub fn assess<M: RiskModel + ?Sized>(
    model: &M,
    vector: &FeatureVector,
    thresholds: &Thresholds,
) -> Result<RiskAssessment, AssessmentError> {
    let values = order_features(vector, model.feature_order())?;
    debug!("Ordered feature values: {values:?}");

    let hazard = model.cumulative_hazard(&values)?;
    let evaluator = RiskEvaluator::one_year();
    let probability = evaluator.evaluate(&hazard)?;
    let percent = probability * 100.0;
    debug!(
        "H({}) = {}, risk = {probability}",
        evaluator.horizon_days(),
        hazard.at(evaluator.horizon_days())
    );

    let tier = thresholds.classify(percent)?;
    Ok(RiskAssessment {
        probability,
        percent,
        tier,
        recommendations: tier.recommendations(),
        horizon_days: evaluator.horizon_days(),
        thresholds: *thresholds,
    })
}
