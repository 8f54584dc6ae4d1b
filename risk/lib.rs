#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(clippy::no_effect_underscore_binding)]
//! One-year mortality risk for elderly ICU patients.
//!
//! A patient's [`FeatureVector`] is laid out in the trained model's canonical
//! order, the model produces a cumulative hazard curve, the curve is turned
//! into a one-year risk, and the risk is tiered with a fixed recommendation
//! bundle. The model itself is an external artifact loaded from disk.

pub mod assess;
pub mod classify;
pub mod config;
pub mod evaluate;
pub mod features;
pub mod order;

#[path = "../model/mod.rs"]
pub mod model;

pub use assess::{AssessmentError, RiskAssessment, assess};
pub use classify::{InvalidInput, RiskTier, ThresholdError, ThresholdPolicy, Thresholds};
pub use evaluate::{ONE_YEAR_HORIZON_DAYS, PredictionError, RiskEvaluator};
pub use features::FeatureVector;
pub use model::{RiskModel, StepFunction, SurvivalModel, shared_model};
pub use order::{CanonicalOrder, SchemaMismatch, order_features};
