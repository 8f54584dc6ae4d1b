use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepFunctionError {
    #[error("step function has {times} time points but {values} values")]
    LengthMismatch { times: usize, values: usize },
    #[error("time point {index} is not finite ({value})")]
    NonFiniteTime { index: usize, value: f64 },
    #[error("time points must be strictly increasing; point {index} ({value}) does not exceed its predecessor")]
    UnorderedTimes { index: usize, value: f64 },
    #[error("cumulative hazard value {index} must be finite and non-negative, found {value}")]
    InvalidValue { index: usize, value: f64 },
    #[error("cumulative hazard must be non-decreasing; value {index} ({value}) drops below its predecessor")]
    Decreasing { index: usize, value: f64 },
    #[error("scale factor must be finite and non-negative, found {0}")]
    InvalidScale(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepFunctionRepr {
    times: Vec<f64>,
    values: Vec<f64>,
}

/// A right-continuous cumulative hazard curve over time in days.
///
/// `H(t)` is `values[k]` for the last `k` with `times[k] <= t`, and zero before
/// the first time point. Construction guarantees the curve is a valid
/// cumulative hazard: finite, non-negative and non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepFunctionRepr", into = "StepFunctionRepr")]
pub struct StepFunction {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl StepFunction {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, StepFunctionError> {
        if times.len() != values.len() {
            return Err(StepFunctionError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(StepFunctionError::NonFiniteTime { index, value });
            }
            if index > 0 && value <= times[index - 1] {
                return Err(StepFunctionError::UnorderedTimes { index, value });
            }
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(StepFunctionError::InvalidValue { index, value });
            }
            if index > 0 && value < values[index - 1] {
                return Err(StepFunctionError::Decreasing { index, value });
            }
        }
        Ok(Self { times, values })
    }

    /// The curve that is zero everywhere.
    pub fn zero() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Evaluates `H(t)`.
    pub fn at(&self, t: f64) -> f64 {
        let idx = self.times.partition_point(|&time| time <= t);
        if idx == 0 {
            0.0
        } else {
            self.values[idx - 1]
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Multiplies every value by `factor`, as a proportional-hazards model does
    /// with its relative risk. Overflow surfaces as an invalid value.
    pub fn scaled(&self, factor: f64) -> Result<Self, StepFunctionError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(StepFunctionError::InvalidScale(factor));
        }
        let values = self.values.iter().map(|&v| v * factor).collect_vec();
        Self::new(self.times.clone(), values)
    }

    /// Pointwise mean of several curves, evaluated on the union of their jump
    /// times. An empty slice yields the zero curve.
    pub fn mean_of(curves: &[&StepFunction]) -> Result<Self, StepFunctionError> {
        if curves.is_empty() {
            return Ok(Self::zero());
        }
        let times = curves
            .iter()
            .flat_map(|curve| curve.times.iter().copied())
            .sorted_by(f64::total_cmp)
            .dedup()
            .collect_vec();
        let count = curves.len() as f64;
        let values = times
            .iter()
            .map(|&t| curves.iter().map(|curve| curve.at(t)).sum::<f64>() / count)
            .collect_vec();
        Self::new(times, values)
    }
}

impl TryFrom<StepFunctionRepr> for StepFunction {
    type Error = StepFunctionError;

    fn try_from(repr: StepFunctionRepr) -> Result<Self, Self::Error> {
        StepFunction::new(repr.times, repr.values)
    }
}

impl From<StepFunction> for StepFunctionRepr {
    fn from(curve: StepFunction) -> Self {
        StepFunctionRepr {
            times: curve.times,
            values: curve.values,
        }
    }
}
