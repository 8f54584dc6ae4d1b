use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

const LOW_RISK_ACTIONS: &[&str] = &[
    "Routine nursing observation",
    "Provide health education",
    "Monthly outpatient follow-up",
];

const MEDIUM_RISK_ACTIONS: &[&str] = &[
    "Monitor vital signs twice daily",
    "Provide nutritional support",
    "Apply fall-prevention measures",
    "Reassess at weekly follow-up",
];

const HIGH_RISK_ACTIONS: &[&str] = &[
    "Intensify vital-sign monitoring (hourly)",
    "Start a multidisciplinary consultation",
    "Inform the family of the risk",
    "Consider transfer to ICU-level monitoring",
];

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk",
            RiskTier::Medium => "Medium risk",
            RiskTier::High => "High risk",
        }
    }

    /// The fixed action bundle attached to this tier, in the order it is shown.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskTier::Low => LOW_RISK_ACTIONS,
            RiskTier::Medium => MEDIUM_RISK_ACTIONS,
            RiskTier::High => HIGH_RISK_ACTIONS,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named threshold pairs seen in deployed versions of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPolicy {
    /// Low below 30%, Medium below 60%, High from 60%.
    #[default]
    Strict,
    /// Low below 30%, Medium below 70%, High from 70%.
    Lenient,
}

impl ThresholdPolicy {
    pub fn thresholds(self) -> Thresholds {
        match self {
            ThresholdPolicy::Strict => Thresholds {
                low_cut: 30.0,
                high_cut: 60.0,
            },
            ThresholdPolicy::Lenient => Thresholds {
                low_cut: 30.0,
                high_cut: 70.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("Risk thresholds must be finite numbers (low_cut = {low_cut}, high_cut = {high_cut}).")]
    NonFinite { low_cut: f64, high_cut: f64 },
    #[error("Risk thresholds must lie within 0..=100 (low_cut = {low_cut}, high_cut = {high_cut}).")]
    OutOfRange { low_cut: f64, high_cut: f64 },
    #[error("low_cut ({low_cut}) must be strictly below high_cut ({high_cut}).")]
    Inverted { low_cut: f64, high_cut: f64 },
}

/// Risk percentage outside the classifier's domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("Risk percentage is not a number.")]
    NotANumber,
    #[error("Risk percentage {0} is negative.")]
    Negative(f64),
    #[error("Risk percentage {0} exceeds 100.")]
    AboveHundred(f64),
}

/// Tier boundaries in percent. `low_cut` is the exclusive upper bound of the
/// Low tier and `high_cut` the exclusive upper bound of the Medium tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    low_cut: f64,
    high_cut: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        ThresholdPolicy::default().thresholds()
    }
}

impl Thresholds {
    pub fn new(low_cut: f64, high_cut: f64) -> Result<Self, ThresholdError> {
        if !low_cut.is_finite() || !high_cut.is_finite() {
            return Err(ThresholdError::NonFinite { low_cut, high_cut });
        }
        if !(0.0..=100.0).contains(&low_cut) || !(0.0..=100.0).contains(&high_cut) {
            return Err(ThresholdError::OutOfRange { low_cut, high_cut });
        }
        if low_cut >= high_cut {
            return Err(ThresholdError::Inverted { low_cut, high_cut });
        }
        Ok(Self { low_cut, high_cut })
    }

    pub fn low_cut(&self) -> f64 {
        self.low_cut
    }

    pub fn high_cut(&self) -> f64 {
        self.high_cut
    }

    pub fn classify(&self, risk_percent: f64) -> Result<RiskTier, InvalidInput> {
        if risk_percent.is_nan() {
            return Err(InvalidInput::NotANumber);
        }
        if risk_percent < 0.0 {
            return Err(InvalidInput::Negative(risk_percent));
        }
        if risk_percent > 100.0 {
            return Err(InvalidInput::AboveHundred(risk_percent));
        }
        let tier = if risk_percent < self.low_cut {
            RiskTier::Low
        } else if risk_percent < self.high_cut {
            RiskTier::Medium
        } else {
            RiskTier::High
        };
        Ok(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(thresholds: Thresholds, percent: f64) -> RiskTier {
        thresholds.classify(percent).expect("in domain")
    }

    #[test]
    fn strict_policy_boundaries() {
        let t = ThresholdPolicy::Strict.thresholds();
        assert_eq!(tier(t, 0.0), RiskTier::Low);
        assert_eq!(tier(t, 29.999), RiskTier::Low);
        assert_eq!(tier(t, 30.0), RiskTier::Medium);
        assert_eq!(tier(t, 59.999), RiskTier::Medium);
        assert_eq!(tier(t, 60.0), RiskTier::High);
        assert_eq!(tier(t, 100.0), RiskTier::High);
    }

    #[test]
    fn lenient_policy_boundaries() {
        let t = ThresholdPolicy::Lenient.thresholds();
        assert_eq!(tier(t, 29.999), RiskTier::Low);
        assert_eq!(tier(t, 30.0), RiskTier::Medium);
        assert_eq!(tier(t, 60.0), RiskTier::Medium);
        assert_eq!(tier(t, 69.999), RiskTier::Medium);
        assert_eq!(tier(t, 70.0), RiskTier::High);
    }

    #[test]
    fn default_is_strict() {
        assert_eq!(Thresholds::default(), ThresholdPolicy::Strict.thresholds());
        assert_eq!(Thresholds::default().high_cut(), 60.0);
    }

    #[test]
    fn custom_pair_is_honoured() {
        let t = Thresholds::new(10.0, 50.0).expect("valid pair");
        assert_eq!(tier(t, 9.9), RiskTier::Low);
        assert_eq!(tier(t, 10.0), RiskTier::Medium);
        assert_eq!(tier(t, 50.0), RiskTier::High);
    }

    #[test]
    fn invalid_pairs_are_rejected() {
        assert!(matches!(
            Thresholds::new(60.0, 30.0),
            Err(ThresholdError::Inverted { .. })
        ));
        assert!(matches!(
            Thresholds::new(30.0, 30.0),
            Err(ThresholdError::Inverted { .. })
        ));
        assert!(matches!(
            Thresholds::new(-1.0, 30.0),
            Err(ThresholdError::OutOfRange { .. })
        ));
        assert!(matches!(
            Thresholds::new(30.0, 101.0),
            Err(ThresholdError::OutOfRange { .. })
        ));
        assert!(matches!(
            Thresholds::new(f64::NAN, 60.0),
            Err(ThresholdError::NonFinite { .. })
        ));
    }

    #[test]
    fn out_of_domain_percentages_are_invalid() {
        let t = Thresholds::default();
        assert_eq!(t.classify(f64::NAN), Err(InvalidInput::NotANumber));
        assert_eq!(t.classify(-0.5), Err(InvalidInput::Negative(-0.5)));
        assert_eq!(t.classify(100.5), Err(InvalidInput::AboveHundred(100.5)));
    }

    #[test]
    fn bundles_are_fixed_per_tier() {
        assert_eq!(RiskTier::Low.recommendations().len(), 3);
        assert_eq!(RiskTier::Medium.recommendations().len(), 4);
        assert_eq!(
            RiskTier::High.recommendations()[0],
            "Intensify vital-sign monitoring (hourly)"
        );
    }
}
