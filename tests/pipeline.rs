use approx::assert_abs_diff_eq;
use icurisk::features::{AgeBracket, Feature, Flag, Gender};
use icurisk::{
    AssessmentError, FeatureVector, PredictionError, RiskModel, RiskTier, SchemaMismatch,
    StepFunction, ThresholdPolicy, Thresholds, assess,
};
use std::cell::RefCell;

/// Returns a fixed hazard curve and records the rows it was asked about.
struct StubModel {
    order: Vec<String>,
    hazard: Result<StepFunction, PredictionError>,
    seen: RefCell<Vec<Vec<i64>>>,
}

impl StubModel {
    fn with_hazard_at_one_year(h: f64) -> Self {
        Self {
            order: Feature::ALL.iter().map(|f| f.as_str().to_string()).collect(),
            hazard: Ok(StepFunction::new(vec![30.0, 365.0], vec![h / 2.0, h]).expect("valid curve")),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            hazard: Err(PredictionError::Model(message.to_string())),
            ..Self::with_hazard_at_one_year(0.0)
        }
    }
}

impl RiskModel for StubModel {
    fn feature_order(&self) -> &[String] {
        &self.order
    }

    fn cumulative_hazard(&self, values: &[i64]) -> Result<StepFunction, PredictionError> {
        self.seen.borrow_mut().push(values.to_vec());
        self.hazard.clone()
    }
}

#[test]
fn reference_patient_with_zero_hazard_is_low_risk() {
    let model = StubModel::with_hazard_at_one_year(0.0);
    let assessment = assess(&model, &FeatureVector::default(), &Thresholds::default())
        .expect("assessment");
    assert_eq!(assessment.probability, 0.0);
    assert_eq!(assessment.percent, 0.0);
    assert_eq!(assessment.tier, RiskTier::Low);
    assert_eq!(assessment.recommendations, RiskTier::Low.recommendations());
    assert_eq!(assessment.horizon_days, 365.0);
}

#[test]
fn hazard_of_two_is_high_risk_under_both_policies() {
    let model = StubModel::with_hazard_at_one_year(2.0);
    for policy in [ThresholdPolicy::Strict, ThresholdPolicy::Lenient] {
        let assessment = assess(&model, &FeatureVector::default(), &policy.thresholds())
            .expect("assessment");
        assert_abs_diff_eq!(assessment.probability, 0.8647, epsilon = 1e-4);
        assert_abs_diff_eq!(assessment.percent, 86.47, epsilon = 1e-2);
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.recommendations.len(), 4);
    }
}

#[test]
fn policy_choice_decides_the_medium_high_boundary() {
    // 1 - exp(-h) = 0.65 at h = -ln(0.35).
    let model = StubModel::with_hazard_at_one_year(-(0.35f64).ln());
    let vector = FeatureVector::default();
    let strict = assess(&model, &vector, &ThresholdPolicy::Strict.thresholds()).expect("strict");
    let lenient =
        assess(&model, &vector, &ThresholdPolicy::Lenient.thresholds()).expect("lenient");
    assert_eq!(strict.tier, RiskTier::High);
    assert_eq!(lenient.tier, RiskTier::Medium);
}

#[test]
fn model_receives_values_in_its_own_order() {
    let mut model = StubModel::with_hazard_at_one_year(0.5);
    model.order.reverse();
    let mut vector = FeatureVector::default();
    vector.demographics.gender = Gender::Male;
    vector.demographics.raw_age = AgeBracket::From71To80;
    vector.medication.drug_diabetes = Flag::PRESENT;

    assess(&model, &vector, &Thresholds::default()).expect("assessment");

    let seen = model.seen.borrow();
    assert_eq!(seen.len(), 1);
    let row = &seen[0];
    assert_eq!(row.len(), Feature::ALL.len());
    assert_eq!(row[0], 1, "drug_diabetes comes first when reversed");
    assert_eq!(row[row.len() - 2], 1, "raw_age is 71-80");
    assert_eq!(row[row.len() - 1], 1, "gender is male");
}

#[test]
fn unknown_field_in_model_order_is_a_schema_mismatch() {
    let mut model = StubModel::with_hazard_at_one_year(0.5);
    model.order[10] = "smoking".to_string();
    let err = assess(&model, &FeatureVector::default(), &Thresholds::default())
        .expect_err("schema mismatch");
    assert!(matches!(
        err,
        AssessmentError::Schema(SchemaMismatch::UnknownField(ref name)) if name == "smoking"
    ));
    assert!(model.seen.borrow().is_empty(), "model must not be called");
}

#[test]
fn model_failure_surfaces_as_prediction_error() {
    let model = StubModel::failing("forest file truncated");
    let err = assess(&model, &FeatureVector::default(), &Thresholds::default())
        .expect_err("model failure");
    assert!(matches!(err, AssessmentError::Prediction(PredictionError::Model(_))));
    assert_eq!(
        err.to_string(),
        "Prediction error: The model could not produce a cumulative hazard: forest file truncated"
    );
}

#[test]
fn repeated_requests_give_identical_assessments() {
    let model = StubModel::with_hazard_at_one_year(0.9);
    let vector = FeatureVector::default();
    let first = assess(&model, &vector, &Thresholds::default()).expect("first");
    let second = assess(&model, &vector, &Thresholds::default()).expect("second");
    assert_eq!(first, second);
}
