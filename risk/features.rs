//! The fixed patient schema collected by the intake form.
//!
//! Every attribute is a named, typed member of [`FeatureVector`]. Categorical
//! attributes are enums carrying the exact integer code the trained model was
//! fitted on; clinical flags are booleans coded 0/1. Codes outside a field's
//! domain are rejected while decoding, so a constructed vector is always
//! submittable.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Raised when an integer code does not belong to a field's domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} code {code} is outside the accepted range {min}..={max}")]
pub struct CodeError {
    pub field: &'static str,
    pub code: i64,
    pub min: i64,
    pub max: i64,
}

/// Errors surfaced while reading a patient record from disk.
#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Failed to read patient file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse patient file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    pub fn code(self) -> i64 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }
}

impl TryFrom<i64> for Gender {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Gender::Female),
            1 => Ok(Gender::Male),
            _ => Err(CodeError {
                field: "gender",
                code,
                min: 0,
                max: 1,
            }),
        }
    }
}

impl From<Gender> for i64 {
    fn from(value: Gender) -> Self {
        value.code()
    }
}

/// Age bands used for the geriatric cohort the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AgeBracket {
    #[default]
    From61To70,
    From71To80,
    From81To90,
    From91,
}

impl AgeBracket {
    pub fn code(self) -> i64 {
        match self {
            AgeBracket::From61To70 => 0,
            AgeBracket::From71To80 => 1,
            AgeBracket::From81To90 => 2,
            AgeBracket::From91 => 3,
        }
    }
}

impl TryFrom<i64> for AgeBracket {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AgeBracket::From61To70),
            1 => Ok(AgeBracket::From71To80),
            2 => Ok(AgeBracket::From81To90),
            3 => Ok(AgeBracket::From91),
            _ => Err(CodeError {
                field: "raw_age",
                code,
                min: 0,
                max: 3,
            }),
        }
    }
}

impl From<AgeBracket> for i64 {
    fn from(value: AgeBracket) -> Self {
        value.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MaritalStatus {
    /// Unmarried, divorced, widowed or living alone.
    #[default]
    Single,
    Married,
}

impl MaritalStatus {
    pub fn code(self) -> i64 {
        match self {
            MaritalStatus::Single => 0,
            MaritalStatus::Married => 1,
        }
    }
}

impl TryFrom<i64> for MaritalStatus {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MaritalStatus::Single),
            1 => Ok(MaritalStatus::Married),
            _ => Err(CodeError {
                field: "marital_status",
                code,
                min: 0,
                max: 1,
            }),
        }
    }
}

impl From<MaritalStatus> for i64 {
    fn from(value: MaritalStatus) -> Self {
        value.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Insurance {
    #[default]
    Other,
    Basic,
    Comprehensive,
    Private,
}

impl Insurance {
    pub fn code(self) -> i64 {
        match self {
            Insurance::Other => 0,
            Insurance::Basic => 1,
            Insurance::Comprehensive => 2,
            Insurance::Private => 3,
        }
    }
}

impl TryFrom<i64> for Insurance {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Insurance::Other),
            1 => Ok(Insurance::Basic),
            2 => Ok(Insurance::Comprehensive),
            3 => Ok(Insurance::Private),
            _ => Err(CodeError {
                field: "insurance",
                code,
                min: 0,
                max: 3,
            }),
        }
    }
}

impl From<Insurance> for i64 {
    fn from(value: Insurance) -> Self {
        value.code()
    }
}

/// A yes/no clinical flag. Accepts `true`/`false` or the codes `0`/`1` on input
/// and always writes the integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i64")]
pub struct Flag(pub bool);

impl Flag {
    pub const ABSENT: Flag = Flag(false);
    pub const PRESENT: Flag = Flag(true);

    pub fn code(self) -> i64 {
        i64::from(self.0)
    }
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = Flag;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("0, 1, true or false")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Flag, E> {
        Ok(Flag(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Flag, E> {
        match value {
            0 => Ok(Flag::ABSENT),
            1 => Ok(Flag::PRESENT),
            other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Flag, E> {
        match value {
            0 => Ok(Flag::ABSENT),
            1 => Ok(Flag::PRESENT),
            other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }
}

impl From<Flag> for i64 {
    fn from(value: Flag) -> Self {
        value.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Demographics {
    pub gender: Gender,
    pub raw_age: AgeBracket,
    pub marital_status: MaritalStatus,
    pub insurance: Insurance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Physiology {
    pub malnutrition: Flag,
    pub mobility: Flag,
    pub abnormal_liver_function: Flag,
    pub dysphagia: Flag,
    pub chronic_renal_failure: Flag,
    pub sarcopenia: Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiseaseHistory {
    pub hypertension: Flag,
    pub coronary_atherosclerosis: Flag,
    pub history_of_falls: Flag,
    pub copd: Flag,
    pub pressure_ulcer: Flag,
    pub osteoporosis: Flag,
    pub degenerative_joint_disease: Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MentalState {
    pub sleep_disorder: Flag,
    pub anxiety: Flag,
    pub delirium: Flag,
    pub depression: Flag,
    pub hearing_impairment: Flag,
}

/// Medication classes in sustained use over the last three months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Medication {
    pub drug_urinary_incontinence: Flag,
    pub drug_cardiovascular: Flag,
    pub drug_antithrombotic: Flag,
    pub drug_renal_failure: Flag,
    pub drug_chronic_pain: Flag,
    pub drug_diabetes: Flag,
}

/// One patient's complete set of model inputs.
///
/// The default value codes every attribute as 0, which is the all-negative
/// reference patient: female, 61–70, single, "other" insurance, no flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureVector {
    pub demographics: Demographics,
    pub physiology: Physiology,
    pub disease_history: DiseaseHistory,
    pub mental_state: MentalState,
    pub medication: Medication,
}

impl FeatureVector {
    pub fn from_toml_str(text: &str) -> Result<Self, PatientError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatientError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Integer code currently held for `feature`.
    pub fn value(&self, feature: Feature) -> i64 {
        let d = &self.demographics;
        let p = &self.physiology;
        let h = &self.disease_history;
        let m = &self.mental_state;
        let rx = &self.medication;
        match feature {
            Feature::Gender => d.gender.code(),
            Feature::RawAge => d.raw_age.code(),
            Feature::MaritalStatus => d.marital_status.code(),
            Feature::Insurance => d.insurance.code(),
            Feature::Malnutrition => p.malnutrition.code(),
            Feature::Mobility => p.mobility.code(),
            Feature::AbnormalLiverFunction => p.abnormal_liver_function.code(),
            Feature::Dysphagia => p.dysphagia.code(),
            Feature::ChronicRenalFailure => p.chronic_renal_failure.code(),
            Feature::Sarcopenia => p.sarcopenia.code(),
            Feature::Hypertension => h.hypertension.code(),
            Feature::CoronaryAtherosclerosis => h.coronary_atherosclerosis.code(),
            Feature::HistoryOfFalls => h.history_of_falls.code(),
            Feature::Copd => h.copd.code(),
            Feature::PressureUlcer => h.pressure_ulcer.code(),
            Feature::Osteoporosis => h.osteoporosis.code(),
            Feature::DegenerativeJointDisease => h.degenerative_joint_disease.code(),
            Feature::SleepDisorder => m.sleep_disorder.code(),
            Feature::Anxiety => m.anxiety.code(),
            Feature::Delirium => m.delirium.code(),
            Feature::Depression => m.depression.code(),
            Feature::HearingImpairment => m.hearing_impairment.code(),
            Feature::DrugUrinaryIncontinence => rx.drug_urinary_incontinence.code(),
            Feature::DrugCardiovascular => rx.drug_cardiovascular.code(),
            Feature::DrugAntithrombotic => rx.drug_antithrombotic.code(),
            Feature::DrugRenalFailure => rx.drug_renal_failure.code(),
            Feature::DrugChronicPain => rx.drug_chronic_pain.code(),
            Feature::DrugDiabetes => rx.drug_diabetes.code(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    Demographics,
    Physiology,
    DiseaseHistory,
    MentalState,
    Medication,
}

impl FeatureGroup {
    pub const ALL: [FeatureGroup; 5] = [
        FeatureGroup::Demographics,
        FeatureGroup::Physiology,
        FeatureGroup::DiseaseHistory,
        FeatureGroup::MentalState,
        FeatureGroup::Medication,
    ];

    /// Table name used in patient files.
    pub fn table(self) -> &'static str {
        match self {
            FeatureGroup::Demographics => "demographics",
            FeatureGroup::Physiology => "physiology",
            FeatureGroup::DiseaseHistory => "disease_history",
            FeatureGroup::MentalState => "mental_state",
            FeatureGroup::Medication => "medication",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FeatureGroup::Demographics => "Demographics",
            FeatureGroup::Physiology => "Physiological indicators",
            FeatureGroup::DiseaseHistory => "Disease history",
            FeatureGroup::MentalState => "Mental state",
            FeatureGroup::Medication => "Medication (sustained use, last 3 months)",
        }
    }
}

/// Names of every model input. The declaration order is the form's collection
/// order; the model's canonical order is supplied separately by the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Gender,
    RawAge,
    MaritalStatus,
    Insurance,
    Malnutrition,
    Mobility,
    AbnormalLiverFunction,
    Dysphagia,
    ChronicRenalFailure,
    Sarcopenia,
    Hypertension,
    CoronaryAtherosclerosis,
    HistoryOfFalls,
    Copd,
    PressureUlcer,
    Osteoporosis,
    DegenerativeJointDisease,
    SleepDisorder,
    Anxiety,
    Delirium,
    Depression,
    HearingImpairment,
    DrugUrinaryIncontinence,
    DrugCardiovascular,
    DrugAntithrombotic,
    DrugRenalFailure,
    DrugChronicPain,
    DrugDiabetes,
}

pub const FEATURE_COUNT: usize = 28;

const FLAG_CODES: &[(i64, &str)] = &[(0, "absent"), (1, "present")];

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Gender,
        Feature::RawAge,
        Feature::MaritalStatus,
        Feature::Insurance,
        Feature::Malnutrition,
        Feature::Mobility,
        Feature::AbnormalLiverFunction,
        Feature::Dysphagia,
        Feature::ChronicRenalFailure,
        Feature::Sarcopenia,
        Feature::Hypertension,
        Feature::CoronaryAtherosclerosis,
        Feature::HistoryOfFalls,
        Feature::Copd,
        Feature::PressureUlcer,
        Feature::Osteoporosis,
        Feature::DegenerativeJointDisease,
        Feature::SleepDisorder,
        Feature::Anxiety,
        Feature::Delirium,
        Feature::Depression,
        Feature::HearingImpairment,
        Feature::DrugUrinaryIncontinence,
        Feature::DrugCardiovascular,
        Feature::DrugAntithrombotic,
        Feature::DrugRenalFailure,
        Feature::DrugChronicPain,
        Feature::DrugDiabetes,
    ];

    /// Column name the model was trained with.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Gender => "gender",
            Feature::RawAge => "raw_age",
            Feature::MaritalStatus => "marital_status",
            Feature::Insurance => "insurance",
            Feature::Malnutrition => "malnutrition",
            Feature::Mobility => "mobility",
            Feature::AbnormalLiverFunction => "abnormal_liver_function",
            Feature::Dysphagia => "dysphagia",
            Feature::ChronicRenalFailure => "chronic_renal_failure",
            Feature::Sarcopenia => "sarcopenia",
            Feature::Hypertension => "hypertension",
            Feature::CoronaryAtherosclerosis => "coronary_atherosclerosis",
            Feature::HistoryOfFalls => "history_of_falls",
            Feature::Copd => "copd",
            Feature::PressureUlcer => "pressure_ulcer",
            Feature::Osteoporosis => "osteoporosis",
            Feature::DegenerativeJointDisease => "degenerative_joint_disease",
            Feature::SleepDisorder => "sleep_disorder",
            Feature::Anxiety => "anxiety",
            Feature::Delirium => "delirium",
            Feature::Depression => "depression",
            Feature::HearingImpairment => "hearing_impairment",
            Feature::DrugUrinaryIncontinence => "drug_urinary_incontinence",
            Feature::DrugCardiovascular => "drug_cardiovascular",
            Feature::DrugAntithrombotic => "drug_antithrombotic",
            Feature::DrugRenalFailure => "drug_renal_failure",
            Feature::DrugChronicPain => "drug_chronic_pain",
            Feature::DrugDiabetes => "drug_diabetes",
        }
    }

    pub fn group(self) -> FeatureGroup {
        match self {
            Feature::Gender | Feature::RawAge | Feature::MaritalStatus | Feature::Insurance => {
                FeatureGroup::Demographics
            }
            Feature::Malnutrition
            | Feature::Mobility
            | Feature::AbnormalLiverFunction
            | Feature::Dysphagia
            | Feature::ChronicRenalFailure
            | Feature::Sarcopenia => FeatureGroup::Physiology,
            Feature::Hypertension
            | Feature::CoronaryAtherosclerosis
            | Feature::HistoryOfFalls
            | Feature::Copd
            | Feature::PressureUlcer
            | Feature::Osteoporosis
            | Feature::DegenerativeJointDisease => FeatureGroup::DiseaseHistory,
            Feature::SleepDisorder
            | Feature::Anxiety
            | Feature::Delirium
            | Feature::Depression
            | Feature::HearingImpairment => FeatureGroup::MentalState,
            Feature::DrugUrinaryIncontinence
            | Feature::DrugCardiovascular
            | Feature::DrugAntithrombotic
            | Feature::DrugRenalFailure
            | Feature::DrugChronicPain
            | Feature::DrugDiabetes => FeatureGroup::Medication,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Feature::Gender => "Sex",
            Feature::RawAge => "Age bracket (geriatric age banding)",
            Feature::MaritalStatus => "Marital status",
            Feature::Insurance => "Insurance type (level of medical coverage)",
            Feature::Malnutrition => "Malnutrition",
            Feature::Mobility => "Impaired mobility",
            Feature::AbnormalLiverFunction => "Abnormal liver function",
            Feature::Dysphagia => "Dysphagia",
            Feature::ChronicRenalFailure => "Chronic renal failure",
            Feature::Sarcopenia => "Sarcopenia",
            Feature::Hypertension => "Hypertension",
            Feature::CoronaryAtherosclerosis => "Coronary atherosclerosis",
            Feature::HistoryOfFalls => "History of falls",
            Feature::Copd => "Chronic obstructive pulmonary disease",
            Feature::PressureUlcer => "Pressure ulcer",
            Feature::Osteoporosis => "Osteoporosis",
            Feature::DegenerativeJointDisease => "Degenerative joint disease",
            Feature::SleepDisorder => "Sleep disorder",
            Feature::Anxiety => "Anxiety",
            Feature::Delirium => "Delirium",
            Feature::Depression => "Depression",
            Feature::HearingImpairment => "Hearing impairment",
            Feature::DrugUrinaryIncontinence => "Urinary incontinence medication",
            Feature::DrugCardiovascular => "Cardiovascular medication",
            Feature::DrugAntithrombotic => "Antithrombotic medication",
            Feature::DrugRenalFailure => "Renal failure medication",
            Feature::DrugChronicPain => "Chronic pain medication",
            Feature::DrugDiabetes => "Diabetes medication",
        }
    }

    /// Accepted integer codes and what each one means.
    pub fn codes(self) -> &'static [(i64, &'static str)] {
        match self {
            Feature::Gender => &[(0, "female"), (1, "male")],
            Feature::RawAge => &[(0, "61-70"), (1, "71-80"), (2, "81-90"), (3, ">=91")],
            Feature::MaritalStatus => &[
                (0, "unmarried, divorced, widowed or living alone"),
                (1, "married"),
            ],
            Feature::Insurance => &[
                (0, "other"),
                (1, "basic medical insurance"),
                (2, "comprehensive medical insurance"),
                (3, "private insurance"),
            ],
            _ => FLAG_CODES,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a known patient feature")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PATIENT: &str = r#"
[demographics]
gender = 1
raw_age = 3
marital_status = 1
insurance = 2

[physiology]
malnutrition = 1
mobility = true
abnormal_liver_function = 0
dysphagia = false
chronic_renal_failure = 1
sarcopenia = 0

[disease_history]
hypertension = 1
coronary_atherosclerosis = 0
history_of_falls = 1
copd = 0
pressure_ulcer = 0
osteoporosis = 0
degenerative_joint_disease = 0

[mental_state]
sleep_disorder = 0
anxiety = 0
delirium = 1
depression = 0
hearing_impairment = 0

[medication]
drug_urinary_incontinence = 0
drug_cardiovascular = 1
drug_antithrombotic = 0
drug_renal_failure = 0
drug_chronic_pain = 0
drug_diabetes = 1
"#;

    #[test]
    fn schema_lists_every_field_once() {
        assert_eq!(Feature::ALL.len(), FEATURE_COUNT);
        let mut names: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn names_parse_back_to_features() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>(), Ok(feature));
        }
        assert!("bmi".parse::<Feature>().is_err());
    }

    #[test]
    fn parses_full_patient_with_mixed_flag_spellings() {
        let vector = FeatureVector::from_toml_str(FULL_PATIENT).expect("patient parses");
        assert_eq!(vector.demographics.gender, Gender::Male);
        assert_eq!(vector.demographics.raw_age, AgeBracket::From91);
        assert_eq!(vector.demographics.insurance, Insurance::Comprehensive);
        assert_eq!(vector.physiology.mobility, Flag::PRESENT);
        assert_eq!(vector.physiology.dysphagia, Flag::ABSENT);
        assert_eq!(vector.value(Feature::RawAge), 3);
        assert_eq!(vector.value(Feature::Delirium), 1);
        assert_eq!(vector.value(Feature::Copd), 0);
        assert_eq!(vector.value(Feature::DrugDiabetes), 1);
    }

    #[test]
    fn rejects_out_of_range_codes() {
        let text = FULL_PATIENT.replace("raw_age = 3", "raw_age = 4");
        let err = FeatureVector::from_toml_str(&text).expect_err("raw_age 4 is invalid");
        assert!(err.to_string().contains("raw_age"), "{err}");

        let text = FULL_PATIENT.replace("delirium = 1", "delirium = 2");
        let err = FeatureVector::from_toml_str(&text).expect_err("flag 2 is invalid");
        assert!(err.to_string().contains("integer `2`, expected 0, 1, true or false"), "{err}");
    }

    #[test]
    fn flag_rejects_words_with_accepted_spellings() {
        let text = FULL_PATIENT.replace("drug_diabetes = 1", "drug_diabetes = \"yes\"");
        let err = FeatureVector::from_toml_str(&text).expect_err("flags are not words");
        let message = err.to_string();
        assert!(message.contains("expected 0, 1, true or false"), "{message}");
        assert!(!message.contains("FlagCode"), "{message}");
        assert!(!message.contains("untagged"), "{message}");
    }

    #[test]
    fn rejects_missing_and_unknown_fields() {
        let missing = FULL_PATIENT.replace("copd = 0\n", "");
        assert!(FeatureVector::from_toml_str(&missing).is_err());

        let extra = FULL_PATIENT.replace("copd = 0\n", "copd = 0\nasthma = 1\n");
        assert!(FeatureVector::from_toml_str(&extra).is_err());
    }

    #[test]
    fn default_vector_codes_everything_as_zero() {
        let vector = FeatureVector::default();
        assert!(Feature::ALL.iter().all(|&feature| vector.value(feature) == 0));
    }

    #[test]
    fn serialized_patient_reads_back_identically() {
        let vector = FeatureVector::from_toml_str(FULL_PATIENT).expect("patient parses");
        let text = toml::to_string(&vector).expect("serialize");
        assert!(text.contains("mobility = 1"), "{text}");
        assert_eq!(FeatureVector::from_toml_str(&text).expect("reparse"), vector);
    }

    #[test]
    fn every_group_has_members() {
        for group in FeatureGroup::ALL {
            assert!(Feature::ALL.iter().any(|f| f.group() == group), "{group:?}");
        }
    }
}
