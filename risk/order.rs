use crate::features::{Feature, FeatureVector};
use ahash::AHashSet;
use itertools::Itertools;
use thiserror::Error;

/// The canonical feature order did not describe the patient schema exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("The model's feature order names '{0}', which is not a patient feature.")]
    UnknownField(String),
    #[error("The model's feature order omits the patient feature '{0}'.")]
    MissingField(Feature),
    #[error("The model's feature order lists '{0}' more than once.")]
    DuplicateField(Feature),
}

/// A validated permutation of the patient schema, in the order the trained
/// model consumes its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalOrder {
    features: Vec<Feature>,
}

impl CanonicalOrder {
    /// Resolves raw column names into a canonical order. Every schema field must
    /// appear exactly once and nothing else may appear.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Self, SchemaMismatch> {
        let mut seen = AHashSet::with_capacity(names.len());
        let mut features = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let feature: Feature = name
                .parse()
                .map_err(|_| SchemaMismatch::UnknownField(name.to_string()))?;
            if !seen.insert(feature) {
                return Err(SchemaMismatch::DuplicateField(feature));
            }
            features.push(feature);
        }
        if let Some(&missing) = Feature::ALL.iter().find(|f| !seen.contains(*f)) {
            return Err(SchemaMismatch::MissingField(missing));
        }
        Ok(Self { features })
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The patient's codes laid out in this order.
    pub fn arrange(&self, vector: &FeatureVector) -> Vec<i64> {
        self.features
            .iter()
            .map(|&feature| vector.value(feature))
            .collect_vec()
    }
}

/// Lays out `vector` in the order given by `names`, so that element `i` is the
/// patient's code for `names[i]`.
pub fn order_features<S: AsRef<str>>(
    vector: &FeatureVector,
    names: &[S],
) -> Result<Vec<i64>, SchemaMismatch> {
    let order = CanonicalOrder::resolve(names)?;
    Ok(order.arrange(vector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{AgeBracket, Flag, Gender, Insurance};

    fn collection_order() -> Vec<String> {
        Feature::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }

    fn distinctive_patient() -> FeatureVector {
        let mut vector = FeatureVector::default();
        vector.demographics.gender = Gender::Male;
        vector.demographics.raw_age = AgeBracket::From81To90;
        vector.demographics.insurance = Insurance::Private;
        vector.physiology.sarcopenia = Flag::PRESENT;
        vector.mental_state.delirium = Flag::PRESENT;
        vector.medication.drug_diabetes = Flag::PRESENT;
        vector
    }

    #[test]
    fn reversed_order_maps_each_slot_to_its_field() {
        let vector = distinctive_patient();
        let mut names = collection_order();
        names.reverse();
        let values = order_features(&vector, &names).expect("valid permutation");
        assert_eq!(values.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            let feature: Feature = name.parse().expect("known feature");
            assert_eq!(values[i], vector.value(feature), "slot {i} ({name})");
        }
        assert_eq!(values[0], 1);
        assert_eq!(values[names.len() - 1], 1);
        assert_eq!(values[names.len() - 2], 2);
        assert_eq!(values[names.len() - 4], 3);
    }

    #[test]
    fn rotated_order_preserves_correspondence() {
        let vector = distinctive_patient();
        let mut names = collection_order();
        names.rotate_left(7);
        let order = CanonicalOrder::resolve(&names).expect("valid permutation");
        let values = order.arrange(&vector);
        for (slot, feature) in order.features().iter().enumerate() {
            assert_eq!(values[slot], vector.value(*feature));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let mut names = collection_order();
        names[5] = "body_mass_index".to_string();
        let err = order_features(&FeatureVector::default(), &names).expect_err("unknown name");
        assert_eq!(err, SchemaMismatch::UnknownField("body_mass_index".to_string()));
    }

    #[test]
    fn extra_name_is_rejected() {
        let mut names = collection_order();
        names.push("frailty_index".to_string());
        assert!(matches!(
            CanonicalOrder::resolve(&names),
            Err(SchemaMismatch::UnknownField(name)) if name == "frailty_index"
        ));
    }

    #[test]
    fn omitted_name_is_rejected() {
        let names: Vec<String> = collection_order()
            .into_iter()
            .filter(|name| name != "copd")
            .collect();
        assert_eq!(
            CanonicalOrder::resolve(&names),
            Err(SchemaMismatch::MissingField(Feature::Copd))
        );
    }

    #[test]
    fn duplicated_name_is_rejected() {
        let mut names = collection_order();
        names[3] = "gender".to_string();
        assert_eq!(
            CanonicalOrder::resolve(&names),
            Err(SchemaMismatch::DuplicateField(Feature::Gender))
        );
    }
}
