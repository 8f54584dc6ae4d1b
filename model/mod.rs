//! The survival model collaborator: the artifact format, its validation, and
//! the process-wide cache the serving process reads it through.

mod artifact;
mod cache;
mod step;

pub use artifact::{ModelFamily, SurvivalArtifact, SurvivalTree, TreeNode};
pub use cache::shared_model;
pub use step::{StepFunction, StepFunctionError};

use crate::evaluate::PredictionError;
use crate::order::{CanonicalOrder, SchemaMismatch};
use log::info;
use ndarray::{Array1, ArrayView1};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Anything that can turn an ordered feature row into a cumulative hazard curve.
pub trait RiskModel {
    /// Column names in the order `cumulative_hazard` expects its values.
    fn feature_order(&self) -> &[String];

    fn cumulative_hazard(&self, values: &[i64]) -> Result<StepFunction, PredictionError>;
}

/// Errors raised while loading, validating or caching a model artifact. All of
/// them are fatal at startup.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read or write model file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML model file: {0}")]
    TomlParseError(#[from] toml::de::Error),
    #[error("Failed to serialize model to TOML format: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
    #[error("Model feature order does not match the patient schema: {0}")]
    Schema(#[from] SchemaMismatch),
    #[error("Model has {coefficients} coefficients but {features} features.")]
    CoefficientCount { coefficients: usize, features: usize },
    #[error("Coefficient for '{feature}' is not finite ({value}).")]
    NonFiniteCoefficient { feature: String, value: f64 },
    #[error("Survival forest contains no trees.")]
    EmptyForest,
    #[error("Tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
    #[error(
        "A model from '{loaded}' is already cached for this process; refusing to load '{requested}'."
    )]
    AlreadyLoaded { loaded: PathBuf, requested: PathBuf },
}

/// A validated survival artifact paired with its resolved feature order.
#[derive(Debug, Clone)]
pub struct SurvivalModel {
    artifact: SurvivalArtifact,
    order: CanonicalOrder,
}

impl SurvivalModel {
    pub fn from_artifact(artifact: SurvivalArtifact) -> Result<Self, ModelError> {
        let order = CanonicalOrder::resolve(&artifact.feature_names)?;
        validate_family(&artifact, order.len())?;
        Ok(Self { artifact, order })
    }

    /// Loads and validates a TOML model artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let toml_string = fs::read_to_string(path)?;
        let artifact: SurvivalArtifact = toml::from_str(&toml_string)?;
        let model = Self::from_artifact(artifact)?;
        info!(
            "Loaded {} model with {} features from {}",
            model.artifact.family.name(),
            model.order.len(),
            path.display()
        );
        Ok(model)
    }

    /// Writes the artifact in the same human-readable TOML format `load` reads.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let toml_string = toml::to_string_pretty(&self.artifact)?;
        let mut file = BufWriter::new(fs::File::create(path)?);
        file.write_all(toml_string.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn artifact(&self) -> &SurvivalArtifact {
        &self.artifact
    }

    pub fn canonical_order(&self) -> &CanonicalOrder {
        &self.order
    }
}

impl RiskModel for SurvivalModel {
    fn feature_order(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn cumulative_hazard(&self, values: &[i64]) -> Result<StepFunction, PredictionError> {
        if values.len() != self.order.len() {
            return Err(PredictionError::FeatureCount {
                expected: self.order.len(),
                found: values.len(),
            });
        }
        let x: Array1<f64> = values.iter().map(|&v| v as f64).collect();
        match &self.artifact.family {
            ModelFamily::ProportionalHazards {
                coefficients,
                baseline,
            } => {
                let linear_predictor = x.dot(&ArrayView1::from(coefficients.as_slice()));
                baseline
                    .scaled(linear_predictor.exp())
                    .map_err(|e| PredictionError::Model(e.to_string()))
            }
            ModelFamily::SurvivalForest { trees } => {
                let row = x.to_vec();
                let leaves = trees
                    .iter()
                    .enumerate()
                    .map(|(i, tree)| {
                        tree.leaf_for(&row).ok_or_else(|| {
                            PredictionError::Model(format!("tree {i} has no leaf for this patient"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                StepFunction::mean_of(&leaves).map_err(|e| PredictionError::Model(e.to_string()))
            }
        }
    }
}

fn validate_family(artifact: &SurvivalArtifact, feature_count: usize) -> Result<(), ModelError> {
    match &artifact.family {
        ModelFamily::ProportionalHazards { coefficients, .. } => {
            if coefficients.len() != feature_count {
                return Err(ModelError::CoefficientCount {
                    coefficients: coefficients.len(),
                    features: feature_count,
                });
            }
            for (name, &value) in artifact.feature_names.iter().zip(coefficients) {
                if !value.is_finite() {
                    return Err(ModelError::NonFiniteCoefficient {
                        feature: name.clone(),
                        value,
                    });
                }
            }
        }
        ModelFamily::SurvivalForest { trees } => {
            if trees.is_empty() {
                return Err(ModelError::EmptyForest);
            }
            for (tree_index, tree) in trees.iter().enumerate() {
                validate_tree(tree, feature_count).map_err(|reason| ModelError::MalformedTree {
                    tree: tree_index,
                    reason,
                })?;
            }
        }
    }
    Ok(())
}

fn validate_tree(tree: &SurvivalTree, feature_count: usize) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("no nodes".to_string());
    }
    for (index, node) in tree.nodes.iter().enumerate() {
        if let TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        } = node
        {
            if *feature >= feature_count {
                return Err(format!(
                    "node {index} splits on feature {feature} but the model has {feature_count}"
                ));
            }
            if !threshold.is_finite() {
                return Err(format!("node {index} has a non-finite threshold"));
            }
            for child in [*left, *right] {
                if child <= index || child >= tree.nodes.len() {
                    return Err(format!(
                        "node {index} points to node {child}, which is not a later node in the tree"
                    ));
                }
            }
        }
    }
    Ok(())
}
