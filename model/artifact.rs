use super::step::StepFunction;
use serde::{Deserialize, Serialize};

fn default_horizon_days() -> f64 {
    crate::evaluate::ONE_YEAR_HORIZON_DAYS
}

/// The serialized survival model as written by the training pipeline.
///
/// `feature_names` is the canonical input order. Every per-feature quantity
/// below (coefficients, split feature indices) is indexed in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurvivalArtifact {
    pub feature_names: Vec<String>,
    /// Horizon the model was validated at. Informational; the evaluator always
    /// reports at one year.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: f64,
    pub family: ModelFamily,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFamily {
    /// `H(t | x) = H0(t) * exp(beta . x)`.
    ProportionalHazards {
        coefficients: Vec<f64>,
        baseline: StepFunction,
    },
    /// Ensemble of survival trees; `H(t | x)` is the mean of the cumulative
    /// hazards stored in the leaves `x` falls into.
    SurvivalForest { trees: Vec<SurvivalTree> },
}

impl ModelFamily {
    pub fn name(&self) -> &'static str {
        match self {
            ModelFamily::ProportionalHazards { .. } => "proportional_hazards",
            ModelFamily::SurvivalForest { .. } => "survival_forest",
        }
    }
}

/// A binary tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurvivalTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    /// Values `<= threshold` descend to `left`, the rest to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { hazard: StepFunction },
}

impl SurvivalTree {
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, TreeNode::Leaf { .. }))
            .count()
    }

    /// Follows splits from the root to the leaf `values` falls into. Returns
    /// `None` if the node list is malformed.
    pub fn leaf_for(&self, values: &[f64]) -> Option<&StepFunction> {
        let mut index = 0usize;
        // Each step moves to a strictly larger index in a validated tree, so a
        // walk longer than the node count means the tree is corrupt.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index)? {
                TreeNode::Leaf { hazard } => return Some(hazard),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = *values.get(*feature)?;
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
        None
    }
}
