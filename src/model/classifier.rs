//! Classifier adapter over fitted decision-forest artifacts.

use std::collections::BTreeMap;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Single-row classification seam. The fitted model stays a black box
/// behind this trait; the pipeline only sees width and integer output.
pub trait Classify: Send + Sync {
    /// Input width the model was fitted on.
    fn n_features(&self) -> usize;
    /// Predict an integer class id for one composed row.
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<i64, PipelineError>;
}

/// One node of a fitted binary decision tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class_id: i64,
    },
}

/// A fitted decision tree stored as a flat node arena rooted at index 0.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to a leaf. NaN inputs fail the `<=` split test
    /// and route right, so missing values traverse deterministically.
    fn decide(&self, row: ArrayView1<'_, f64>) -> Result<i64, PipelineError> {
        let mut idx = 0usize;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value =
                        row.get(*feature)
                            .copied()
                            .ok_or(PipelineError::ShapeMismatch {
                                stage: "tree split feature",
                                expected: *feature + 1,
                                actual: row.len(),
                            })?;
                    idx = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { class_id }) => return Ok(*class_id),
                None => {
                    return Err(PipelineError::ShapeMismatch {
                        stage: "tree node index",
                        expected: self.nodes.len(),
                        actual: idx,
                    })
                }
            }
        }
        // A traversal longer than the node count means a cycle in the
        // fitted artifact.
        Err(PipelineError::ShapeMismatch {
            stage: "tree traversal",
            expected: self.nodes.len(),
            actual: idx,
        })
    }
}

/// Majority-vote forest loaded from a JSON artifact.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForestClassifier {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    /// Reject structurally broken artifacts once at load time.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.trees.is_empty() {
            return Err(PipelineError::ShapeMismatch {
                stage: "classifier forest",
                expected: 1,
                actual: 0,
            });
        }
        for tree in &self.trees {
            if tree.nodes.is_empty() {
                return Err(PipelineError::ShapeMismatch {
                    stage: "tree node arena",
                    expected: 1,
                    actual: 0,
                });
            }
            for node in &tree.nodes {
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.n_features {
                        return Err(PipelineError::ShapeMismatch {
                            stage: "tree split feature",
                            expected: self.n_features,
                            actual: *feature + 1,
                        });
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        return Err(PipelineError::ShapeMismatch {
                            stage: "tree node index",
                            expected: tree.nodes.len(),
                            actual: (*left).max(*right),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Classify for ForestClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<i64, PipelineError> {
        if row.len() != self.n_features {
            return Err(PipelineError::ShapeMismatch {
                stage: "classifier input",
                expected: self.n_features,
                actual: row.len(),
            });
        }
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.decide(row)?).or_insert(0) += 1;
        }
        // Ties break towards the smallest class id: ascending iteration
        // plus a strict comparison keeps the first maximum.
        let mut best: Option<(i64, usize)> = None;
        for (class_id, count) in votes {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((class_id, count));
            }
        }
        best.map(|(class_id, _)| class_id)
            .ok_or(PipelineError::ShapeMismatch {
                stage: "classifier forest",
                expected: 1,
                actual: 0,
            })
    }
}
