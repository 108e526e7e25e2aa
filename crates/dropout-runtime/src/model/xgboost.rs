//! Gradient boosted trees read from XGBoost's native JSON model format

use super::{ModelInfo, ProbabilityModel};
use crate::error::{Result, RuntimeError};
use serde::Deserialize;
use std::io::Read;
use tracing::info;

const SUPPORTED_OBJECTIVES: &[&str] = &["multi:softprob", "multi:softmax"];

#[derive(Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
}

#[derive(Deserialize)]
struct LearnerDocument {
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDocument,
    gradient_booster: BoosterDocument,
}

#[derive(Deserialize)]
struct LearnerModelParam {
    #[serde(default)]
    base_score: Option<String>,
    num_class: String,
    num_feature: String,
}

#[derive(Deserialize)]
struct ObjectiveDocument {
    name: String,
}

#[derive(Deserialize)]
struct BoosterDocument {
    name: String,
    #[serde(default)]
    model: Option<TreeModelDocument>,
    /// Inner booster of a dart model
    #[serde(default)]
    gbtree: Option<Box<BoosterDocument>>,
    #[serde(default)]
    weight_drop: Vec<f64>,
}

#[derive(Deserialize)]
struct TreeModelDocument {
    trees: Vec<TreeDocument>,
    tree_info: Vec<i64>,
}

#[derive(Deserialize)]
struct TreeDocument {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<i64>,
}

/// Older exports write flags as 0/1, newer ones as booleans
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Int(i) => *i != 0,
        }
    }
}

/// Regression tree in flat array layout
#[derive(Debug, Clone)]
struct Tree {
    left: Vec<usize>,
    right: Vec<usize>,
    is_leaf: Vec<bool>,
    split_index: Vec<usize>,
    split_condition: Vec<f32>,
    default_left: Vec<bool>,
}

impl Tree {
    fn from_document(doc: TreeDocument, tree: usize, num_features: usize) -> Result<Self> {
        let n = doc.left_children.len();
        let invalid = |reason: String| {
            Err(RuntimeError::InvalidArtifact(format!("tree {}: {}", tree, reason)))
        };

        if n == 0 {
            return invalid("no nodes".to_string());
        }
        if doc.right_children.len() != n
            || doc.split_indices.len() != n
            || doc.split_conditions.len() != n
            || doc.default_left.len() != n
        {
            return invalid("node arrays have different lengths".to_string());
        }
        if doc.split_type.iter().any(|&t| t != 0) {
            return invalid("categorical splits are not supported".to_string());
        }

        let mut out = Tree {
            left: Vec::with_capacity(n),
            right: Vec::with_capacity(n),
            is_leaf: Vec::with_capacity(n),
            split_index: Vec::with_capacity(n),
            split_condition: Vec::with_capacity(n),
            default_left: Vec::with_capacity(n),
        };

        for node in 0..n {
            let leaf = doc.left_children[node] == -1;
            let (left, right, feature) = if leaf {
                (0, 0, 0)
            } else {
                let left = doc.left_children[node];
                let right = doc.right_children[node];
                let feature = doc.split_indices[node];
                // children are always stored after their parent
                for child in [left, right] {
                    if child <= node as i64 || child >= n as i64 {
                        return invalid(format!("node {} has invalid child {}", node, child));
                    }
                }
                if feature < 0 || feature >= num_features as i64 {
                    return invalid(format!(
                        "node {} splits on feature {} but the model has {} features",
                        node, feature, num_features
                    ));
                }
                (left as usize, right as usize, feature as usize)
            };

            out.left.push(left);
            out.right.push(right);
            out.is_leaf.push(leaf);
            out.split_index.push(feature);
            out.split_condition.push(doc.split_conditions[node] as f32);
            out.default_left.push(doc.default_left[node].is_set());
        }

        Ok(out)
    }

    fn leaf_value(&self, features: &[f64]) -> f32 {
        let mut node = 0;
        while !self.is_leaf[node] {
            let value = features[self.split_index[node]];
            let go_left = if value.is_nan() {
                self.default_left[node]
            } else {
                (value as f32) < self.split_condition[node]
            };
            node = if go_left {
                self.left[node]
            } else {
                self.right[node]
            };
        }
        self.split_condition[node]
    }

    fn len(&self) -> usize {
        self.is_leaf.len()
    }
}

/// Multi-class XGBoost booster
#[derive(Debug, Clone)]
pub struct XgbBooster {
    objective: String,
    num_features: usize,
    num_classes: usize,
    base_score: Vec<f64>,
    trees: Vec<Tree>,
    tree_class: Vec<usize>,
    tree_weight: Vec<f64>,
}

impl XgbBooster {
    /// Parse a model saved with `save_model("model.json")`
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    fn from_document(doc: ModelDocument) -> Result<Self> {
        let learner = doc.learner;

        let objective = learner.objective.name;
        if !SUPPORTED_OBJECTIVES.contains(&objective.as_str()) {
            return Err(RuntimeError::UnsupportedObjective(objective));
        }

        let params = learner.learner_model_param;
        let num_classes = parse_count("num_class", &params.num_class)?;
        let num_features = parse_count("num_feature", &params.num_feature)?;
        if num_classes < 2 {
            return Err(RuntimeError::InvalidArtifact(format!(
                "multi-class objective with num_class = {}",
                num_classes
            )));
        }
        let base_score = parse_base_score(params.base_score.as_deref(), num_classes)?;

        let (model, weight_drop) = match learner.gradient_booster.name.as_str() {
            "gbtree" => (learner.gradient_booster.model, None),
            "dart" => {
                let inner = learner.gradient_booster.gbtree.ok_or_else(|| {
                    RuntimeError::InvalidArtifact("dart booster without inner gbtree".to_string())
                })?;
                (inner.model, Some(learner.gradient_booster.weight_drop))
            }
            other => {
                return Err(RuntimeError::InvalidArtifact(format!(
                    "unsupported booster '{}'",
                    other
                )))
            }
        };
        let model = model.ok_or_else(|| {
            RuntimeError::InvalidArtifact("booster has no tree model".to_string())
        })?;

        if model.tree_info.len() != model.trees.len() {
            return Err(RuntimeError::InvalidArtifact(format!(
                "{} trees but {} tree_info entries",
                model.trees.len(),
                model.tree_info.len()
            )));
        }

        let tree_class = model
            .tree_info
            .iter()
            .map(|&class| {
                if class < 0 || class >= num_classes as i64 {
                    Err(RuntimeError::InvalidArtifact(format!(
                        "tree_info names class {} but the model has {} classes",
                        class, num_classes
                    )))
                } else {
                    Ok(class as usize)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let tree_weight = match weight_drop {
            Some(weights) if weights.len() == model.trees.len() => weights,
            Some(weights) => {
                return Err(RuntimeError::InvalidArtifact(format!(
                    "{} trees but {} dart weights",
                    model.trees.len(),
                    weights.len()
                )))
            }
            None => vec![1.0; model.trees.len()],
        };

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| Tree::from_document(tree, i, num_features))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loaded XGBoost model: objective={}, {} classes, {} features, {} trees",
            objective,
            num_classes,
            num_features,
            trees.len()
        );

        Ok(Self {
            objective,
            num_features,
            num_classes,
            base_score,
            trees,
            tree_class,
            tree_weight,
        })
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.trees.iter().map(Tree::len).sum()
    }

    /// Raw per-class margins before soft-max
    pub fn margins(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.num_features {
            return Err(RuntimeError::FeatureWidthMismatch {
                expected: self.num_features,
                actual: features.len(),
            });
        }

        let mut margins = self.base_score.clone();
        for ((tree, &class), &weight) in self.trees.iter().zip(&self.tree_class).zip(&self.tree_weight) {
            margins[class] += weight * f64::from(tree.leaf_value(features));
        }
        Ok(margins)
    }
}

impl ProbabilityModel for XgbBooster {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            kind: "xgboost".to_string(),
            objective: self.objective.clone(),
            num_features: self.num_features,
            num_classes: self.num_classes,
            num_trees: Some(self.trees.len()),
        }
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        let margins = self.margins(features)?;
        softmax(&margins)
    }
}

fn softmax(margins: &[f64]) -> Result<Vec<f64>> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(RuntimeError::InvalidModelOutput(format!(
            "non-finite margins {:?}",
            margins
        )));
    }
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}

fn parse_count(name: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        RuntimeError::InvalidArtifact(format!("{} is not a count: '{}'", name, value))
    })
}

/// `base_score` is either a scalar ("5E-1") or, in newer exports, a
/// bracketed per-class vector ("[5E-1,5E-1,5E-1]")
fn parse_base_score(value: Option<&str>, num_classes: usize) -> Result<Vec<f64>> {
    let Some(value) = value else {
        return Ok(vec![0.5; num_classes]);
    };

    let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
    let scores = inner
        .split(',')
        .map(|s| {
            s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                RuntimeError::InvalidArtifact(format!("invalid base_score '{}'", value))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    match scores.len() {
        1 => Ok(vec![scores[0]; num_classes]),
        n if n == num_classes => Ok(scores),
        n => Err(RuntimeError::InvalidArtifact(format!(
            "base_score has {} values for {} classes",
            n, num_classes
        ))),
    }
}
