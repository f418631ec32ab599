//! This module implements a decision tree on top of the simple binary tree [dtree::binary_tree].
//!
//! In the training process, the nodes are splited according to the best split found by
//! [dtree::split]: variance reduction for a numeric target, information gain for a categorical
//! one. The tree is grown level by level from a root holding the whole training partition.
//!
//! A node becomes a leaf when
//!
//! 1. it holds fewer than `min_split_size` rows (default = 10),
//!
//! 2. its target is pure (zero variance or zero entropy),
//!
//! 3. no split improves its impurity,
//!
//! 4. it sits at `max_depth` (the root is at depth 0), or
//!
//! 5. the tree already has `max_leaves` leaves when the node's level is expanded.
//!
//! A leaf predicts the mean target of its rows, or their most frequent label.
//!
//! With `random_subset` enabled every node only considers `floor(log2(n + 1))` features drawn
//! at random out of the `n` features of the table.
//!
//! [dtree::binary_tree]: ../binary_tree/index.html
//! [dtree::split]: ../split/index.html
//!
//! # Example
//! ```
//! use dtree::dataset::{DataSet, Observation};
//! use dtree::decision_tree::DecisionTree;
//!
//! // values below 5 are "A", the others "B"
//! let xs: Vec<f64> = (0..12).map(|i| i as f64).collect();
//! let labels: Vec<&str> = xs.iter().map(|x| if *x < 5.0 { "A" } else { "B" }).collect();
//! let mut data = DataSet::new("lbl");
//! data.add_numeric("x", xs).unwrap();
//! data.add_categorical("lbl", &labels).unwrap();
//!
//! let mut tree = DecisionTree::new();
//! tree.fit(&data).unwrap();
//! assert_eq!(tree.len(), 3);
//!
//! let point = Observation::new().with_numeric("x", 7.5);
//! assert_eq!(tree.classify(&point).unwrap(), "B");
//!
//! tree.print();
//! // output:
//! // [LEVEL: 0]
//! // node with 12 rows split on x > 4.5 (score 0.979...)
//! // [LEVEL: 1]
//! // leaf with 5 rows predicting A
//! // leaf with 7 rows predicting B
//! ```

use std::fmt;

use log::debug;
use rayon::prelude::*;

use crate::binary_tree::{BinaryTree, BinaryTreeNode, TreeIndex};
use crate::config::{Config, Criterion, DEFAULT_MIN_SPLIT_SIZE};
use crate::dataset::{DataSet, FeatureLookup};
use crate::errors::{Result, TreeError, ValueKind};
use crate::fitness::{majority, mean};
use crate::sampling::{feature_subset_size, RandomSampler, Sampler};
use crate::split::{best_split, SplitRule, Target};

/// The prediction held by a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafValue {
    /// Mean target of a regression node.
    Mean(f64),
    /// Majority label of a classification node.
    Label(String),
}

impl LeafValue {
    pub fn as_mean(&self) -> Option<f64> {
        match self {
            LeafValue::Mean(v) => Some(*v),
            LeafValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            LeafValue::Mean(_) => None,
            LeafValue::Label(l) => Some(l),
        }
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeafValue::Mean(v) => write!(f, "{}", v),
            LeafValue::Label(l) => write!(f, "{}", l),
        }
    }
}

impl Target {
    /// Mean or majority label of `rows`.
    fn leaf_value(&self, rows: &[usize]) -> Result<LeafValue> {
        if rows.is_empty() {
            return Err(TreeError::EmptyInput("a tree node needs at least one row"));
        }
        match self {
            Target::Continuous(y) => Ok(LeafValue::Mean(mean(y, rows))),
            Target::Labels(labels) => {
                let code = majority(labels.codes(), rows, labels.levels().len())
                    .ok_or(TreeError::EmptyInput("a tree node needs at least one row"))?;
                Ok(LeafValue::Label(labels.levels()[code].clone()))
            }
        }
    }
}

/// A node of the decision tree. It's stored in the `value` of the dtree::binary_tree::BinaryTreeNode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// rows of the training partition that reached this node; not persisted
    #[serde(skip)]
    rows: Vec<usize>,
    /// number of training rows
    size: usize,
    /// the split of an internal node, `None` for a leaf
    rule: Option<SplitRule>,
    /// improvement achieved by `rule`, 0 for a leaf
    score: f64,
    /// mean or majority of the node's rows
    value: LeafValue,
    depth: u32,
}

impl TreeNode {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rule(&self) -> Option<&SplitRule> {
        self.rule.as_ref()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn value(&self) -> &LeafValue {
        &self.value
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.rule.is_none()
    }

    fn make_leaf(&mut self) {
        self.rule = None;
        self.score = 0.0;
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.rule {
            None => write!(f, "leaf with {} rows predicting {}", self.size, self.value),
            Some(rule) => write!(
                f,
                "node with {} rows split on {} (score {})",
                self.size, rule, self.score
            ),
        }
    }
}

/// Stopping rules applied when a node is resolved.
#[derive(Debug, Clone, Copy)]
struct StopRules {
    min_split_size: usize,
    max_depth: Option<u32>,
}

/// Build a node over `rows` and decide whether it is a leaf or which split it uses.
fn resolve_node(
    stop: StopRules,
    data: &DataSet,
    target: &Target,
    rows: Vec<usize>,
    depth: u32,
    features: &[String],
) -> Result<TreeNode> {
    let value = target.leaf_value(&rows)?;
    let mut node = TreeNode {
        size: rows.len(),
        rows,
        rule: None,
        score: 0.0,
        value,
        depth,
    };

    let at_max_depth = stop.max_depth.map_or(false, |d| depth >= d);
    if node.size < stop.min_split_size || at_max_depth || target.impurity(&node.rows) <= 0.0 {
        return Ok(node);
    }

    if let Some(candidate) = best_split(data, target, &node.rows, features)? {
        node.rule = Some(candidate.rule);
        node.score = candidate.score;
    }
    debug!("depth {}: {}", depth, node);
    Ok(node)
}

/// The decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// the tree
    tree: BinaryTree<TreeNode>,
    /// variance for regression trees, entropy for classification trees
    criterion: Criterion,
    /// the features of the training table, in declaration order
    features: Vec<String>,
    /// nodes with fewer rows become leaves
    min_split_size: usize,
    /// the max depth of the decision tree. The root node is considered to be in the layer 0.
    max_depth: Option<u32>,
    /// the maximum number of leaves
    max_leaves: Option<usize>,
    /// draw a random feature subset at every node
    random_subset: bool,
    /// seed used by `fit` when no sampler is given
    seed: Option<u64>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Return a new decision tree with default values (min_split_size = 10, no depth or leaf
    /// cap, all features visible at every node).
    pub fn new() -> Self {
        DecisionTree {
            tree: BinaryTree::new(),
            criterion: Criterion::Variance,
            features: Vec::new(),
            min_split_size: DEFAULT_MIN_SPLIT_SIZE,
            max_depth: None,
            max_leaves: None,
            random_subset: false,
            seed: None,
        }
    }

    /// Take the tree settings from `conf`.
    pub fn from_config(conf: &Config) -> Self {
        DecisionTree {
            min_split_size: conf.min_split_size,
            max_depth: conf.max_depth,
            max_leaves: conf.max_leaves,
            random_subset: conf.random_subset,
            seed: conf.seed,
            ..Self::new()
        }
    }

    pub fn set_min_split_size(&mut self, size: usize) {
        self.min_split_size = size;
    }

    /// Set the max depth of the decision tree. The root node is considered to be in the layer 0.
    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = Some(max_depth);
    }

    pub fn set_max_leaves(&mut self, max_leaves: usize) {
        self.max_leaves = Some(max_leaves);
    }

    pub fn set_random_subset(&mut self, option: bool) {
        self.random_subset = option;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Fit the tree to all rows of `data`. A numeric target column grows a regression tree, a
    /// categorical one a classification tree.
    pub fn fit(&mut self, data: &DataSet) -> Result<()> {
        let target = Target::from_dataset(data)?;
        let rows = data.all_rows();
        let mut sampler = RandomSampler::new(self.seed);
        self.fit_target(data, &target, &rows, &mut sampler)
    }

    /// Fit the tree to the `rows` of `data`. Rows may repeat.
    pub fn fit_rows(&mut self, data: &DataSet, rows: &[usize], sampler: &mut dyn Sampler) -> Result<()> {
        let target = Target::from_dataset(data)?;
        self.fit_target(data, &target, rows, sampler)
    }

    /// Fit the tree to an explicit `target`, one value per row of `data`, over the partition
    /// `rows`. The target column of `data` is ignored.
    pub fn fit_target(
        &mut self,
        data: &DataSet,
        target: &Target,
        rows: &[usize],
        sampler: &mut dyn Sampler,
    ) -> Result<()> {
        if rows.is_empty() {
            return Err(TreeError::EmptyInput("cannot fit a tree on an empty partition"));
        }
        if target.len() != data.len() {
            return Err(TreeError::Schema(format!(
                "target has {} values but the table has {} rows",
                target.len(),
                data.len()
            )));
        }
        if let Some(row) = rows.iter().find(|r| **r >= data.len()) {
            return Err(TreeError::Schema(format!(
                "row {} is out of range for a table of {} rows",
                row,
                data.len()
            )));
        }
        if self.max_leaves == Some(0) {
            return Err(TreeError::Configuration(
                "max_leaves must be at least 1".to_string(),
            ));
        }

        self.criterion = target.criterion();
        self.features = data.feature_names().iter().map(|f| f.to_string()).collect();
        self.tree = BinaryTree::new();
        let stop = StopRules {
            min_split_size: self.min_split_size,
            max_depth: self.max_depth,
        };

        let visible = self.visible_features(sampler);
        let root = resolve_node(stop, data, target, rows.to_vec(), 0, &visible)?;
        let root_index = self.tree.add_root(BinaryTreeNode::new(root));

        let mut leaves: usize = 1;
        let mut current: Vec<TreeIndex> = vec![root_index];
        while !current.is_empty() {
            // Split the internal nodes of this level until the leaf cap is hit.
            let mut expanded: Vec<TreeIndex> = Vec::new();
            let mut jobs: Vec<(Vec<usize>, u32, Vec<String>)> = Vec::new();
            for index in current.iter() {
                let (rule, depth) = match self.tree.get_node(*index) {
                    Some(node) => match &node.value.rule {
                        Some(rule) => (rule.clone(), node.value.depth),
                        None => continue,
                    },
                    None => continue,
                };
                if self.max_leaves.map_or(false, |max| leaves >= max) {
                    if let Some(node) = self.tree.get_node_mut(*index) {
                        node.value.make_leaf();
                    }
                    continue;
                }
                let (left, right) = match self.tree.get_node(*index) {
                    Some(node) => rule.partition(data, &node.value.rows)?,
                    None => continue,
                };
                leaves += 1;
                expanded.push(*index);
                jobs.push((left, depth + 1, self.visible_features(sampler)));
                jobs.push((right, depth + 1, self.visible_features(sampler)));
            }

            // Children are independent once their rows and features are known.
            let resolved: Vec<Result<TreeNode>> = jobs
                .into_par_iter()
                .map(|(rows, depth, features)| resolve_node(stop, data, target, rows, depth, &features))
                .collect();

            let mut next: Vec<TreeIndex> = Vec::with_capacity(resolved.len());
            let mut resolved = resolved.into_iter();
            for parent in expanded.into_iter() {
                if let (Some(left), Some(right)) = (resolved.next(), resolved.next()) {
                    next.push(self.tree.add_left_node(parent, BinaryTreeNode::new(left?)));
                    next.push(self.tree.add_right_node(parent, BinaryTreeNode::new(right?)));
                }
            }
            current = next;
        }

        debug!(
            "fit {} tree: {} nodes, {} leaves, depth {}",
            self.criterion,
            self.len(),
            self.leaf_count(),
            self.depth()
        );
        Ok(())
    }

    /// The features a node may split on: all of them, or a fresh random subset.
    fn visible_features(&self, sampler: &mut dyn Sampler) -> Vec<String> {
        if self.random_subset {
            sampler.sample_names(&self.features, feature_subset_size(self.features.len()))
        } else {
            self.features.clone()
        }
    }

    /// Index of the leaf a point is routed to.
    pub fn leaf_index<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<TreeIndex> {
        let mut node = self
            .tree
            .get_root()
            .ok_or(TreeError::EmptyInput("the tree has not been fit"))?;
        while let Some(rule) = &node.value.rule {
            let child = if rule.route(point)? {
                self.tree.get_right_child(node)
            } else {
                self.tree.get_left_child(node)
            };
            node = child.ok_or_else(|| {
                TreeError::Schema(format!("internal node {} has no child", node.index()))
            })?;
        }
        Ok(node.index())
    }

    /// Route a point from the root to a leaf and return the leaf's value.
    pub fn predict<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<&LeafValue> {
        let index = self.leaf_index(point)?;
        self.tree
            .get_node(index)
            .map(|n| &n.value.value)
            .ok_or(TreeError::EmptyInput("the tree has not been fit"))
    }

    /// Regression prediction of a point.
    pub fn predict_value<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<f64> {
        match self.predict(point)? {
            LeafValue::Mean(v) => Ok(*v),
            LeafValue::Label(_) => Err(TreeError::type_mismatch(
                "prediction",
                ValueKind::Numeric,
                ValueKind::Categorical,
            )),
        }
    }

    /// Classification of a point.
    pub fn classify<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<String> {
        match self.predict(point)? {
            LeafValue::Label(l) => Ok(l.clone()),
            LeafValue::Mean(_) => Err(TreeError::type_mismatch(
                "prediction",
                ValueKind::Categorical,
                ValueKind::Numeric,
            )),
        }
    }

    /// Predict row `row` of `data`.
    pub fn predict_row(&self, data: &DataSet, row: usize) -> Result<&LeafValue> {
        self.predict(&data.row(row))
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// The features of the training table.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.tree.get_root().map(|n| &n.value)
    }

    pub fn node(&self, index: TreeIndex) -> Option<&TreeNode> {
        self.tree.get_node(index).map(|n| &n.value)
    }

    pub fn left(&self, index: TreeIndex) -> Option<TreeIndex> {
        self.tree.get_node(index).and_then(|n| n.left())
    }

    pub fn right(&self, index: TreeIndex) -> Option<TreeIndex> {
        self.tree.get_node(index).and_then(|n| n.right())
    }

    /// All nodes with their index, in construction order. The root has index 0.
    pub fn nodes(&self) -> impl Iterator<Item = (TreeIndex, &TreeNode)> + '_ {
        self.tree.iter().map(|n| (n.index(), &n.value))
    }

    /// Node indices by level, root first.
    pub fn levels(&self) -> Vec<Vec<TreeIndex>> {
        self.tree.levels()
    }

    pub fn leaf_count(&self) -> usize {
        self.tree.iter().filter(|n| n.value.is_leaf()).count()
    }

    /// Depth of the deepest node. A single leaf has depth 0.
    pub fn depth(&self) -> u32 {
        self.tree.iter().map(|n| n.value.depth).max().unwrap_or(0)
    }

    /// For debug use. Print the tree level by level.
    pub fn print(&self) {
        println!("{}", self);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// For debug use. Return the number of nodes in current decision tree
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the current decision tree is empty
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (level, indices) in self.tree.levels().iter().enumerate() {
            writeln!(f, "[LEVEL: {}]", level)?;
            for index in indices.iter() {
                if let Some(node) = self.tree.get_node(*index) {
                    writeln!(f, "{}", node.value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Observation;
    use approx::assert_abs_diff_eq;

    fn threshold_data() -> DataSet {
        let xs: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let labels: Vec<&str> = xs
            .iter()
            .map(|x| if *x < 5.0 { "A" } else { "B" })
            .collect();
        let mut data = DataSet::new("lbl");
        data.add_numeric("x", xs).unwrap();
        data.add_categorical("lbl", &labels).unwrap();
        data
    }

    fn step_data(n: usize) -> DataSet {
        // y = 1 on x < n/4, 5 on x < n/2, 9 on x < 3n/4, 13 above
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..n).map(|i| 1.0 + 4.0 * (4 * i / n) as f64).collect();
        let mut data = DataSet::new("y");
        data.add_numeric("x", xs).unwrap();
        data.add_numeric("y", ys).unwrap();
        data
    }

    #[test]
    fn separable_labels_give_one_split() {
        let data = threshold_data();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.criterion(), Criterion::Entropy);
        let root = tree.root().unwrap();
        assert_eq!(
            root.rule(),
            Some(&SplitRule::Numeric {
                feature: "x".to_string(),
                threshold: 4.5
            })
        );
        let left = tree.node(tree.left(0).unwrap()).unwrap();
        let right = tree.node(tree.right(0).unwrap()).unwrap();
        assert_eq!(left.value(), &LeafValue::Label("A".to_string()));
        assert_eq!(right.value(), &LeafValue::Label("B".to_string()));
        assert!(left.is_leaf() && right.is_leaf());

        for row in 0..data.len() {
            let expected = if row < 5 { "A" } else { "B" };
            assert_eq!(tree.classify(&data.row(row)).unwrap(), expected);
        }
    }

    #[test]
    fn constant_target_is_a_single_leaf() {
        let mut data = DataSet::new("y");
        data.add_numeric("x", (0..20).map(|i| i as f64).collect())
            .unwrap();
        data.add_numeric("y", vec![3.0; 20]).unwrap();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        assert_eq!(tree.len(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.score(), 0.0);
        let point = Observation::new().with_numeric("x", 100.0);
        assert_abs_diff_eq!(tree.predict_value(&point).unwrap(), 3.0);
    }

    #[test]
    fn small_partitions_are_leaves() {
        let mut data = DataSet::new("y");
        data.add_numeric("x", (0..9).map(|i| i as f64).collect())
            .unwrap();
        data.add_numeric("y", (0..9).map(|i| (i * i) as f64).collect())
            .unwrap();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        assert_eq!(tree.len(), 1);
        assert_abs_diff_eq!(tree.root().unwrap().value().as_mean().unwrap(), 204.0 / 9.0);
    }

    #[test]
    fn regression_tree_learns_steps() {
        let data = step_data(80);
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.depth(), 2);
        for row in 0..data.len() {
            let expected = 1.0 + 4.0 * (4 * row / 80) as f64;
            assert_abs_diff_eq!(tree.predict_row(&data, row).unwrap().as_mean().unwrap(), expected);
        }
    }

    #[test]
    fn leaf_cap_stops_mid_level() {
        let data = step_data(80);
        let mut tree = DecisionTree::new();
        tree.set_max_leaves(3);
        tree.fit(&data).unwrap();
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.len(), 5);
        // every internal node has two children and every leaf none
        for (index, node) in tree.nodes() {
            assert_eq!(node.is_leaf(), tree.left(index).is_none());
            assert_eq!(node.is_leaf(), tree.right(index).is_none());
        }

        let mut stump = DecisionTree::new();
        stump.set_max_leaves(1);
        stump.fit(&data).unwrap();
        assert_eq!(stump.len(), 1);
        assert_abs_diff_eq!(stump.root().unwrap().value().as_mean().unwrap(), 7.0);
    }

    #[test]
    fn small_scale_step_is_split() {
        let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| if *x < 20.0 { 1e-7 } else { 9e-7 }).collect();
        let mut data = DataSet::new("y");
        data.add_numeric("x", xs).unwrap();
        data.add_numeric("y", ys).unwrap();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        assert_eq!(tree.len(), 3);
        let point = Observation::new().with_numeric("x", 30.0);
        assert_abs_diff_eq!(tree.predict_value(&point).unwrap(), 9e-7, epsilon = 1e-18);
    }

    #[test]
    fn depth_cap() {
        let data = step_data(80);
        let mut tree = DecisionTree::new();
        tree.set_max_depth(1);
        tree.fit(&data).unwrap();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.levels().len(), 2);
    }

    #[test]
    fn training_rows_reach_their_leaf() {
        let mut data = DataSet::new("y");
        let xs: Vec<f64> = (0..60).map(|i| ((i * 37) % 60) as f64).collect();
        let cs: Vec<&str> = (0..60).map(|i| ["p", "q", "r"][i % 3]).collect();
        let ys: Vec<f64> = xs
            .iter()
            .zip(cs.iter())
            .map(|(x, c)| x.sin() * 3.0 + if *c == "q" { 5.0 } else { 0.0 })
            .collect();
        data.add_numeric("x", xs).unwrap();
        data.add_categorical("c", &cs).unwrap();
        data.add_numeric("y", ys).unwrap();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        assert!(tree.len() > 1);

        for (index, node) in tree.nodes() {
            if node.is_leaf() {
                for row in node.rows() {
                    assert_eq!(tree.leaf_index(&data.row(*row)).unwrap(), index);
                }
            }
        }
        // children partition their parent
        for (index, node) in tree.nodes() {
            if let (Some(l), Some(r)) = (tree.left(index), tree.right(index)) {
                let mut rows: Vec<usize> = tree.node(l).unwrap().rows().to_vec();
                rows.extend_from_slice(tree.node(r).unwrap().rows());
                rows.sort_unstable();
                let mut parent = node.rows().to_vec();
                parent.sort_unstable();
                assert_eq!(rows, parent);
                assert!(node.score() > 0.0);
            }
        }
    }

    #[test]
    fn prediction_errors() {
        let data = threshold_data();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        let missing = Observation::new().with_numeric("y", 1.0);
        assert!(matches!(tree.classify(&missing), Err(TreeError::Schema(_))));
        let mistyped = Observation::new().with_categorical("x", "3");
        assert!(matches!(
            tree.classify(&mistyped),
            Err(TreeError::TypeMismatch { .. })
        ));
        let point = Observation::new().with_numeric("x", 1.0);
        assert!(matches!(
            tree.predict_value(&point),
            Err(TreeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            DecisionTree::new().predict(&point),
            Err(TreeError::EmptyInput(_))
        ));
    }

    #[test]
    fn fit_errors() {
        let data = DataSet::new("y");
        assert!(matches!(
            DecisionTree::new().fit(&data),
            Err(TreeError::Schema(_))
        ));
        let data = step_data(20);
        let mut sampler = RandomSampler::seeded(1);
        assert!(matches!(
            DecisionTree::new().fit_rows(&data, &[], &mut sampler),
            Err(TreeError::EmptyInput(_))
        ));
        let short = Target::Continuous(vec![1.0; 3]);
        assert!(matches!(
            DecisionTree::new().fit_target(&data, &short, &[0, 1], &mut sampler),
            Err(TreeError::Schema(_))
        ));
        assert!(matches!(
            DecisionTree::new().fit_rows(&data, &[0, 1, 99], &mut sampler),
            Err(TreeError::Schema(_))
        ));
        let mut tree = DecisionTree::new();
        tree.set_max_leaves(0);
        assert!(matches!(tree.fit(&data), Err(TreeError::Configuration(_))));
    }

    #[test]
    fn random_subset_is_reproducible() {
        let mut data = DataSet::new("lbl");
        let n = 90;
        for f in 0..6 {
            data.add_numeric(
                &format!("f{}", f),
                (0..n).map(|i| ((i * (f + 3)) % 17) as f64).collect(),
            )
            .unwrap();
        }
        let labels: Vec<&str> = (0..n).map(|i| if (i * 3) % 17 < 8 { "lo" } else { "hi" }).collect();
        data.add_categorical("lbl", &labels).unwrap();

        let mut a = DecisionTree::new();
        a.set_random_subset(true);
        a.set_seed(5);
        a.fit(&data).unwrap();
        let mut b = DecisionTree::new();
        b.set_random_subset(true);
        b.set_seed(5);
        b.fit(&data).unwrap();
        assert_eq!(a.to_string(), b.to_string());
        for (_, node) in a.nodes() {
            if let Some(rule) = node.rule() {
                assert!(a.features().iter().any(|f| f == rule.feature()));
            }
        }
    }

    #[test]
    fn dump_and_json() {
        let data = threshold_data();
        let mut tree = DecisionTree::new();
        tree.fit(&data).unwrap();
        let dump = tree.to_string();
        assert!(dump.starts_with("[LEVEL: 0]\nnode with 12 rows split on x > 4.5"));
        assert!(dump.contains("[LEVEL: 1]\nleaf with 5 rows predicting A\nleaf with 7 rows predicting B"));

        let restored = DecisionTree::from_json(&tree.to_json().unwrap()).unwrap();
        assert_eq!(restored.len(), 3);
        let point = Observation::new().with_numeric("x", 2.0);
        assert_eq!(restored.classify(&point).unwrap(), "A");
        assert!(restored.root().unwrap().rows().is_empty());
    }
}
