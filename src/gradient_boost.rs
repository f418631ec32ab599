//! This module implements gradient boosting over regression trees with a squared-error loss.
//!
//! Training starts from the mean of the target. Every round fits a regression tree to the
//! current residual and shrinks the tree's contribution by the learning rate:
//!
//! ```text
//! residual_0 = y - mean(y)
//! tree_i     = fit(residual_i)
//! residual_i+1 = residual_i - learning_rate * tree_i(x)
//! prediction(x) = mean(y) + learning_rate * sum(tree_i(x))
//! ```
//!
//! Exactly `iterations` trees are built, each capped by `max_leaves`. Rounds run one after the
//! other since each one needs the residual left by the previous tree.
//!
//! # Example
//! ```
//! use dtree::config::Config;
//! use dtree::dataset::{DataSet, Observation};
//! use dtree::gradient_boost::GradientBoost;
//!
//! let xs: Vec<f64> = (0..40).map(|i| i as f64 / 4.0).collect();
//! let ys: Vec<f64> = xs.iter().map(|x| if *x < 5.0 { 1.0 } else { 3.0 }).collect();
//! let mut data = DataSet::new("y");
//! data.add_numeric("x", xs).unwrap();
//! data.add_numeric("y", ys).unwrap();
//!
//! let mut cfg = Config::new();
//! cfg.set_iterations(30);
//! cfg.set_learning_rate(0.3);
//! cfg.set_max_leaves(4);
//!
//! let model = GradientBoost::fit(&cfg, &data).unwrap();
//! let low = model.predict(&Observation::new().with_numeric("x", 1.0)).unwrap();
//! assert!((low - 1.0).abs() < 0.01);
//! ```

use std::fmt;

use log::{debug, info};

use crate::config::Config;
use crate::dataset::{DataSet, FeatureLookup};
use crate::decision_tree::DecisionTree;
use crate::errors::{Result, TreeError};
use crate::fitness::{mean, rmse};
use crate::sampling::RandomSampler;
use crate::split::Target;

/// Fit one regression tree to `residual` and return it with the residual left after
/// subtracting `learning_rate` times its predictions.
pub fn boost_round(
    tree_conf: &Config,
    data: &DataSet,
    mut residual: Vec<f64>,
    learning_rate: f64,
) -> Result<(DecisionTree, Vec<f64>)> {
    let rows = data.all_rows();
    let target = Target::Continuous(residual.clone());
    let mut tree = DecisionTree::from_config(tree_conf);
    let mut sampler = RandomSampler::new(tree_conf.seed);
    tree.fit_target(data, &target, &rows, &mut sampler)?;

    for row in rows.iter() {
        residual[*row] -= learning_rate * tree.predict_value(&data.row(*row))?;
    }
    Ok((tree, residual))
}

/// The gradient boosting ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoost {
    conf: Config,
    /// mean of the training target
    init: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoost {
    /// Train `conf.iterations` trees on the numeric target of `data`.
    pub fn fit(conf: &Config, data: &DataSet) -> Result<GradientBoost> {
        conf.validate_boosting()?;
        if data.is_empty() {
            return Err(TreeError::EmptyInput("cannot boost on an empty table"));
        }
        let y = data.continuous_target()?;
        let rows = data.all_rows();
        let init = mean(&y, &rows);

        // Boosting trees see every feature at every node.
        let mut tree_conf = conf.clone();
        tree_conf.set_random_subset(false);

        let mut residual: Vec<f64> = y.iter().map(|v| v - init).collect();
        let mut trees = Vec::with_capacity(conf.iterations);
        for round in 0..conf.iterations {
            let (tree, next) = boost_round(&tree_conf, data, residual, conf.learning_rate)?;
            residual = next;
            trees.push(tree);
            if conf.debug {
                let zeros = vec![0.0; residual.len()];
                debug!(
                    "round {}: {} leaves, RMSE = {}",
                    round,
                    trees[round].leaf_count(),
                    rmse(&residual, &zeros)
                );
            }
        }

        info!(
            "trained {} boosting rounds on {} rows, initial value {}",
            trees.len(),
            data.len(),
            init
        );
        Ok(GradientBoost {
            conf: conf.clone(),
            init,
            trees,
        })
    }

    /// Prediction using only the first `iters` trees. `iters` larger than the ensemble uses all
    /// of them.
    pub fn predict_n<P: FeatureLookup + ?Sized>(&self, point: &P, iters: usize) -> Result<f64> {
        let mut sum = 0.0;
        for tree in self.trees.iter().take(iters) {
            sum += tree.predict_value(point)?;
        }
        Ok(self.init + self.conf.learning_rate * sum)
    }

    pub fn predict<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<f64> {
        self.predict_n(point, self.trees.len())
    }

    /// Predict row `row` of `data`.
    pub fn predict_row(&self, data: &DataSet, row: usize) -> Result<f64> {
        self.predict(&data.row(row))
    }

    /// The mean of the training target every prediction starts from.
    pub fn initial_value(&self) -> f64 {
        self.init
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn config(&self) -> &Config {
        &self.conf
    }

    /// Print the trees for debugging
    pub fn print(&self) {
        println!("{}", self);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl fmt::Display for GradientBoost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "initial value = {}", self.init)?;
        writeln!(f, "learning rate = {}", self.conf.learning_rate)?;
        for (i, tree) in self.trees.iter().enumerate() {
            writeln!(f, "[TREE: {}]", i)?;
            write!(f, "{}", tree)?;
        }
        Ok(())
    }
}
