//! This module implements the config for tree induction and the two ensembles.
//!

use crate::errors::{Result, TreeError};

/// The statistic a split is scored with.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Criterion {
    /// Variance reduction of a continuous target (regression).
    Variance,
    /// Information gain over a categorical label (classification).
    Entropy,
}

impl Default for Criterion {
    fn default() -> Self {
        Criterion::Variance
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Criterion::Variance => write!(f, "Variance"),
            Criterion::Entropy => write!(f, "Entropy"),
        }
    }
}

/// Nodes holding fewer rows than this are never split.
pub const DEFAULT_MIN_SPLIT_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Nodes with fewer rows become leaves.
    pub min_split_size: usize,
    /// Depth at which nodes are forced to be leaves. The root is at depth 0.
    pub max_depth: Option<u32>,
    /// Maximum number of leaves per tree.
    pub max_leaves: Option<usize>,
    /// Draw a random feature subset at every node.
    pub random_subset: bool,
    /// Number of boosting rounds.
    pub iterations: usize,
    pub learning_rate: f64,
    /// Number of trees in a random forest. Must be odd.
    pub forest_size: usize,
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        Config {
            min_split_size: DEFAULT_MIN_SPLIT_SIZE,
            max_depth: None,
            max_leaves: None,
            random_subset: false,
            iterations: 10,
            learning_rate: 0.1,
            forest_size: 11,
            seed: None,
            debug: false,
        }
    }

    pub fn set_min_split_size(&mut self, n: usize) {
        self.min_split_size = n;
    }

    pub fn set_max_depth(&mut self, n: u32) {
        self.max_depth = Some(n);
    }

    pub fn set_max_leaves(&mut self, n: usize) {
        self.max_leaves = Some(n);
    }

    pub fn set_random_subset(&mut self, option: bool) {
        self.random_subset = option;
    }

    pub fn set_iterations(&mut self, n: usize) {
        self.iterations = n;
    }

    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    pub fn set_forest_size(&mut self, n: usize) {
        self.forest_size = n;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    pub fn set_debug(&mut self, option: bool) {
        self.debug = option;
    }

    /// Check the caps shared by every tree.
    pub fn validate_tree(&self) -> Result<()> {
        if self.max_leaves == Some(0) {
            return Err(TreeError::Configuration(
                "max_leaves must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_boosting(&self) -> Result<()> {
        self.validate_tree()?;
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(TreeError::Configuration(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// An even number of trees can tie a vote, so only positive odd sizes are accepted.
    pub fn validate_forest(&self) -> Result<()> {
        self.validate_tree()?;
        if self.forest_size == 0 || self.forest_size % 2 == 0 {
            return Err(TreeError::Configuration(format!(
                "forest size must be a positive odd number, got {}",
                self.forest_size
            )));
        }
        Ok(())
    }
}

fn option_to_string<T: std::fmt::Display>(v: &Option<T>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => String::from("unlimited"),
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "min split size = {}", self.min_split_size)?;
        writeln!(f, "maximum depth = {}", option_to_string(&self.max_depth))?;
        writeln!(f, "maximum leaves = {}", option_to_string(&self.max_leaves))?;
        writeln!(f, "random subset = {}", self.random_subset)?;
        writeln!(f, "iterations = {}", self.iterations)?;
        writeln!(f, "learning rate = {}", self.learning_rate)?;
        writeln!(f, "forest size = {}", self.forest_size)?;
        writeln!(f, "seed = {}", option_to_string(&self.seed))?;
        writeln!(f, "debug enabled = {}", self.debug)
    }
}
