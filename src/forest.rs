//! This module implements a random forest of classification trees.
//!
//! Each tree is trained on a bootstrap sample of the table (rows drawn with replacement, as
//! many as the table has) and only sees a random subset of the features at every node. A point
//! is classified by letting every tree vote for its leaf's label: the label with most votes
//! wins, equal tallies go to the label voted for first.
//!
//! The number of trees must be odd. Bootstrap rows and per-tree seeds are drawn up front from
//! one random source, then the trees are built in parallel, so a seeded forest is reproducible.

use std::fmt;

use log::info;
use rayon::prelude::*;

use crate::config::Config;
use crate::dataset::{DataSet, FeatureLookup};
use crate::decision_tree::DecisionTree;
use crate::errors::{Result, TreeError};
use crate::sampling::{RandomSampler, Sampler};
use crate::split::Target;

/// The label with strictly most votes in a tally. Equal counts go to the entry listed first.
pub fn winning_label(tally: Vec<(String, usize)>) -> Option<String> {
    let mut best: Option<(String, usize)> = None;
    for (label, count) in tally.into_iter() {
        let better = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if better {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// The random forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Train `conf.forest_size` classification trees on the categorical target of `data`.
    ///
    /// # Example
    /// ```
    /// use dtree::config::Config;
    /// use dtree::dataset::{DataSet, Observation};
    /// use dtree::forest::RandomForest;
    ///
    /// let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
    /// let labels: Vec<&str> = xs.iter().map(|x| if *x < 20.0 { "low" } else { "high" }).collect();
    /// let mut data = DataSet::new("label");
    /// data.add_numeric("x", xs).unwrap();
    /// data.add_categorical("label", &labels).unwrap();
    ///
    /// let mut cfg = Config::new();
    /// cfg.set_forest_size(5);
    /// cfg.set_seed(3);
    /// let forest = RandomForest::fit(&cfg, &data).unwrap();
    /// assert_eq!(forest.len(), 5);
    /// let point = Observation::new().with_numeric("x", 2.0);
    /// assert_eq!(forest.classify(&point).unwrap(), "low");
    /// ```
    pub fn fit(conf: &Config, data: &DataSet) -> Result<RandomForest> {
        conf.validate_forest()?;
        if data.is_empty() {
            return Err(TreeError::EmptyInput("cannot grow a forest on an empty table"));
        }
        let target = Target::Labels(data.label_target()?);

        let mut sampler = RandomSampler::new(conf.seed);
        let plans: Vec<(Vec<usize>, u64)> = (0..conf.forest_size)
            .map(|_| {
                let rows = sampler.bootstrap(data.len(), data.len());
                (rows, sampler.next_seed())
            })
            .collect();

        let mut tree_conf = conf.clone();
        tree_conf.set_random_subset(true);
        let trees: Vec<DecisionTree> = plans
            .into_par_iter()
            .map(|(rows, seed)| {
                let mut tree = DecisionTree::from_config(&tree_conf);
                let mut tree_sampler = RandomSampler::seeded(seed);
                tree.fit_target(data, &target, &rows, &mut tree_sampler)?;
                Ok(tree)
            })
            .collect::<Result<Vec<DecisionTree>>>()?;

        info!(
            "grew a forest of {} trees on {} rows",
            trees.len(),
            data.len()
        );
        Ok(RandomForest { trees })
    }

    /// Votes per label, in the order the labels first received a vote.
    pub fn votes<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<Vec<(String, usize)>> {
        let mut tally: Vec<(String, usize)> = Vec::new();
        for tree in self.trees.iter() {
            let label = tree.classify(point)?;
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => tally.push((label, 1)),
            }
        }
        Ok(tally)
    }

    /// The label with most votes.
    pub fn classify<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<String> {
        winning_label(self.votes(point)?).ok_or(TreeError::EmptyInput("the forest has no trees"))
    }

    /// Classify row `row` of `data`.
    pub fn predict_row(&self, data: &DataSet, row: usize) -> Result<String> {
        self.classify(&data.row(row))
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

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

impl fmt::Display for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, tree) in self.trees.iter().enumerate() {
            writeln!(f, "[TREE: {}]", i)?;
            write!(f, "{}", tree)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Observation;
    use crate::fitness::accuracy;

    fn two_class_data() -> DataSet {
        let n = 60;
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let zs: Vec<f64> = (0..n).map(|i| ((i * 7) % 11) as f64).collect();
        let cs: Vec<&str> = (0..n).map(|i| if i % 2 == 0 { "even" } else { "odd" }).collect();
        let labels: Vec<&str> = (0..n).map(|i| if i < 30 { "left" } else { "right" }).collect();
        let mut data = DataSet::new("side");
        data.add_numeric("x", xs).unwrap();
        data.add_numeric("z", zs).unwrap();
        data.add_categorical("parity", &cs).unwrap();
        data.add_categorical("side", &labels).unwrap();
        data
    }

    fn forest_config(size: usize) -> Config {
        let mut cfg = Config::new();
        cfg.set_forest_size(size);
        cfg.set_seed(17);
        cfg
    }

    #[test]
    fn even_or_zero_size_is_rejected() {
        let data = two_class_data();
        for size in [0usize, 2, 6].iter() {
            assert!(matches!(
                RandomForest::fit(&forest_config(*size), &data),
                Err(TreeError::Configuration(_))
            ));
        }
    }

    #[test]
    fn votes_add_up_to_forest_size() {
        let data = two_class_data();
        let forest = RandomForest::fit(&forest_config(7), &data).unwrap();
        assert_eq!(forest.len(), 7);
        let point = Observation::new()
            .with_numeric("x", 45.0)
            .with_numeric("z", 3.0)
            .with_categorical("parity", "odd");
        let votes = forest.votes(&point).unwrap();
        assert_eq!(votes.iter().map(|(_, c)| c).sum::<usize>(), 7);
        let winner = forest.classify(&point).unwrap();
        let top = votes.iter().map(|(_, c)| *c).max().unwrap();
        assert!(votes.iter().any(|(l, c)| *l == winner && *c == top));
    }

    fn tally(entries: &[(&str, usize)]) -> Vec<(String, usize)> {
        entries.iter().map(|(l, c)| (l.to_string(), *c)).collect()
    }

    #[test]
    fn first_voted_label_wins_a_tie() {
        assert_eq!(
            winning_label(tally(&[("b", 2), ("a", 2), ("c", 1)])),
            Some("b".to_string())
        );
        assert_eq!(
            winning_label(tally(&[("c", 1), ("a", 2), ("b", 2)])),
            Some("a".to_string())
        );
        assert_eq!(
            winning_label(tally(&[("a", 1), ("b", 3), ("c", 1)])),
            Some("b".to_string())
        );
        assert_eq!(winning_label(Vec::new()), None);
    }

    #[test]
    fn seeded_forest_is_reproducible() {
        let data = two_class_data();
        let a = RandomForest::fit(&forest_config(5), &data).unwrap();
        let b = RandomForest::fit(&forest_config(5), &data).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn separable_classes_are_learned() {
        let data = two_class_data();
        let forest = RandomForest::fit(&forest_config(11), &data).unwrap();
        let actual: Vec<String> = (0..data.len())
            .map(|row| data.categorical("side").unwrap().value(row).to_string())
            .collect();
        let predicted: Vec<String> = (0..data.len())
            .map(|row| forest.predict_row(&data, row).unwrap())
            .collect();
        assert!(accuracy(&actual, &predicted) > 0.8);
    }

    #[test]
    fn numeric_target_is_rejected() {
        let mut data = DataSet::new("y");
        data.add_numeric("x", vec![1.0, 2.0, 3.0]).unwrap();
        data.add_numeric("y", vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            RandomForest::fit(&forest_config(3), &data),
            Err(TreeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn json_round_trip() {
        let data = two_class_data();
        let forest = RandomForest::fit(&forest_config(3), &data).unwrap();
        let restored = RandomForest::from_json(&forest.to_json().unwrap()).unwrap();
        assert_eq!(restored.len(), 3);
        for row in [0usize, 29, 30, 59].iter() {
            assert_eq!(
                restored.predict_row(&data, *row).unwrap(),
                forest.predict_row(&data, *row).unwrap()
            );
        }
    }
}
