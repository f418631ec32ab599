//! This module implements the split search: for a partition and one feature, find the binary
//! split that most reduces the target's impurity, and across features, the best such split.
//!
//! Impurity is the population variance of a continuous target ([`Criterion::Variance`]) or the
//! entropy of a categorical label ([`Criterion::Entropy`]). A numeric feature is split by a
//! threshold (`value > threshold` goes right), a categorical feature by one level
//! (`value == level` goes right).
//!
//! Candidates are evaluated in the partition's row order and a candidate replaces the current
//! best only when its score is strictly greater, so on equal scores the first candidate wins.
//! The same rule applies between features in [`best_split`].

use std::cmp::Ordering;
use std::fmt;

use rayon::prelude::*;

use crate::config::Criterion;
use crate::dataset::{CategoricalColumn, Column, DataSet, FeatureLookup, ValueRef};
use crate::errors::{Result, TreeError, ValueKind};
use crate::fitness::{entropy_of_counts, label_counts, variance};

/// Score differences up to this fraction of the partition's impurity are rounding noise. A
/// split must improve on no split by more than that, and a later candidate must beat the current
/// best by more than that.
pub const MIN_RELATIVE_GAIN: f64 = 1e-9;

/// The values a tree is fit to.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Regression target or boosting residual.
    Continuous(Vec<f64>),
    /// Class labels.
    Labels(CategoricalColumn),
}

impl Target {
    /// The target column of `data`: continuous when numeric, labels when categorical.
    pub fn from_dataset(data: &DataSet) -> Result<Target> {
        match data.column(data.target_name())? {
            Column::Numeric(v) => Ok(Target::Continuous(v.clone())),
            Column::Categorical(c) => Ok(Target::Labels(c.clone())),
        }
    }

    pub fn criterion(&self) -> Criterion {
        match self {
            Target::Continuous(_) => Criterion::Variance,
            Target::Labels(_) => Criterion::Entropy,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Target::Continuous(v) => v.len(),
            Target::Labels(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Impurity of the target over `rows`: variance or entropy.
    pub fn impurity(&self, rows: &[usize]) -> f64 {
        match self {
            Target::Continuous(v) => variance(v, rows),
            Target::Labels(l) => {
                entropy_of_counts(&label_counts(l.codes(), rows, l.levels().len()))
            }
        }
    }
}

/// A split decision stored in an internal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitRule {
    /// `value > threshold` goes right, `value <= threshold` goes left.
    Numeric { feature: String, threshold: f64 },
    /// `value == level` goes right, every other level goes left.
    Categorical { feature: String, level: String },
}

impl SplitRule {
    pub fn feature(&self) -> &str {
        match self {
            SplitRule::Numeric { feature, .. } => feature,
            SplitRule::Categorical { feature, .. } => feature,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            SplitRule::Numeric { .. } => ValueKind::Numeric,
            SplitRule::Categorical { .. } => ValueKind::Categorical,
        }
    }

    /// Whether `value` goes to the right child. A value of the other kind is an error.
    pub fn goes_right(&self, value: ValueRef) -> Result<bool> {
        match (self, value) {
            (SplitRule::Numeric { threshold, .. }, ValueRef::Numeric(v)) => Ok(v > *threshold),
            (SplitRule::Categorical { level, .. }, ValueRef::Categorical(v)) => Ok(v == level),
            (rule, value) => Err(TreeError::type_mismatch(
                rule.feature(),
                rule.kind(),
                value.kind(),
            )),
        }
    }

    /// Route a point: `true` for the right child.
    pub fn route<P: FeatureLookup + ?Sized>(&self, point: &P) -> Result<bool> {
        self.goes_right(point.lookup(self.feature())?)
    }

    /// Split `rows` into (left, right) by this rule.
    pub fn partition(&self, data: &DataSet, rows: &[usize]) -> Result<(Vec<usize>, Vec<usize>)> {
        let column = data.column(self.feature())?;
        if column.kind() != self.kind() {
            return Err(TreeError::type_mismatch(
                self.feature(),
                self.kind(),
                column.kind(),
            ));
        }
        let (right, left) = data.partition(rows, self.feature(), |v| {
            self.goes_right(v).unwrap_or(false)
        })?;
        Ok((left, right))
    }
}

impl fmt::Display for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplitRule::Numeric { feature, threshold } => write!(f, "{} > {}", feature, threshold),
            SplitRule::Categorical { feature, level } => write!(f, "{} == {}", feature, level),
        }
    }
}

/// A split and the improvement it achieves. Only splits with a positive score are reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCandidate {
    pub rule: SplitRule,
    pub score: f64,
}

/// Running maximum over candidates scanned in order. Only a score greater by more than the
/// tolerance replaces the current best, so candidates equal up to rounding keep the first one.
struct Best<K> {
    key: Option<K>,
    score: f64,
    tolerance: f64,
}

impl<K> Best<K> {
    /// `impurity` is the impurity of the partition being split.
    fn new(impurity: f64) -> Self {
        Best {
            key: None,
            score: 0.0,
            tolerance: tolerance_of(impurity),
        }
    }

    fn offer(&mut self, key: K, score: f64) {
        if score > self.score + self.tolerance {
            self.key = Some(key);
            self.score = score;
        }
    }

    fn into_candidate<F: FnOnce(K) -> SplitRule>(self, to_rule: F) -> Option<SplitCandidate> {
        let score = self.score;
        self.key.map(|k| SplitCandidate {
            rule: to_rule(k),
            score,
        })
    }
}

/// Find the best split of `rows` on `feature`. Returns `None` when no split improves the
/// target's impurity.
pub fn best_split_for_feature(
    data: &DataSet,
    target: &Target,
    rows: &[usize],
    feature: &str,
) -> Result<Option<SplitCandidate>> {
    if rows.is_empty() {
        return Err(TreeError::EmptyInput("split search needs a non-empty partition"));
    }
    let to_numeric = |threshold: f64| SplitRule::Numeric {
        feature: feature.to_string(),
        threshold,
    };
    let candidate = match (data.column(feature)?, target) {
        (Column::Numeric(values), Target::Continuous(y)) => {
            numeric_variance_split(values, y, rows).into_candidate(to_numeric)
        }
        (Column::Numeric(values), Target::Labels(labels)) => {
            numeric_entropy_split(values, labels, rows).into_candidate(to_numeric)
        }
        (Column::Categorical(column), target) => {
            let best = match target {
                Target::Continuous(y) => categorical_variance_split(column, y, rows),
                Target::Labels(labels) => categorical_entropy_split(column, labels, rows),
            };
            best.into_candidate(|code| SplitRule::Categorical {
                feature: feature.to_string(),
                level: column.levels()[code].clone(),
            })
        }
    };
    Ok(candidate)
}

fn tolerance_of(impurity: f64) -> f64 {
    MIN_RELATIVE_GAIN * impurity.max(0.0)
}

/// Scan `features` in order and return the split with the strictly greatest score. Features
/// are scored in parallel; the scan order decides ties.
pub fn best_split<S: AsRef<str> + Sync>(
    data: &DataSet,
    target: &Target,
    rows: &[usize],
    features: &[S],
) -> Result<Option<SplitCandidate>> {
    let scored: Vec<Result<Option<SplitCandidate>>> = features
        .par_iter()
        .map(|f| best_split_for_feature(data, target, rows, f.as_ref()))
        .collect();

    let tolerance = tolerance_of(target.impurity(rows));
    let mut best: Option<SplitCandidate> = None;
    for result in scored.into_iter() {
        if let Some(candidate) = result? {
            let better = match &best {
                Some(b) => candidate.score > b.score + tolerance,
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }
    }
    Ok(best)
}

/// Sum of squared deviations from a (count, sum, sum of squares) triple.
fn sse(c: f64, s: f64, ss: f64) -> f64 {
    if c <= 0.0 {
        0.0
    } else {
        (ss - s * s / c).max(0.0)
    }
}

/// Row values of a numeric feature sorted ascending, paired with the row.
fn sorted_by_value(values: &[f64], rows: &[usize]) -> Vec<(f64, usize)> {
    let mut sorted: Vec<(f64, usize)> = rows.iter().map(|r| (values[*r], *r)).collect();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    sorted
}

/// Look up the score of a threshold in a list of (distinct value, score) sorted by value.
fn score_of(scores: &[(f64, f64)], value: f64) -> Option<f64> {
    scores
        .binary_search_by(|probe| probe.0.partial_cmp(&value).unwrap_or(Ordering::Equal))
        .ok()
        .map(|i| scores[i].1)
}

/// Numeric feature, continuous target: every distinct value is a candidate threshold.
///
/// Scores are computed once per distinct value from prefix sums over the sorted partition, then
/// the partition is scanned in row order to apply the first-wins rule.
fn numeric_variance_split(values: &[f64], y: &[f64], rows: &[usize]) -> Best<f64> {
    let n = rows.len() as f64;
    let m = rows.iter().map(|r| y[*r]).sum::<f64>() / n;

    let sorted = sorted_by_value(values, rows);
    let (mut total_s, mut total_ss) = (0.0, 0.0);
    for (_, row) in sorted.iter() {
        let d = y[*row] - m;
        total_s += d;
        total_ss += d * d;
    }
    let total_sse = sse(n, total_s, total_ss);
    let mut best = Best::new(total_sse / n);
    if total_sse <= 0.0 {
        return best;
    }

    // improvement for `value > v` against `value <= v`, per distinct v
    let mut scores: Vec<(f64, f64)> = Vec::new();
    let (mut lc, mut ls, mut lss) = (0.0, 0.0, 0.0);
    for (i, (v, row)) in sorted.iter().enumerate() {
        let d = y[*row] - m;
        lc += 1.0;
        ls += d;
        lss += d * d;
        let last_of_group = i + 1 == sorted.len() || sorted[i + 1].0 != *v;
        if !last_of_group {
            continue;
        }
        let rc = n - lc;
        let improvement = if rc > 0.0 {
            (total_sse - sse(lc, ls, lss) - sse(rc, total_s - ls, total_ss - lss)) / n
        } else {
            0.0
        };
        scores.push((*v, improvement));
    }

    for row in rows.iter() {
        let v = values[*row];
        if let Some(score) = score_of(&scores, v) {
            best.offer(v, score);
        }
    }
    best
}

/// Categorical feature, continuous target: every level is a candidate, in first-seen order.
fn categorical_variance_split(column: &CategoricalColumn, y: &[f64], rows: &[usize]) -> Best<usize> {
    let n = rows.len() as f64;
    let m = rows.iter().map(|r| y[*r]).sum::<f64>() / n;
    let n_levels = column.levels().len();

    let mut stats = vec![(0.0f64, 0.0f64, 0.0f64); n_levels];
    let mut order: Vec<usize> = Vec::new();
    let (mut total_s, mut total_ss) = (0.0, 0.0);
    for row in rows.iter() {
        let code = column.code(*row);
        let d = y[*row] - m;
        let entry = &mut stats[code];
        if entry.0 == 0.0 {
            order.push(code);
        }
        entry.0 += 1.0;
        entry.1 += d;
        entry.2 += d * d;
        total_s += d;
        total_ss += d * d;
    }
    let total_sse = sse(n, total_s, total_ss);
    let mut best = Best::new(total_sse / n);
    if total_sse <= 0.0 {
        return best;
    }

    for code in order.into_iter() {
        let (rc, rs, rss) = stats[code];
        let lc = n - rc;
        if lc <= 0.0 {
            continue;
        }
        let improvement =
            (total_sse - sse(rc, rs, rss) - sse(lc, total_s - rs, total_ss - rss)) / n;
        best.offer(code, improvement);
    }
    best
}

/// Information gain of splitting a label distribution `total` into `right` and the rest.
fn information_gain(input_entropy: f64, total: &[usize], right: &[usize]) -> f64 {
    let n: usize = total.iter().sum();
    let nr: usize = right.iter().sum();
    if n == 0 || nr == 0 || nr == n {
        return 0.0;
    }
    let left: Vec<usize> = total.iter().zip(right.iter()).map(|(t, r)| t - r).collect();
    let n = n as f64;
    let nr = nr as f64;
    let after = (nr / n) * entropy_of_counts(right) + ((n - nr) / n) * entropy_of_counts(&left);
    input_entropy - after
}

/// Label counts of the rows whose value is `> threshold`.
fn counts_above(values: &[f64], codes: &[usize], rows: &[usize], n_levels: usize, threshold: f64) -> Vec<usize> {
    let mut counts = vec![0; n_levels];
    for row in rows.iter() {
        if values[*row] > threshold {
            counts[codes[*row]] += 1;
        }
    }
    counts
}

/// Numeric feature, categorical label.
///
/// Only thresholds inside the overlap region are evaluated. With `a` the values carrying the
/// first row's label and `b` the other values, the region is
/// `[max(min a, min b), min(max a, max b)]`. When the region holds no value the groups are
/// already separated and the midpoint of the region is the only candidate.
fn numeric_entropy_split(values: &[f64], labels: &CategoricalColumn, rows: &[usize]) -> Best<f64> {
    let codes = labels.codes();
    let n_levels = labels.levels().len();
    let total = label_counts(codes, rows, n_levels);
    let input_entropy = entropy_of_counts(&total);
    let mut best = Best::new(input_entropy);
    if input_entropy <= 0.0 {
        return best;
    }

    if rows.len() == 2 {
        let (a, b) = (values[rows[0]], values[rows[1]]);
        if a != b {
            best.offer((a + b) / 2.0, input_entropy);
        }
        return best;
    }

    let first = codes[rows[0]];
    let (mut min_a, mut max_a) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_b, mut max_b) = (f64::INFINITY, f64::NEG_INFINITY);
    for row in rows.iter() {
        let v = values[*row];
        if codes[*row] == first {
            min_a = min_a.min(v);
            max_a = max_a.max(v);
        } else {
            min_b = min_b.min(v);
            max_b = max_b.max(v);
        }
    }
    let lo = min_a.max(min_b);
    let hi = max_a.min(max_b);

    if lo > hi {
        let midpoint = (lo + hi) / 2.0;
        let right = counts_above(values, codes, rows, n_levels, midpoint);
        best.offer(midpoint, information_gain(input_entropy, &total, &right));
        return best;
    }

    // gain per distinct value in the region, from label counts accumulated over sorted values
    let sorted = sorted_by_value(values, rows);
    let mut scores: Vec<(f64, f64)> = Vec::new();
    let mut left = vec![0usize; n_levels];
    for (i, (v, row)) in sorted.iter().enumerate() {
        left[codes[*row]] += 1;
        let last_of_group = i + 1 == sorted.len() || sorted[i + 1].0 != *v;
        if !last_of_group || *v < lo || *v > hi {
            continue;
        }
        let right: Vec<usize> = total.iter().zip(left.iter()).map(|(t, l)| t - l).collect();
        scores.push((*v, information_gain(input_entropy, &total, &right)));
    }

    for row in rows.iter() {
        let v = values[*row];
        if v < lo || v > hi {
            continue;
        }
        if let Some(score) = score_of(&scores, v) {
            best.offer(v, score);
        }
    }
    best
}

/// Categorical feature, categorical label: every level is a candidate, in first-seen order.
fn categorical_entropy_split(
    column: &CategoricalColumn,
    labels: &CategoricalColumn,
    rows: &[usize],
) -> Best<usize> {
    let codes = labels.codes();
    let n_labels = labels.levels().len();
    let total = label_counts(codes, rows, n_labels);
    let input_entropy = entropy_of_counts(&total);
    let mut best = Best::new(input_entropy);
    if input_entropy <= 0.0 {
        return best;
    }

    let mut per_level: Vec<Option<Vec<usize>>> = vec![None; column.levels().len()];
    let mut order: Vec<usize> = Vec::new();
    for row in rows.iter() {
        let level = column.code(*row);
        let counts = per_level[level].get_or_insert_with(|| {
            order.push(level);
            vec![0; n_labels]
        });
        counts[codes[*row]] += 1;
    }

    for level in order.into_iter() {
        if let Some(right) = &per_level[level] {
            best.offer(level, information_gain(input_entropy, &total, right));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn regression_data() -> (DataSet, Target) {
        let mut data = DataSet::new("y");
        data.add_numeric("x", vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0])
            .unwrap();
        data.add_categorical("c", &["a", "a", "a", "b", "b", "c"])
            .unwrap();
        data.add_numeric("noise", vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0])
            .unwrap();
        let y = vec![1.0, 1.0, 1.0, 9.0, 9.0, 9.0];
        data.add_numeric("y", y.clone()).unwrap();
        (data, Target::Continuous(y))
    }

    #[test]
    fn numeric_variance_finds_gap() {
        let (data, target) = regression_data();
        let rows = data.all_rows();
        let best = best_split_for_feature(&data, &target, &rows, "x")
            .unwrap()
            .unwrap();
        assert_eq!(
            best.rule,
            SplitRule::Numeric {
                feature: "x".to_string(),
                threshold: 3.0
            }
        );
        // all of the variance is removed
        assert_abs_diff_eq!(best.score, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn categorical_variance_picks_best_level() {
        let (data, target) = regression_data();
        let rows = data.all_rows();
        let best = best_split_for_feature(&data, &target, &rows, "c")
            .unwrap()
            .unwrap();
        // "a" against the rest separates the target perfectly, "b" and "c" only partly
        assert_eq!(
            best.rule,
            SplitRule::Categorical {
                feature: "c".to_string(),
                level: "a".to_string()
            }
        );
        assert_abs_diff_eq!(best.score, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn constant_feature_has_no_split() {
        let (data, target) = regression_data();
        let rows = data.all_rows();
        assert_eq!(
            best_split_for_feature(&data, &target, &rows, "noise").unwrap(),
            None
        );
    }

    #[test]
    fn best_feature_prefers_first_on_tie() {
        let (data, target) = regression_data();
        let rows = data.all_rows();
        let best = best_split(&data, &target, &rows, &["noise", "c", "x"])
            .unwrap()
            .unwrap();
        assert_eq!(best.rule.feature(), "c");
        let best = best_split(&data, &target, &rows, &["x", "c"]).unwrap().unwrap();
        assert_eq!(best.rule.feature(), "x");
        assert_eq!(best_split(&data, &target, &rows, &["noise"]).unwrap(), None);
    }

    fn step(scale: f64, low: f64, high: f64) -> (DataSet, Target) {
        let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let y: Vec<f64> = xs
            .iter()
            .map(|x| if *x < 20.0 { low * scale } else { high * scale })
            .collect();
        let mut data = DataSet::new("y");
        data.add_numeric("x", xs).unwrap();
        data.add_numeric("y", y.clone()).unwrap();
        (data, Target::Continuous(y))
    }

    #[test]
    fn small_scale_targets_still_split() {
        for scale in [1.0, 1e-7, 1e-12, 1e-20].iter() {
            let (data, target) = step(*scale, 1.0, 9.0);
            let rows = data.all_rows();
            let best = best_split_for_feature(&data, &target, &rows, "x")
                .unwrap()
                .unwrap();
            assert_eq!(
                best.rule,
                SplitRule::Numeric {
                    feature: "x".to_string(),
                    threshold: 19.0
                }
            );
            // the split removes the whole variance
            assert_abs_diff_eq!(
                best.score,
                target.impurity(&rows),
                epsilon = 1e-9 * target.impurity(&rows)
            );
        }
    }

    #[test]
    fn mirrored_thresholds_keep_the_first() {
        // thresholds 2 and 6 leave the same three low rows apart, one on each side
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        for (low, high) in [(0.1, 0.7), (0.3, 1.9), (1.1, 1.3), (-2.7, 0.01)].iter() {
            let y: Vec<f64> = (0..10)
                .map(|i| if (3..7).contains(&i) { *high } else { *low })
                .collect();
            let mut data = DataSet::new("y");
            data.add_numeric("x", xs.clone()).unwrap();
            data.add_numeric("y", y.clone()).unwrap();
            let target = Target::Continuous(y);
            let best = best_split_for_feature(&data, &target, &data.all_rows(), "x")
                .unwrap()
                .unwrap();
            assert_eq!(
                best.rule,
                SplitRule::Numeric {
                    feature: "x".to_string(),
                    threshold: 2.0
                }
            );
        }
    }

    #[test]
    fn empty_partition_is_an_error() {
        let (data, target) = regression_data();
        assert!(matches!(
            best_split_for_feature(&data, &target, &[], "x"),
            Err(TreeError::EmptyInput(_))
        ));
    }

    fn labelled(values: Vec<f64>, labels: &[&str]) -> (DataSet, Target) {
        let mut data = DataSet::new("lbl");
        data.add_numeric("x", values).unwrap();
        data.add_categorical("lbl", labels).unwrap();
        let target = Target::Labels(data.label_target().unwrap());
        (data, target)
    }

    #[test]
    fn separated_labels_split_at_gap_midpoint() {
        let (data, target) = labelled(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            &["A", "A", "A", "A", "B", "B", "B", "B"],
        );
        let best = best_split_for_feature(&data, &target, &data.all_rows(), "x")
            .unwrap()
            .unwrap();
        assert_eq!(
            best.rule,
            SplitRule::Numeric {
                feature: "x".to_string(),
                threshold: 3.5
            }
        );
        assert_abs_diff_eq!(best.score, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn overlapping_labels_search_overlap_region() {
        // A: 0..=4 and 6, B: 5 and 7..=9; overlap region is [5, 6]
        let (data, target) = labelled(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            &["A", "A", "A", "A", "A", "B", "A", "B", "B", "B"],
        );
        let best = best_split_for_feature(&data, &target, &data.all_rows(), "x")
            .unwrap()
            .unwrap();
        // 6.0 leaves a pure right child, 5.0 does not
        assert_eq!(
            best.rule,
            SplitRule::Numeric {
                feature: "x".to_string(),
                threshold: 6.0
            }
        );
        assert!(best.score > 0.5);
    }

    #[test]
    fn two_rows_split_at_midpoint() {
        let (data, target) = labelled(vec![2.0, 4.0], &["A", "B"]);
        let best = best_split_for_feature(&data, &target, &data.all_rows(), "x")
            .unwrap()
            .unwrap();
        assert_eq!(
            best.rule,
            SplitRule::Numeric {
                feature: "x".to_string(),
                threshold: 3.0
            }
        );
        assert_abs_diff_eq!(best.score, 1.0);
    }

    #[test]
    fn pure_labels_have_no_split() {
        let (data, target) = labelled(vec![1.0, 2.0, 3.0], &["A", "A", "A"]);
        assert_eq!(
            best_split_for_feature(&data, &target, &data.all_rows(), "x").unwrap(),
            None
        );
    }

    #[test]
    fn categorical_entropy_split() {
        let mut data = DataSet::new("lbl");
        data.add_categorical("color", &["red", "blue", "red", "green", "blue"])
            .unwrap();
        data.add_categorical("lbl", &["x", "y", "x", "y", "y"]).unwrap();
        let target = Target::Labels(data.label_target().unwrap());
        let best = best_split_for_feature(&data, &target, &data.all_rows(), "color")
            .unwrap()
            .unwrap();
        assert_eq!(
            best.rule,
            SplitRule::Categorical {
                feature: "color".to_string(),
                level: "red".to_string()
            }
        );
        assert_abs_diff_eq!(best.score, target.impurity(&data.all_rows()), epsilon = 1e-12);
    }

    #[test]
    fn rule_routing() {
        let rule = SplitRule::Numeric {
            feature: "x".to_string(),
            threshold: 2.0,
        };
        assert_eq!(rule.goes_right(ValueRef::Numeric(2.0)).unwrap(), false);
        assert_eq!(rule.goes_right(ValueRef::Numeric(2.5)).unwrap(), true);
        assert!(matches!(
            rule.goes_right(ValueRef::Categorical("2")),
            Err(TreeError::TypeMismatch { .. })
        ));
        let rule = SplitRule::Categorical {
            feature: "c".to_string(),
            level: "b".to_string(),
        };
        assert_eq!(rule.goes_right(ValueRef::Categorical("b")).unwrap(), true);
        assert_eq!(rule.goes_right(ValueRef::Categorical("a")).unwrap(), false);
        assert_eq!(rule.to_string(), "c == b");
    }

    #[test]
    fn rule_partition_is_total() {
        let (data, _) = regression_data();
        let rows = vec![5, 0, 3, 1];
        let rule = SplitRule::Numeric {
            feature: "x".to_string(),
            threshold: 3.0,
        };
        let (left, right) = rule.partition(&data, &rows).unwrap();
        assert_eq!(left, vec![0, 1]);
        assert_eq!(right, vec![5, 3]);
    }
}
