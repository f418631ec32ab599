//! This module implements the statistics used to score splits and to value leaves, plus a few
//! evaluation metrics.
//!
//! Functions taking `rows` work on a partition: a list of row indices into a column. Rows may
//! repeat.

/// Comparing two number with a costomized floating error threshold.
///
/// # Example
/// ```rust
/// use dtree::fitness::almost_equal_thrs;
/// assert_eq!(true, almost_equal_thrs(1.0, 0.998, 0.01));
/// ```
pub fn almost_equal_thrs(a: f64, b: f64, thrs: f64) -> bool {
    (a - b).abs() < thrs
}

/// Comparing two number with default floating error threshold.
///
/// # Example
/// ```rust
/// use dtree::fitness::almost_equal;
/// assert_eq!(false, almost_equal(1.0, 0.998));
/// assert_eq!(true, almost_equal(1.0, 1.0 + 1e-12));
/// ```
pub fn almost_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1.0e-10
}

/// Arithmetic mean of `target` over `rows`. An empty partition has mean 0.
pub fn mean(target: &[f64], rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let sum: f64 = rows.iter().map(|r| target[*r]).sum();
    sum / rows.len() as f64
}

/// Population variance of `target` over `rows`.
///
/// # Example
/// ```rust
/// use dtree::fitness::variance;
/// let target = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(variance(&target, &[0, 1, 2, 3]), 1.25);
/// assert_eq!(variance(&target, &[2, 2]), 0.0);
/// ```
pub fn variance(target: &[f64], rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let m = mean(target, rows);
    let ss: f64 = rows
        .iter()
        .map(|r| {
            let d = target[*r] - m;
            d * d
        })
        .sum();
    ss / rows.len() as f64
}

/// Count the label codes of `rows`. `n_levels` is the number of distinct labels.
pub fn label_counts(labels: &[usize], rows: &[usize], n_levels: usize) -> Vec<usize> {
    let mut counts = vec![0; n_levels];
    for row in rows.iter() {
        counts[labels[*row]] += 1;
    }
    counts
}

/// Shannon entropy in bits of a label distribution given by its counts.
///
/// # Example
/// ```rust
/// use dtree::fitness::entropy_of_counts;
/// assert_eq!(entropy_of_counts(&[5, 5]), 1.0);
/// assert_eq!(entropy_of_counts(&[7, 0]), 0.0);
/// ```
pub fn entropy_of_counts(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / n;
            -p * p.log2()
        })
        .sum()
}

/// Entropy of the labels of `rows`.
pub fn entropy(labels: &[usize], rows: &[usize], n_levels: usize) -> f64 {
    entropy_of_counts(&label_counts(labels, rows, n_levels))
}

/// The most frequent label of `rows`. Equal counts go to the label seen first in `rows`.
/// Returns `None` for an empty partition.
pub fn majority(labels: &[usize], rows: &[usize], n_levels: usize) -> Option<usize> {
    let counts = label_counts(labels, rows, n_levels);
    let mut seen = vec![false; n_levels];
    let mut best: Option<usize> = None;
    let mut best_count = 0;
    for row in rows.iter() {
        let label = labels[*row];
        if seen[label] {
            continue;
        }
        seen[label] = true;
        if counts[label] > best_count {
            best = Some(label);
            best_count = counts[label];
        }
    }
    best
}

/// RMSE (Root-Mean-Square deviation) calculation.
/// See [wikipedia](https://en.wikipedia.org/wiki/Root-mean-square_deviation) for detailed algorithm.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    let s: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    (s / actual.len() as f64).sqrt()
}

/// MAE (Mean Absolute Error) calculation.
/// See [wikipedia](https://en.wikipedia.org/wiki/Mean_absolute_error) for detailed algorithm.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    let s: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    s / actual.len() as f64
}

/// Fraction of predicted labels equal to the actual ones.
pub fn accuracy<S: AsRef<str>, T: AsRef<str>>(actual: &[S], predicted: &[T]) -> f64 {
    assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    let correct = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a.as_ref() == p.as_ref())
        .count();
    correct as f64 / actual.len() as f64
}
