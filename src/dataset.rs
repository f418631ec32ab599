//! This module implements a small columnar table used as training input.
//!
//! A [`DataSet`] is a set of named columns of equal length. Each column is either numeric
//! ([`Column::Numeric`]) or categorical ([`Column::Categorical`]) and the kind decides how the
//! column is split. One column is the target: a numeric column for regression trees and a
//! categorical column for classification trees. Every other column is a feature, in the order
//! the columns were added.
//!
//! Subsets of a table are never copied. Tree nodes hold partitions, i.e. lists of row indices
//! into the table, which may repeat rows (bootstrap samples).
//!
//! # Example
//! ```
//! use dtree::dataset::DataSet;
//! let mut data = DataSet::new("price");
//! data.add_numeric("area", vec![50.0, 75.0, 120.0]).unwrap();
//! data.add_categorical("city", &["paris", "lyon", "paris"]).unwrap();
//! data.add_numeric("price", vec![300.0, 280.0, 700.0]).unwrap();
//! assert_eq!(data.len(), 3);
//! assert_eq!(data.feature_names(), vec!["area", "city"]);
//! ```

use std::collections::HashMap;

use crate::errors::{Result, TreeError, ValueKind};

/// A categorical column stored as codes into its levels. Levels are numbered in the order they
/// first appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    levels: Vec<String>,
    codes: Vec<usize>,
}

impl CategoricalColumn {
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut levels: Vec<String> = Vec::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();
        let mut codes = Vec::with_capacity(values.len());
        for value in values.iter() {
            let value = value.as_ref();
            let code = match lookup.get(value) {
                Some(code) => *code,
                None => {
                    let code = levels.len();
                    levels.push(value.to_string());
                    lookup.insert(value.to_string(), code);
                    code
                }
            };
            codes.push(code);
        }
        CategoricalColumn { levels, codes }
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    pub fn code(&self, row: usize) -> usize {
        self.codes[row]
    }

    pub fn value(&self, row: usize) -> &str {
        &self.levels[self.codes[row]]
    }

    pub fn level_code(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(CategoricalColumn),
}

impl Column {
    pub fn kind(&self) -> ValueKind {
        match self {
            Column::Numeric(_) => ValueKind::Numeric,
            Column::Categorical(_) => ValueKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize) -> ValueRef<'_> {
        match self {
            Column::Numeric(v) => ValueRef::Numeric(v[row]),
            Column::Categorical(c) => ValueRef::Categorical(c.value(row)),
        }
    }
}

/// An owned feature value of a new observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Numeric(f64),
    Categorical(String),
}

impl Value {
    pub fn to_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Numeric(v) => ValueRef::Numeric(*v),
            Value::Categorical(s) => ValueRef::Categorical(s),
        }
    }
}

/// A borrowed feature value, read either from a table row or from an [`Observation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl<'a> ValueRef<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            ValueRef::Numeric(_) => ValueKind::Numeric,
            ValueRef::Categorical(_) => ValueKind::Categorical,
        }
    }
}

/// Read access to the features of one point. Trees route points through this trait, so a
/// table row and a new observation are predicted the same way.
pub trait FeatureLookup {
    fn lookup(&self, feature: &str) -> Result<ValueRef<'_>>;
}

/// One new observation: feature values by column name, without the target.
///
/// # Example
/// ```
/// use dtree::dataset::{Observation, FeatureLookup, ValueRef};
/// let obs = Observation::new()
///     .with_numeric("area", 80.0)
///     .with_categorical("city", "lyon");
/// assert_eq!(obs.lookup("area").unwrap(), ValueRef::Numeric(80.0));
/// assert!(obs.lookup("rooms").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    values: HashMap<String, Value>,
}

impl Observation {
    pub fn new() -> Self {
        Observation {
            values: HashMap::new(),
        }
    }

    pub fn with_numeric(mut self, name: &str, value: f64) -> Self {
        self.insert(name, Value::Numeric(value));
        self
    }

    pub fn with_categorical(mut self, name: &str, value: &str) -> Self {
        self.insert(name, Value::Categorical(value.to_string()));
        self
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FeatureLookup for Observation {
    fn lookup(&self, feature: &str) -> Result<ValueRef<'_>> {
        self.values
            .get(feature)
            .map(|v| v.to_ref())
            .ok_or_else(|| TreeError::Schema(format!("observation has no feature '{}'", feature)))
    }
}

/// A row of a [`DataSet`] seen as a point to route.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    data: &'a DataSet,
    row: usize,
}

impl<'a> FeatureLookup for RowView<'a> {
    fn lookup(&self, feature: &str) -> Result<ValueRef<'_>> {
        Ok(self.data.column(feature)?.get(self.row))
    }
}

/// The columnar table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    names: Vec<String>,
    columns: Vec<Column>,
    target: String,
    n_rows: usize,
}

impl DataSet {
    /// Create an empty table whose target column will be called `target`.
    pub fn new(target: &str) -> Self {
        DataSet {
            names: Vec::new(),
            columns: Vec::new(),
            target: target.to_string(),
            n_rows: 0,
        }
    }

    pub fn add_numeric(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        self.add_column(name, Column::Numeric(values))
    }

    pub fn add_categorical<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<()> {
        self.add_column(name, Column::Categorical(CategoricalColumn::from_values(values)))
    }

    /// Append a column. All columns must have the same length and distinct names.
    pub fn add_column(&mut self, name: &str, column: Column) -> Result<()> {
        if self.names.iter().any(|n| n == name) {
            return Err(TreeError::Schema(format!("duplicate column '{}'", name)));
        }
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(TreeError::Schema(format!(
                "column '{}' has {} rows, expected {}",
                name,
                column.len(),
                self.n_rows
            )));
        }
        self.n_rows = column.len();
        self.names.push(name.to_string());
        self.columns.push(column);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn target_name(&self) -> &str {
        &self.target
    }

    /// All column names except the target, in declaration order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| **n != self.target)
            .map(|n| n.as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| TreeError::Schema(format!("unknown column '{}'", name)))
    }

    pub fn column_kind(&self, name: &str) -> Result<ValueKind> {
        Ok(self.column(name)?.kind())
    }

    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Categorical(_) => Err(TreeError::type_mismatch(
                name,
                ValueKind::Numeric,
                ValueKind::Categorical,
            )),
        }
    }

    pub fn categorical(&self, name: &str) -> Result<&CategoricalColumn> {
        match self.column(name)? {
            Column::Categorical(c) => Ok(c),
            Column::Numeric(_) => Err(TreeError::type_mismatch(
                name,
                ValueKind::Categorical,
                ValueKind::Numeric,
            )),
        }
    }

    /// The target column as a continuous regression target.
    pub fn continuous_target(&self) -> Result<Vec<f64>> {
        Ok(self.numeric(&self.target)?.to_vec())
    }

    /// The target column as class labels.
    pub fn label_target(&self) -> Result<CategoricalColumn> {
        Ok(self.categorical(&self.target)?.clone())
    }

    pub fn all_rows(&self) -> Vec<usize> {
        (0..self.n_rows).collect()
    }

    /// Split `rows` by a predicate over column `name`: rows for which `pred` holds come first,
    /// the others second. Row order is kept within both groups.
    pub fn partition<F>(&self, rows: &[usize], name: &str, pred: F) -> Result<(Vec<usize>, Vec<usize>)>
    where
        F: Fn(ValueRef) -> bool,
    {
        let column = self.column(name)?;
        let mut matching = Vec::new();
        let mut rest = Vec::new();
        for row in rows.iter() {
            if pred(column.get(*row)) {
                matching.push(*row);
            } else {
                rest.push(*row);
            }
        }
        Ok((matching, rest))
    }

    /// The rows of `rows` for which `pred` holds on column `name`.
    pub fn filter<F>(&self, rows: &[usize], name: &str, pred: F) -> Result<Vec<usize>>
    where
        F: Fn(ValueRef) -> bool,
    {
        Ok(self.partition(rows, name, pred)?.0)
    }

    pub fn row(&self, row: usize) -> RowView<'_> {
        RowView { data: self, row }
    }

    /// Copy the feature values of a row into an [`Observation`].
    pub fn observation(&self, row: usize) -> Observation {
        let mut obs = Observation::new();
        for (name, column) in self.names.iter().zip(self.columns.iter()) {
            if *name == self.target {
                continue;
            }
            let value = match column {
                Column::Numeric(v) => Value::Numeric(v[row]),
                Column::Categorical(c) => Value::Categorical(c.value(row).to_string()),
            };
            obs.insert(name, value);
        }
        obs
    }
}
