//Copyright (C) 2017-2018 Baidu, Inc. All Rights Reserved.
//
//Redistribution and use in source and binary forms, with or without
//modification, are permitted provided that the following conditions
//are met:
//
// * Redistributions of source code must retain the above copyright
//   notice, this list of conditions and the following disclaimer.
//
// * Redistributions in binary form must reproduce the above copyright
//   notice, this list of conditions and the following disclaimer in
//   the documentation and/or other materials provided with the
//   distribution.
//
// * Neither the name of Baidu, Inc., nor the names of its
//   contributors may be used to endorse or promote products derived
//   from this software without specific prior written permission.
//
//THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
//"AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
//LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
//A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT
//OWNER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
//SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
//LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; Loss OF USE,
//DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY
//THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
//(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
//OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Decision-tree induction over named numeric and categorical columns, with two ensembles
//! built from it: gradient boosting of regression trees and a random forest of classification
//! trees.
//!
//! ```
//! use dtree::config::Config;
//! use dtree::dataset::{DataSet, Observation};
//! use dtree::decision_tree::DecisionTree;
//! use dtree::gradient_boost::GradientBoost;
//!
//! let xs: Vec<f64> = (0..30).map(|i| i as f64).collect();
//! let ys: Vec<f64> = xs.iter().map(|x| if *x < 15.0 { 0.0 } else { 10.0 }).collect();
//! let mut data = DataSet::new("y");
//! data.add_numeric("x", xs).unwrap();
//! data.add_numeric("y", ys).unwrap();
//!
//! let mut tree = DecisionTree::new();
//! tree.fit(&data).unwrap();
//! let point = Observation::new().with_numeric("x", 20.0);
//! assert_eq!(tree.predict_value(&point).unwrap(), 10.0);
//!
//! let mut cfg = Config::new();
//! cfg.set_iterations(5);
//! let model = GradientBoost::fit(&cfg, &data).unwrap();
//! assert!(model.predict(&point).unwrap() > 5.0);
//! ```

#![allow(clippy::type_complexity)]

extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod binary_tree;
pub mod config;
pub mod dataset;
pub mod decision_tree;
pub mod errors;
pub mod fitness;
pub mod forest;
pub mod gradient_boost;
pub mod sampling;
pub mod split;

pub use crate::config::{Config, Criterion};
pub use crate::dataset::{DataSet, FeatureLookup, Observation, Value};
pub use crate::decision_tree::{DecisionTree, LeafValue};
pub use crate::errors::{Result, TreeError};
pub use crate::forest::RandomForest;
pub use crate::gradient_boost::GradientBoost;
