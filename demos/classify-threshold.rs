extern crate dtree;

use dtree::dataset::{DataSet, Observation};
use dtree::decision_tree::DecisionTree;
use dtree::fitness::accuracy;

fn main() {
    env_logger::init();

    let xs: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let labels: Vec<&str> = xs
        .iter()
        .map(|x| if *x < 5.0 { "A" } else { "B" })
        .collect();

    let mut data = DataSet::new("class");
    data.add_numeric("x", xs).expect("x column");
    data.add_categorical("class", &labels).expect("class column");

    let mut tree = DecisionTree::new();
    tree.fit(&data).expect("fit");
    tree.print();

    let predicted: Vec<String> = (0..data.len())
        .map(|row| tree.classify(&data.row(row)).expect("classify"))
        .collect();
    println!("training accuracy: {}", accuracy(&labels, &predicted));

    for x in [2.0, 4.9, 5.1, 11.0].iter() {
        let point = Observation::new().with_numeric("x", *x);
        println!("x = {}  ->  {}", x, tree.classify(&point).expect("classify"));
    }
}
