extern crate dtree;

use dtree::config::Config;
use dtree::dataset::{DataSet, Observation};
use dtree::forest::RandomForest;

fn main() {
    env_logger::init();

    let n = 150;
    let width: Vec<f64> = (0..n).map(|i| (i % 50) as f64 / 10.0).collect();
    let height: Vec<f64> = (0..n).map(|i| ((i * 7) % 30) as f64).collect();
    let texture: Vec<&str> = (0..n).map(|i| ["smooth", "rough"][i % 2]).collect();
    let species: Vec<&str> = (0..n)
        .map(|i| {
            if width[i] < 1.5 {
                "alpha"
            } else if height[i] < 12.0 {
                "beta"
            } else {
                "gamma"
            }
        })
        .collect();

    let mut data = DataSet::new("species");
    data.add_numeric("width", width).expect("width column");
    data.add_numeric("height", height).expect("height column");
    data.add_categorical("texture", &texture).expect("texture column");
    data.add_categorical("species", &species).expect("species column");

    let mut cfg = Config::new();
    cfg.set_forest_size(9);
    cfg.set_seed(42);
    let forest = RandomForest::fit(&cfg, &data).expect("fit");

    let points = [
        Observation::new()
            .with_numeric("width", 0.5)
            .with_numeric("height", 20.0)
            .with_categorical("texture", "rough"),
        Observation::new()
            .with_numeric("width", 3.0)
            .with_numeric("height", 4.0)
            .with_categorical("texture", "smooth"),
        Observation::new()
            .with_numeric("width", 4.0)
            .with_numeric("height", 25.0)
            .with_categorical("texture", "smooth"),
    ];
    for point in points.iter() {
        let votes = forest.votes(point).expect("votes");
        let label = forest.classify(point).expect("classify");
        println!("{:?}  ->  {}", votes, label);
    }
}
