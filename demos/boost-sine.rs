extern crate dtree;

use dtree::config::Config;
use dtree::dataset::DataSet;
use dtree::fitness::rmse;
use dtree::gradient_boost::GradientBoost;

fn main() {
    env_logger::init();

    let n = 200;
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 6.0 / n as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let mut data = DataSet::new("y");
    data.add_numeric("x", xs).expect("x column");
    data.add_numeric("y", ys.clone()).expect("y column");

    let mut cfg = Config::new();
    cfg.set_iterations(50);
    cfg.set_learning_rate(0.2);
    cfg.set_max_leaves(8);
    cfg.set_debug(true);
    println!("{}", cfg);

    let model = GradientBoost::fit(&cfg, &data).expect("fit");
    for iters in [0, 1, 5, 10, 25, 50].iter() {
        let predicted: Vec<f64> = (0..data.len())
            .map(|row| model.predict_n(&data.row(row), *iters).expect("predict"))
            .collect();
        println!("trees: {:2}  RMSE = {:.5}", iters, rmse(&ys, &predicted));
    }
}
