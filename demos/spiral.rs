use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use perceptron::data::{generate, Grid};
use perceptron::{Config, FullBatchGradientDescent, Network};

const FIGURE_EXTENT: f64 = 1.5;

#[derive(Parser, Debug)]
#[command(about = "Fit a one-hidden-layer network to interleaved spirals")]
struct Args {
    /// JSON run configuration. Defaults are used for anything left out.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 500)]
    ticks: usize,

    #[arg(long)]
    hidden_size: Option<usize>,

    #[arg(long)]
    num_points: Option<usize>,

    /// Overrides the class count of both the dataset and the network.
    #[arg(long)]
    num_classes: Option<usize>,

    /// Seed for both the dataset and the weights.
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 64)]
    width: usize,

    #[arg(long, default_value_t = 32)]
    height: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(hidden_size) = args.hidden_size {
        config.network.set_hidden_size(hidden_size);
    }
    if let Some(num_points) = args.num_points {
        config.dataset.set_num_points(num_points);
    }
    if let Some(num_classes) = args.num_classes {
        config.network.set_num_classes(num_classes);
        config.dataset.set_num_classes(num_classes);
    }
    if let Some(seed) = args.seed {
        config.network.set_seed(seed);
        config.dataset.set_seed(seed);
    }
    config.validate()?;

    let dataset = generate(&config.dataset)?;
    let grid = Grid::new(FIGURE_EXTENT, args.width, args.height)?;
    let mut nn = Network::new(&config.network)?;

    let mut trainer = FullBatchGradientDescent::new(&mut nn);
    trainer.override_hyper(config.hyper.clone());

    let mut map = grid.classify(trainer.network())?;
    for _ in 0..args.ticks {
        trainer.tick(&dataset)?;
        map = grid.classify(trainer.network())?;
    }

    if let Some(report) = trainer.last() {
        info!(
            "finished after {} iterations: loss {:.5}, accuracy {:.2}%",
            trainer.iterations(),
            report.loss,
            100. * report.accuracy
        );
    }

    for row in 0..grid.height() {
        let line = (0..grid.width())
            .map(|col| char::from_digit(map.get(row, col) as u32, 36).unwrap_or('?'))
            .collect::<String>();
        println!("{line}");
    }

    Ok(())
}
