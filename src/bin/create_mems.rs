use anyhow::{Context, Result};
use clap::Parser;
use qgolden::mem::Matrix;
use qgolden::model::loader::{save_params, MemPaths};
use qgolden::model::{Params, HIDDEN, IN_DIM, OUT};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Writes a seeded random parameter set as the four memory images, for smoke tests
/// of the golden flow and the RTL memory loads.
#[derive(Parser, Debug)]
#[command(name = "create_mems", about = "Write random W1/b1/W2/b2 memory images")]
struct Args {
    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Weights are drawn from [-weight_range, weight_range] (max 127)
    #[arg(long, default_value_t = 127)]
    weight_range: i64,
    /// Biases are drawn from [-bias_range, bias_range]
    #[arg(long, default_value_t = 4096)]
    bias_range: i64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let wr = args.weight_range.clamp(0, 127);
    let br = args.bias_range.clamp(0, i32::MAX as i64);
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let params = Params {
        w1: Matrix::from_fn(IN_DIM, HIDDEN, |_, _| rng.gen_range(-wr..=wr)),
        b1: (0..HIDDEN).map(|_| rng.gen_range(-br..=br)).collect(),
        w2: Matrix::from_fn(HIDDEN, OUT, |_, _| rng.gen_range(-wr..=wr)),
        b2: (0..OUT).map(|_| rng.gen_range(-br..=br)).collect(),
    };
    let paths = MemPaths::in_dir(&args.out_dir);
    save_params(&paths, &params).with_context(|| format!("write memory images to {}", args.out_dir.display()))?;
    println!("Wrote W1/b1/W2/b2 memory images to {} (seed {})", args.out_dir.display(), args.seed);
    Ok(())
}
