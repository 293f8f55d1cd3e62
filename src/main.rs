//! Command-line front end: train the interpolator on a reference image,
//! double a second image, write the result.
//!
//! The reference should be pre-blurred for flexibility, and the image to
//! upscale should not have been downscaled with a filter that destroys
//! high-frequency phase information (e.g. a box filter).

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use symscale::raster::codec;
use symscale::{train_on_image, upscale, EpochStats, Network, TrainConfig};

#[derive(Parser)]
#[command(name = "symscale", version, about = "Neural 2x image upscaling trained on a reference image")]
struct Args {
    /// Image the interpolation network trains on.
    #[arg(default_value = "intest.png")]
    reference: PathBuf,

    /// Low-resolution image to upscale.
    #[arg(default_value = "toupscale.png")]
    input: PathBuf,

    /// Where to write the (2W-1) x (2H-1) result.
    #[arg(default_value = "output.png")]
    output: PathBuf,

    /// Training epochs; the learning rate halves after each one.
    #[arg(long, default_value_t = 32)]
    epochs: usize,

    /// Learning rate for the first epoch.
    #[arg(long, default_value_t = 0.5)]
    rate: f64,

    /// RNG seed for reproducible weight initialization.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a plain-text dump of every trained weight to this path.
    #[arg(long)]
    dump_weights: Option<PathBuf>,

    /// Write the trained network as JSON to this path.
    #[arg(long)]
    model_json: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> symscale::Result<()> {
    let reference = codec::load(&args.reference)?;
    let source = codec::load(&args.input)?;

    println!(
        "reference {}x{}x{}, upscaling {}x{}x{}",
        reference.width(),
        reference.height(),
        reference.channels(),
        source.width(),
        source.height(),
        source.channels()
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut network = Network::interpolator(&mut rng);

    // Progress prints from a receiver thread so the training loop itself
    // stays free of I/O.
    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            println!(
                "epoch {:>2}/{}  loss {:.6}  rate {:.9}  ({} ms)",
                stats.epoch,
                stats.total_epochs,
                stats.train_loss,
                stats.learning_rate,
                stats.elapsed_ms
            );
        }
    });

    let config = TrainConfig {
        epochs: args.epochs,
        initial_rate: args.rate,
        progress_tx: Some(tx),
    };
    train_on_image(&mut network, &reference, &config);
    drop(config);
    let _ = printer.join();

    println!("upscaling (diagonal pass, then axial pass)");
    let output = upscale(&network, &source)?;
    codec::save(&output, &args.output)?;
    println!(
        "wrote {}x{} to '{}'",
        output.width(),
        output.height(),
        args.output.display()
    );

    if let Some(path) = &args.dump_weights {
        let mut out = BufWriter::new(File::create(path)?);
        network.dump_weights(&mut out)?;
        println!("dumped weights to '{}'", path.display());
    }

    if let Some(path) = &args.model_json {
        network.save_json(&path.to_string_lossy())?;
        println!("saved model to '{}'", path.display());
    }

    Ok(())
}
