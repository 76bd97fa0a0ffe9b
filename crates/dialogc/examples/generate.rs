//! Compile a dialog specification into a POMDP solver input file.
//!
//! Usage:
//!   generate [SPEC.json] [OUT.pomdp] [CONFUSION.json]
//!
//! Without a specification the built-in yes/no example is compiled.
//! Without a confusion matrix file a seeded random sensor is used, so
//! the compiler can be exercised before real sensor data exists.
//!
//! Run with:
//!   cargo run --example generate -- dialog.json dialog.pomdp

use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;

use dialogc::prelude::*;
use dialogc_test_utils::fixtures;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const RANDOM_SEED: u64 = 42;

fn setup_logging() {
    let verbose = std::env::var_os("DIALOGC_VERBOSE").is_some();
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);

    let spec_path = match args.next() {
        Some(path) => path,
        None => {
            let path = std::env::temp_dir().join("dialogc-yes-no.json");
            fs::write(&path, fixtures::YES_NO_SPEC)?;
            info!(path = %path.display(), "using built-in specification");
            path
        }
    };
    let out_path = args
        .next()
        .unwrap_or_else(|| spec_path.with_extension("pomdp"));

    let summary = match args.next() {
        Some(matrix_path) => {
            let matrix = ConfusionMatrix::from_json_reader(File::open(&matrix_path)?)?;
            compile_to_path(&spec_path, &matrix, &out_path)?
        }
        None => {
            info!(seed = RANDOM_SEED, "no confusion matrix given; using a random sensor");
            compile_to_path(&spec_path, &RandomConfusion::new(RANDOM_SEED), &out_path)?
        }
    };

    println!(
        "{}: {} transitions, {} observations, {} rewards",
        out_path.display(),
        summary.transitions,
        summary.observations,
        summary.rewards
    );
    Ok(())
}
