mod args;
mod remap;

use clap::Parser;
use log::{error, info, LevelFilter};
use snafu::ErrorCompat;

use crate::remap::config_reader::settings_from_args;
use crate::remap::{RemapError, RemapJob, RunResult};
use std::path::PathBuf;

fn run(args: &args::Args) -> RunResult<PathBuf> {
    let settings = settings_from_args(args)?;
    let mut job = RemapJob::new(settings);
    let res = job.process(chrono::Utc::now());
    info!("Run finished with status {:?}", job.status());
    res
}

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match run(&args) {
        Ok(path) => {
            println!("{}", path.display());
        }
        Err(RemapError::MissingInput {}) => {
            eprintln!("Please select a file first (--input).");
            std::process::exit(2);
        }
        Err(e) => {
            error!("Error processing file: {:?}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                error!("trace: {}", bt);
            }
            eprintln!("Error processing file. Please try again.");
            std::process::exit(1);
        }
    }
}
