//! Program to prove the Monty Hall problem from the command-line interface (CLI), by running many random trials of both strategies.
//!
//! Examples:
//!
//! ```shell
//! # default: 10 million trials per strategy, single-threaded, with a fresh random seed
//! $ cargo run --bin monty --
//!
//! # a reproducible run of 1 million trials, on 8 threads, with a progress bar
//! $ cargo run --bin monty -- --count 1000000 --seed hello --jobs 8 --progress
//!
//! # prints the help and usage information, describing all the options
//! $ cargo run --bin monty -- --help
//! ```
//!

use clap::{Parser, ValueEnum};
use kdam::{tqdm, BarExt};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{
    chacha_from_seed,
    experiment::Experiment,
    report::Report,
    rng_from_seed,
};

/// How many trials to run between progress bar updates
const PROGRESS_CHUNK: u64 = 100_000;

/// Output format of the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {

    /// Plain text proof, one fact per line
    Text,

    /// JSON document with the counts and percentages of each strategy
    Json,

}

/// Arguments for the Monty Hall CLI, which determine the experiment configuration.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {

    /// Number of trials to run for each strategy.
    #[arg(short, long, default_value_t = Experiment::DEFAULT_TRIALS, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,

    /// Randomness seed string for deterministic generation.
    ///
    /// If not provided, a default-initialized RNG will be used.
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Number of worker threads per strategy.
    ///
    /// With more than one job, each worker draws from its own stream of the seed, so results depend on the number of jobs as well as the seed.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Show a progress bar on stderr while running (single job only).
    #[arg(short, long)]
    pub progress: bool,

    /// Output format of the final report.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

}

impl Args {

    /// Run the Monty Hall CLI with parsed arguments, useful as an entrypoint for the program.
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!(count = self.count, seed = ?self.seed, jobs = self.jobs, "starting experiment");

        let report = self.simulate()?;

        match self.format {
            Format::Text => println!("{}", report),
            Format::Json => println!("{}", report.to_json()?),
        }

        Ok(())
    }

    /// Run the experiment as configured, returning the report
    pub fn simulate(&self) -> Result<Report, Box<dyn std::error::Error>> {
        let experiment = Experiment::new(self.count);

        if self.jobs > 1 {
            if self.progress {
                tracing::warn!("progress bar is only shown with a single job");
            }

            // every worker stream is derived from a single base generator
            let base = match &self.seed {
                Some(seed) => chacha_from_seed(seed),
                None => ChaCha20Rng::from_rng(&mut rand::rng()),
            };
            return Ok(experiment.run_parallel(&base, self.jobs as usize));
        }

        // create the RNG from the provided seed (or, a default-initialized one if no seed is provided)
        let mut rng = rng_from_seed(self.seed.as_ref());

        if !self.progress {
            return Ok(experiment.run(&mut rng));
        }

        // both strategies run the same number of trials, one after another
        let mut pb = tqdm!(total = (2 * self.count) as usize);
        let report = experiment.run_chunked(&mut rng, PROGRESS_CHUNK, |strategy, num| {
            pb.update(num as usize)?;
            pb.set_postfix(format!("strategy={}", strategy));
            Ok::<(), std::io::Error>(())
        })?;
        eprintln!();

        Ok(report)
    }
}
