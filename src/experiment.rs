//! Aggregation of many independent trials into win tallies, for each strategy
//!
//! Every trial draws a fresh scenario, so the 'stay' and 'switch' experiments never share an arrangement or a pick. Tallies only ever grow by summation, which makes combining partial tallies from parallel workers order-independent.
//!

use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::thread;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::report::Report;
use crate::scenario::draw_scenario;
use crate::trial::{evaluate, Outcome, Strategy};

/// Tally counts as they appear in serialized form, before checking them
#[derive(Deserialize)]
struct RawTally {
    wins: u64,
    trials: u64,
}

/// Running count of wins over a number of trials, for a single strategy
///
/// Invariant: `wins <= trials`, which deserialization checks as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTally")]
pub struct Tally {
    wins: u64,
    trials: u64,
}

impl TryFrom<RawTally> for Tally {
    type Error = &'static str;

    fn try_from(raw: RawTally) -> Result<Self, Self::Error> {
        if raw.wins > raw.trials {
            return Err("tally has more wins than trials");
        }
        Ok(Self { wins: raw.wins, trials: raw.trials })
    }
}

impl Tally {
    pub const ZERO: Self = Self { wins: 0, trials: 0 };

    /// Create a tally directly from counts, which requires `wins <= trials`
    pub fn new(wins: u64, trials: u64) -> Self {
        assert!(wins <= trials, "cannot have {} wins in only {} trials", wins, trials);
        Self { wins, trials }
    }

    /// Count the outcome of one more trial
    pub fn record(&mut self, outcome: Outcome) {
        self.trials = self.trials.checked_add(1).expect("trial counter overflowed");
        self.wins += outcome.value() as u64;
    }

    pub const fn wins(&self) -> u64 {
        self.wins
    }

    pub const fn losses(&self) -> u64 {
        self.trials - self.wins
    }

    pub const fn trials(&self) -> u64 {
        self.trials
    }

    /// The observed probability of winning, as `wins / trials` (or 0 when there are no trials yet)
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trials as f64
    }

    /// The observed probability of losing, as `losses / trials` (or 0 when there are no trials yet)
    pub fn loss_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.losses() as f64 / self.trials as f64
    }

    /// The observed probability of winning, as a percentage
    pub fn win_percent(&self) -> f64 {
        self.win_rate() * 100.0
    }
}

impl Add for Tally {
    type Output = Tally;
    fn add(self, other: Tally) -> Self::Output {
        Self {
            wins: self.wins.checked_add(other.wins).expect("win counter overflowed"),
            trials: self.trials.checked_add(other.trials).expect("trial counter overflowed"),
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        *self = *self + other;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, tally| acc + tally)
    }
}

/// Run `trials` independent trials of a strategy, each with a freshly drawn scenario
pub fn run_trials<R: Rng>(strategy: Strategy, trials: u64, rng: &mut R) -> Tally {
    let mut tally = Tally::ZERO;
    for _ in 0..trials {
        let scenario = draw_scenario(rng);
        tally.record(evaluate(strategy, &scenario.arrangement, scenario.pick, rng));
    }
    tally
}

/// Split `total` trials into `jobs` nearly equal shares, with the remainder going to the first shares
fn split_trials(total: u64, jobs: usize) -> Vec<u64> {
    let jobs_u64 = jobs as u64;
    let base = total / jobs_u64;
    let extra = total % jobs_u64;
    (0..jobs_u64).map(|i| base + if i < extra { 1 } else { 0 }).collect()
}

/// A Monty Hall experiment, which runs the same number of trials for both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Experiment {

    /// Number of trials to run for each strategy
    pub trials: u64,

}

impl Experiment {

    /// Default number of trials per strategy
    pub const DEFAULT_TRIALS: u64 = 10_000_000;

    pub fn new(trials: u64) -> Self {
        Self { trials }
    }

    /// Run both experiments from a single generator: first all 'stay' trials, then all 'switch' trials
    pub fn run<R: Rng>(&self, rng: &mut R) -> Report {
        tracing::debug!(trials = self.trials, "running stay trials");
        let stay = run_trials(Strategy::Stay, self.trials, rng);
        tracing::debug!(trials = self.trials, "running switch trials");
        let switch = run_trials(Strategy::Switch, self.trials, rng);
        Report::new(self.trials, stay, switch)
    }

    /// Same as [Experiment::run], but in chunks of at most `chunk` trials, calling `progress` with the size of each chunk once it is done
    ///
    /// The generator is consumed in exactly the same order as [Experiment::run], so the results are identical for the same generator state.
    pub fn run_chunked<R, F, E>(&self, rng: &mut R, chunk: u64, mut progress: F) -> Result<Report, E>
    where
        R: Rng,
        F: FnMut(Strategy, u64) -> Result<(), E>,
    {
        assert!(chunk > 0, "chunk size must be positive");

        let mut tallies = [Tally::ZERO; 2];
        for (tally, strategy) in tallies.iter_mut().zip(Strategy::ALL) {
            let mut left = self.trials;
            while left > 0 {
                let num = left.min(chunk);
                *tally += run_trials(strategy, num, rng);
                left -= num;
                progress(strategy, num)?;
            }
        }

        let [stay, switch] = tallies;
        Ok(Report::new(self.trials, stay, switch))
    }

    /// Run both experiments across `jobs` worker threads per strategy
    ///
    /// Each worker gets its own ChaCha20 stream, derived from the seed of `base` by stream number: 'stay' workers use streams `0..jobs`, and 'switch' workers use streams `jobs..2*jobs`. So, for the same base seed and number of jobs, the results are reproducible.
    pub fn run_parallel(&self, base: &ChaCha20Rng, jobs: usize) -> Report {
        assert!(jobs > 0, "need at least one job");

        let seed = base.get_seed();
        let shares = split_trials(self.trials, jobs);

        let [stay, switch] = thread::scope(|scope| {
            // spawn every worker for both strategies up front, so they all run at the same time
            let handles = Strategy::ALL.map(|strategy| {
                let offset = match strategy {
                    Strategy::Stay => 0,
                    Strategy::Switch => jobs as u64,
                };
                shares
                    .iter()
                    .enumerate()
                    .map(|(worker, &trials)| {
                        let stream = offset + worker as u64;
                        scope.spawn(move || {
                            let mut rng = ChaCha20Rng::from_seed(seed);
                            rng.set_stream(stream);
                            tracing::debug!(%strategy, worker, stream, trials, "worker started");
                            run_trials(strategy, trials, &mut rng)
                        })
                    })
                    .collect::<Vec<_>>()
            });

            // wait for all of them, and sum up the partial tallies
            handles.map(|handles| {
                handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap_or_else(|err| std::panic::resume_unwind(err)))
                    .sum::<Tally>()
            })
        });

        Report::new(self.trials, stay, switch)
    }
}

impl Default for Experiment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRIALS)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;
    use crate::{chacha_from_seed, rng_from_seed};

    #[test]
    fn tally_counts() {
        let mut tally = Tally::ZERO;
        tally.record(Outcome::Win);
        tally.record(Outcome::Loss);
        tally.record(Outcome::Loss);
        tally.record(Outcome::Win);
        assert_eq!(tally.wins(), 2);
        assert_eq!(tally.losses(), 2);
        assert_eq!(tally.trials(), 4);
        assert_eq!(tally.win_rate(), 0.5);
        assert_eq!(tally.win_percent(), 50.0);
    }

    #[test]
    fn tally_empty_rates() {
        assert_eq!(Tally::ZERO.win_rate(), 0.0);
        assert_eq!(Tally::ZERO.loss_rate(), 0.0);
    }

    #[test]
    #[should_panic]
    fn tally_rejects_more_wins_than_trials() {
        Tally::new(3, 2);
    }

    #[test]
    fn tally_deserialize_checks_counts() {
        let tally: Tally = serde_json::from_str(r#"{"wins":2,"trials":3}"#).unwrap();
        assert_eq!(tally, Tally::new(2, 3));
        assert_eq!(tally.losses(), 1);
        assert_eq!(serde_json::from_str::<Tally>(&serde_json::to_string(&tally).unwrap()).unwrap(), tally);

        let err = serde_json::from_str::<Tally>(r#"{"wins":3,"trials":2}"#).unwrap_err();
        assert!(err.to_string().contains("more wins than trials"), "unexpected error: {}", err);
    }

    #[test]
    fn tally_sum_is_order_independent() {
        let parts = [Tally::new(1, 3), Tally::new(5, 7), Tally::new(0, 4), Tally::new(2, 2)];
        let forward: Tally = parts.iter().copied().sum();
        let backward: Tally = parts.iter().rev().copied().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward, Tally::new(8, 16));
    }

    #[test]
    fn rates_are_complementary() {
        let mut rng = rng_from_seed(Some("complementary"));
        for n in [1u64, 2, 3, 7, 100, 1001] {
            for strategy in Strategy::ALL {
                let tally = run_trials(strategy, n, &mut rng);
                assert_eq!(tally.trials(), n);
                assert_eq!(tally.wins() + tally.losses(), n);
                assert!((tally.win_rate() + tally.loss_rate() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn split_trials_covers_total() {
        assert_eq!(split_trials(10, 3), vec![4, 3, 3]);
        assert_eq!(split_trials(2, 4), vec![1, 1, 0, 0]);
        assert_eq!(split_trials(9, 1), vec![9]);
        for (total, jobs) in [(0u64, 1usize), (1, 8), (1_000_003, 7)] {
            assert_eq!(split_trials(total, jobs).iter().sum::<u64>(), total);
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let experiment = Experiment::new(10_000);
        let a = experiment.run(&mut rng_from_seed(Some("repeat")));
        let b = experiment.run(&mut rng_from_seed(Some("repeat")));
        assert_eq!(a, b);
    }

    #[test]
    fn chunked_matches_single_run() {
        let experiment = Experiment::new(12_345);
        let whole = experiment.run(&mut rng_from_seed(Some("chunks")));

        let mut seen = [0u64; 2];
        let chunked = experiment
            .run_chunked(&mut rng_from_seed(Some("chunks")), 1000, |strategy, num| {
                seen[strategy as usize] += num;
                Ok::<(), ()>(())
            })
            .unwrap();

        assert_eq!(whole, chunked);
        assert_eq!(seen, [12_345, 12_345]);
    }

    #[test]
    fn parallel_runs_repeat() {
        let experiment = Experiment::new(20_001);
        let base = chacha_from_seed("parallel");
        let a = experiment.run_parallel(&base, 4);
        let b = experiment.run_parallel(&base, 4);
        assert_eq!(a, b);
        assert_eq!(a.stay.trials(), 20_001);
        assert_eq!(a.switch.trials(), 20_001);
    }

    #[test]
    fn parallel_streams_differ() {
        let base = chacha_from_seed("streams");
        let seed = base.get_seed();
        let mut s0 = ChaCha20Rng::from_seed(seed);
        let mut s1 = ChaCha20Rng::from_seed(seed);
        s1.set_stream(1);
        let a: Vec<u64> = (0..8).map(|_| s0.next_u64()).collect();
        let b: Vec<u64> = (0..8).map(|_| s1.next_u64()).collect();
        assert_ne!(a, b, "different streams of the same seed should not produce the same numbers");
    }

    #[test]
    fn converges_to_theory() {
        let report = Experiment::new(1_000_000).run(&mut rng_from_seed(Some("convergence")));
        assert!((report.stay.win_percent() - 33.33).abs() < 0.5, "stay rate {:.2}% is too far from theory", report.stay.win_percent());
        assert!((report.switch.win_percent() - 66.66).abs() < 0.5, "switch rate {:.2}% is too far from theory", report.switch.win_percent());
    }

    #[test]
    fn parallel_converges_to_theory() {
        let report = Experiment::new(1_000_000).run_parallel(&chacha_from_seed("parallel convergence"), 4);
        assert!((report.stay.win_percent() - 33.33).abs() < 0.5);
        assert!((report.switch.win_percent() - 66.66).abs() < 0.5);
    }
}
