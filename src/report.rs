//! Rendering of experiment results, as the plain text proof or as JSON

use core::fmt;
use std::fmt::Display;

use serde::Serialize;
use serde_json::json;

use crate::experiment::Tally;
use crate::trial::Strategy;

/// The final results of an experiment: the trial count, and the tallies of both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {

    /// Number of trials ran for each strategy
    pub trials: u64,

    /// Tally of the 'stay' strategy
    pub stay: Tally,

    /// Tally of the 'switch' strategy
    pub switch: Tally,

}

impl Report {
    pub fn new(trials: u64, stay: Tally, switch: Tally) -> Self {
        Self { trials, stay, switch }
    }

    /// The tally of a given strategy
    pub fn tally(&self, strategy: Strategy) -> &Tally {
        match strategy {
            Strategy::Stay => &self.stay,
            Strategy::Switch => &self.switch,
        }
    }

    /// The observed win probability of a strategy as a percentage, computed as `(wins / trials) * 100`
    pub fn observed_percent(&self, strategy: Strategy) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        (self.tally(strategy).wins() as f64 / self.trials as f64) * 100.0
    }

    /// Render as a JSON document, with the counts and the observed and theoretical percentages of each strategy
    pub fn to_json(&self) -> serde_json::Result<String> {
        let per_strategy = |strategy: Strategy| {
            let tally = self.tally(strategy);
            json!({
                "wins": tally.wins(),
                "losses": tally.losses(),
                "trials": tally.trials(),
                "observed_percent": self.observed_percent(strategy),
                "theoretical_percent": strategy.theoretical_percent(),
            })
        };
        serde_json::to_string_pretty(&json!({
            "trials": self.trials,
            "stay": per_strategy(Strategy::Stay),
            "switch": per_strategy(Strategy::Switch),
        }))
    }
}

/// The plain text proof, one line per fact:
///
/// ```text
/// Monty Hall Problem Proof
/// Experimenting with 10000000 Trials
/// Theoretical probability for winning without switching: 33.33%
/// Theoretical probability for winning with switching: 66.66%
/// Probability of winning without switching: 33.34%
/// Probability of winning with switching: 66.67%
/// ```
impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Monty Hall Problem Proof")?;
        writeln!(f, "Experimenting with {} Trials", self.trials)?;
        writeln!(f, "Theoretical probability for winning without switching: {}", Strategy::Stay.theoretical_text())?;
        writeln!(f, "Theoretical probability for winning with switching: {}", Strategy::Switch.theoretical_text())?;
        writeln!(f, "Probability of winning without switching: {:.2}%", self.observed_percent(Strategy::Stay))?;
        write!(f, "Probability of winning with switching: {:.2}%", self.observed_percent(Strategy::Switch))
    }
}
