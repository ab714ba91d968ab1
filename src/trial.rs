//! Trial evaluation: given where the car is and what the contestant picked first, decide whether each strategy wins
//!
//! The 'stay' strategy needs nothing but the scenario. The 'switch' strategy has to play out the host opening a door first, which is the only place with conditional logic in the game:
//!
//! 1. The host considers the doors the contestant did not pick.
//! 2. Of those, only doors hiding a goat may be opened. There are 2 when the contestant picked the car, and 1 otherwise.
//! 3. The host opens one of them at random. This is always a real draw from the generator, even when there is just one candidate.
//! 4. The contestant switches to the single door that is neither their pick nor the opened one.
//!

use core::fmt;
use std::fmt::Display;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::door::{Door, DoorMask};
use crate::scenario::Arrangement;

/// The result of a single trial, which is the binary value behind the final pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Loss = 0,
    Win = 1,
}

impl Outcome {

    /// The binary value of the outcome, 1 for a win and 0 for a loss
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }

    /// The outcome of ending the game on a given door
    pub fn of(arrangement: &Arrangement, door: Door) -> Self {
        if arrangement.prize(door).is_car() { Self::Win } else { Self::Loss }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// The contestant's policy after the host opens a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {

    /// Keep the initial pick, ignoring the host entirely
    Stay,

    /// Move to the other unopened door
    Switch,

}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::Stay, Self::Switch];

    /// The theoretical probability of winning, as a fraction
    pub fn theoretical(self) -> f64 {
        match self {
            Self::Stay => 1.0 / 3.0,
            Self::Switch => 2.0 / 3.0,
        }
    }

    /// The theoretical probability of winning, as the percentage that is reported, truncated to two decimals
    pub fn theoretical_percent(self) -> f64 {
        match self {
            Self::Stay => 33.33,
            Self::Switch => 66.66,
        }
    }

    /// The theoretical probability of winning, as the percentage text that is reported
    pub const fn theoretical_text(self) -> &'static str {
        match self {
            Self::Stay => "33.33%",
            Self::Switch => "66.66%",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => write!(f, "stay"),
            Self::Switch => write!(f, "switch"),
        }
    }
}

impl FromStr for Strategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stay" => Ok(Self::Stay),
            "switch" => Ok(Self::Switch),
            _ => Err("invalid strategy"),
        }
    }
}

/// A full record of one trial of the 'switch' strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwitchPlay {

    /// The contestant's first pick
    pub initial: Door,

    /// The goat door opened by the host
    pub revealed: Door,

    /// The door the contestant switched to
    pub final_pick: Door,

    /// Whether the switched-to door hides the car
    pub outcome: Outcome,

}

/// Evaluate the 'stay' strategy, which wins exactly when the initial pick hides the car
///
/// This does not consume any randomness.
pub fn evaluate_stay(arrangement: &Arrangement, initial_pick: Door) -> Outcome {
    Outcome::of(arrangement, initial_pick)
}

/// The doors the host is allowed to open: not the contestant's pick, and not the car
pub fn reveal_candidates(arrangement: &Arrangement, initial_pick: Door) -> DoorMask {
    initial_pick.others() & arrangement.goats()
}

/// Simulate the host opening a goat door that the contestant did not pick, drawing uniformly among the candidates
///
/// One draw is always consumed from the generator, even when the host has no real choice.
pub fn host_reveal<R: Rng>(arrangement: &Arrangement, initial_pick: Door, rng: &mut R) -> Door {
    let candidates = reveal_candidates(arrangement, initial_pick);
    debug_assert!(matches!(candidates.count(), 1 | 2), "host must have 1 or 2 goat doors to open, got {:?}", candidates);
    candidates.choose(rng).expect("a goat door is always left for the host to open")
}

/// Play out a whole trial of the 'switch' strategy, recording every door involved
pub fn play_switch<R: Rng>(arrangement: &Arrangement, initial_pick: Door, rng: &mut R) -> SwitchPlay {
    let revealed = host_reveal(arrangement, initial_pick, rng);

    // the only door left is the one that is neither picked nor opened
    let final_pick = (initial_pick.others() & revealed.others())
        .single()
        .expect("exactly one door is left after a pick and a reveal");

    SwitchPlay {
        initial: initial_pick,
        revealed,
        final_pick,
        outcome: Outcome::of(arrangement, final_pick),
    }
}

/// Evaluate the 'switch' strategy, which first has the host open a goat door, and then moves to the remaining door
pub fn evaluate_switch<R: Rng>(arrangement: &Arrangement, initial_pick: Door, rng: &mut R) -> Outcome {
    play_switch(arrangement, initial_pick, rng).outcome
}

/// Evaluate any strategy on a scenario, consuming randomness only for the host's reveal when switching
pub fn evaluate<R: Rng>(strategy: Strategy, arrangement: &Arrangement, initial_pick: Door, rng: &mut R) -> Outcome {
    match strategy {
        Strategy::Stay => evaluate_stay(arrangement, initial_pick),
        Strategy::Switch => evaluate_switch(arrangement, initial_pick, rng),
    }
}
