//! Scenario generation: the hidden placement of the car, and the contestant's first pick
//!
//! Both are drawn uniformly and independently from the caller's generator, one draw each, so a scenario costs exactly two draws.
//!

use core::fmt;
use std::fmt::Display;
use std::ops::Index;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::door::{Door, DoorMask, Prize};

/// The hidden placement of the prizes behind the three doors: exactly one car, and two goats
///
/// As a sequence of binary values this is one of `100`, `010` or `001`, which is why it is stored as just the door hiding the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrangement {
    car: Door,
}

impl Arrangement {

    /// All possible arrangements, where the arrangement at index `i` hides the car behind door `i`
    pub const ALL: [Self; Door::NUM] = [
        Self::new(Door::First),
        Self::new(Door::Second),
        Self::new(Door::Third),
    ];

    /// Create the arrangement that hides the car behind the given door
    pub const fn new(car: Door) -> Self {
        Self { car }
    }

    /// Create an arrangement from its binary values, which must contain exactly one 1 (the car) and two 0s
    pub fn from_values(values: [u8; Door::NUM]) -> Result<Self, &'static str> {
        let mut car = None;
        for (door, &value) in Door::ALL.iter().zip(values.iter()) {
            match value {
                0 => {}
                1 if car.is_none() => car = Some(*door),
                1 => return Err("arrangement has more than one car"),
                _ => return Err("arrangement values must be 0 or 1"),
            }
        }
        car.map(Self::new).ok_or("arrangement has no car")
    }

    /// The door hiding the car
    pub const fn car(&self) -> Door {
        self.car
    }

    /// The doors hiding goats
    pub fn goats(&self) -> DoorMask {
        self.car.others()
    }

    /// The prize behind a given door
    pub fn prize(&self, door: Door) -> Prize {
        Prize::from(door == self.car)
    }

    /// The binary value behind a given door, 1 for the car and 0 for a goat
    pub fn value(&self, door: Door) -> u8 {
        self.prize(door).value()
    }

    /// The binary values behind all doors, in door order
    pub fn values(&self) -> [u8; Door::NUM] {
        Door::ALL.map(|door| self.value(door))
    }
}

impl Index<Door> for Arrangement {
    type Output = u8;
    fn index(&self, door: Door) -> &u8 {
        &self.prize(door).data().value
    }
}

/// Display as the binary values, i.e. `010` for a car behind the second door
impl Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.values() {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl FromStr for Arrangement {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != Door::NUM {
            return Err("arrangement must have exactly 3 values");
        }
        let mut values = [0u8; Door::NUM];
        for (value, &b) in values.iter_mut().zip(bytes) {
            *value = match b {
                b'0' => 0,
                b'1' => 1,
                _ => return Err("arrangement values must be 0 or 1"),
            };
        }
        Self::from_values(values)
    }
}

/// Draw an arrangement uniformly from the three possibilities, with one draw over `0..3`
pub fn draw_arrangement<R: Rng>(rng: &mut R) -> Arrangement {
    Arrangement::new(Door::random(rng))
}

/// Draw the contestant's initial pick uniformly, with one draw over `0..3`
pub fn draw_initial_pick<R: Rng>(rng: &mut R) -> Door {
    Door::random(rng)
}

/// A single freshly drawn trial setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scenario {

    /// Where the car actually is
    pub arrangement: Arrangement,

    /// The door the contestant picks first
    pub pick: Door,

}

/// Draw a scenario, drawing the arrangement first and then the initial pick
pub fn draw_scenario<R: Rng>(rng: &mut R) -> Scenario {
    let arrangement = draw_arrangement(rng);
    let pick = draw_initial_pick(rng);
    Scenario { arrangement, pick }
}
