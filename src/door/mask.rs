//! Packed sets of doors, used for the host's candidate doors and for finding the door left to switch to

use rand::Rng;

use std::ops::{BitAnd, BitOr, Not};

use serde::Serialize;

use super::Door;

/// A set of doors, where bit `i` is set when the door with index `i` is in the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
pub struct DoorMask(u8);

impl DoorMask {
    pub const NONE: Self = Self::new(0);
    pub const FULL: Self = Self::new((1u8 << Door::NUM) - 1);

    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn from_many(many: &[Door]) -> Self {
        many.iter().fold(Self::NONE, |mask, &door| mask | door)
    }

    pub const fn empty(&self) -> bool {
        self.bits() == 0
    }

    pub const fn count(&self) -> usize {
        self.bits().count_ones() as usize
    }

    pub const fn contains(&self, other: Self) -> bool {
        (self.bits() & other.bits()) == other.bits()
    }

    pub const fn inverse(&self) -> Self {
        Self::new(Self::FULL.bits() ^ self.bits())
    }

    /// Iterate over the doors in the set, in increasing door order
    pub fn iter(&self) -> impl Iterator<Item = Door> {
        let mask = *self;
        Door::ALL.into_iter().filter(move |&door| mask.contains(door.into()))
    }

    /// The `n`th door of the set in increasing door order, if there are that many
    pub fn nth(&self, n: usize) -> Option<Door> {
        self.iter().nth(n)
    }

    /// The only door in the set, or `None` if the set does not have exactly one door
    pub fn single(&self) -> Option<Door> {
        if self.count() == 1 {
            self.nth(0)
        } else {
            None
        }
    }

    /// Draw a door uniformly from the set, which always consumes one draw from the generator (even for a set of size 1)
    ///
    /// Returns `None` without drawing if the set is empty.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<Door> {
        if self.empty() {
            return None;
        }
        let idx = rng.random_range(0..self.count());
        self.nth(idx)
    }
}

impl BitOr for DoorMask {
    type Output = Self;
    fn bitor(self, other: Self) -> Self {
        Self::new(self.bits() | other.bits())
    }
}

impl BitAnd for DoorMask {
    type Output = Self;
    fn bitand(self, other: Self) -> Self {
        Self::new(self.bits() & other.bits())
    }
}

// inverse, restricted to the three doors
impl Not for DoorMask {
    type Output = Self;
    fn not(self) -> Self {
        self.inverse()
    }
}
