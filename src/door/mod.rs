//! Defines the three doors of the game show, the prizes behind them, and masks for working with sets of doors
//!
//! Doors are packed enumerations with an index in `0..3`, and sets of doors are bitmasks, which keeps every trial allocation-free.
//!

use rand::Rng;

use core::fmt;
use std::fmt::Display;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod mask;

pub use mask::DoorMask;

// a helper that counts the number of items in a sequence of macro arguments
macro_rules! count_items {
    () => { 0 };
    ($head:ident $(, $tail:ident)*) => { 1 + count_items!($($tail),*) };
}

// a macro that defines a 'kind', which is a packed enumeration of items with associated data per each
macro_rules! make_kind {
    (
        $kind:ident($type:ident) : $repr:ty {
            $( $name:ident => $data:expr ),* $(,)?
        }
    ) => {
        #[repr($repr)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        pub enum $kind {
            $( $name , )*
        }

        impl $kind {
            pub const NUM: usize = count_items!($( $name ),*);
            pub const ALL: [Self; Self::NUM] = [
                $( Self::$name , )*
            ];

            pub const DATA: &'static [$type; Self::NUM] = &[
                $( $data, )*
            ];

            pub const fn index(self) -> $repr {
                self as $repr
            }

            pub const fn from_index(index: $repr) -> Self {
                Self::ALL[index as usize]
            }

            pub const fn data(self) -> &'static $type {
                &Self::DATA[self.index() as usize]
            }
        }

        impl Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.data().text)
            }
        }

        impl FromStr for $kind {
            type Err = &'static str;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                for item in Self::ALL {
                    if item.data().text == s {
                        return Ok(item);
                    }
                }
                Err(concat!("invalid ", stringify!($kind)))
            }
        }
    };
}

/// Per-door data
pub struct DoorData {
    pub text: &'static str,
}

make_kind! {
    Door(DoorData) : u8 {
        First  => DoorData { text: "1" },
        Second => DoorData { text: "2" },
        Third  => DoorData { text: "3" },
    }
}

impl Door {

    /// Draw a door uniformly at random, consuming exactly one draw over `0..3` from the generator
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_index(rng.random_range(0..Self::NUM) as u8)
    }

    /// The mask containing every door except this one
    pub fn others(self) -> DoorMask {
        !DoorMask::from(self)
    }
}


/// Per-prize data, where `value` is the binary encoding used by arrangements (1 for the car)
pub struct PrizeData {
    pub text: &'static str,
    pub value: u8,
}

make_kind! {
    Prize(PrizeData) : u8 {
        Goat => PrizeData { text: "goat", value: 0 },
        Car  => PrizeData { text: "car", value: 1 },
    }
}

impl Prize {

    /// The binary value of the prize: 1 for the car, 0 for a goat
    pub const fn value(self) -> u8 {
        self.data().value
    }

    pub const fn is_car(self) -> bool {
        matches!(self, Self::Car)
    }
}

impl From<bool> for Prize {
    fn from(is_car: bool) -> Self {
        if is_car { Self::Car } else { Self::Goat }
    }
}

impl From<Door> for DoorMask {
    fn from(door: Door) -> Self {
        Self::new(1u8 << door.index())
    }
}

impl BitOr<Door> for DoorMask {
    type Output = Self;
    fn bitor(self, door: Door) -> Self {
        self | Self::from(door)
    }
}

impl BitAnd<Door> for DoorMask {
    type Output = Self;
    fn bitand(self, door: Door) -> Self {
        self & Self::from(door)
    }
}

impl Not for Door {
    type Output = DoorMask;
    fn not(self) -> DoorMask {
        self.others()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_roundtrip_idx() {
        for idx in 0..Door::NUM {
            let door = Door::from_index(idx as u8);
            assert_eq!(door, Door::ALL[idx], "created door does not match expected builtin door from lookup table");
            assert_eq!(idx, door.index() as usize, "creation index does not match computed index");
        }
    }

    #[test]
    fn door_parse_all() {
        for door in Door::ALL {
            let text = door.to_string();
            assert_eq!(door, Door::from_str(&text).unwrap(), "parsed door does not match the displayed door");
        }
    }

    #[test]
    fn door_parse_invalid() {
        assert!(Door::from_str("0").is_err());
        assert!(Door::from_str("4").is_err());
        assert!(Door::from_str("12").is_err());
        assert!(Door::from_str("").is_err());
        assert!(Door::from_str("first").is_err());
    }

    #[test]
    fn door_others() {
        for door in Door::ALL {
            let others = door.others();
            assert_eq!(others.count(), 2, "expected exactly 2 other doors");
            assert!(!others.contains(door.into()), "others should not contain the door itself");
            assert_eq!(others | door, DoorMask::FULL);
            assert_eq!(!door, others);
        }
    }

    #[test]
    fn door_random_covers_all() {
        let mut rng = crate::rng_from_seed(Some("doors"));
        let mut seen = DoorMask::NONE;
        for _ in 0..100 {
            seen = seen | Door::random(&mut rng);
        }
        assert_eq!(seen, DoorMask::FULL, "100 draws should hit every door");
    }

    #[test]
    fn prize_values() {
        assert_eq!(Prize::Goat.value(), 0);
        assert_eq!(Prize::Car.value(), 1);
        assert!(Prize::Car.is_car());
        assert!(!Prize::Goat.is_car());
        assert_eq!(Prize::from(true), Prize::Car);
        assert_eq!(Prize::from(false), Prize::Goat);
        assert_eq!(Prize::from_str("car").unwrap(), Prize::Car);
        assert!(Prize::from_str("donkey").is_err());
    }
}
