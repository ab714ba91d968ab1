//! Monte-Carlo proof of the Monty Hall problem, comparing the 'stay' and 'switch' strategies against their theoretical win rates.
//!
//! The game: a car is hidden behind one of three doors, with goats behind the other two. The contestant picks a door, the host (who knows where the car is) opens a different door with a goat, and the contestant may then stay or switch. Staying wins 1/3 of the time, and switching wins 2/3 of the time.
//!
//! By the law of large numbers, the observed win rate over many independent trials converges to the theoretical one, which is what [experiment] measures.
//!

pub mod door;
pub mod scenario;
pub mod trial;
pub mod experiment;
pub mod report;

pub mod cli;

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_seeder::Seeder;

/// Construct a random number generator from a seed string, or use a default-initialized one if no seed is provided
pub fn rng_from_seed<S: AsRef<[u8]>>(seed: Option<S>) -> Box<dyn RngCore> {
    match seed {
        // with a seed, create a ChaCha20Rng from the seed
        Some(seed) => Box::new(chacha_from_seed(seed)),
        // without a seed, use the default random number generator
        None => Box::new(rand::rng()),
    }
}

/// Construct a ChaCha20 generator deterministically from a seed string
///
/// Unlike [rng_from_seed], this keeps the concrete type, which exposes independent streams via [ChaCha20Rng::set_stream].
pub fn chacha_from_seed<S: AsRef<[u8]>>(seed: S) -> ChaCha20Rng {
    Seeder::from(seed.as_ref()).into_rng::<ChaCha20Rng>()
}
