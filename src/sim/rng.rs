//! Randomness for bomb placement
//!
//! Placement only ever needs a shuffled list of indices, so the world takes
//! any [`ShuffleSource`]. The default is a seeded PCG generator; tests swap
//! in [`ScriptedShuffle`] to pin exact cells.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Permutes index lists in place
pub trait ShuffleSource {
    fn shuffle(&mut self, indices: &mut [i32]);
}

/// Seeded PCG shuffle (same seed, same placements)
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: Pcg32,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl ShuffleSource for SeededShuffle {
    fn shuffle(&mut self, indices: &mut [i32]) {
        indices.shuffle(&mut self.rng);
    }
}

/// Replays fixed orders, one per `shuffle` call, cycling through the script.
///
/// Scripted values are moved to the front in script order; values the
/// script doesn't mention keep their relative order behind them, so the
/// result is always a permutation of the input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedShuffle {
    script: Vec<Vec<i32>>,
    cursor: usize,
}

impl ScriptedShuffle {
    pub fn new(script: Vec<Vec<i32>>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl ShuffleSource for ScriptedShuffle {
    fn shuffle(&mut self, indices: &mut [i32]) {
        if self.script.is_empty() {
            return;
        }
        let order = &self.script[self.cursor % self.script.len()];
        self.cursor += 1;

        let mut front = 0;
        for value in order {
            if let Some(offset) = indices[front..].iter().position(|v| v == value) {
                indices[front..=front + offset].rotate_right(1);
                front += 1;
            }
        }
    }
}
