//! Six-sided dice.
//!
//! Resolvers never touch a random number generator directly. They roll
//! through a [`DiceSource`], which callers inject:
//!
//! - [`SeededDice`]: ChaCha8-backed dice, reproducible from a `u64` seed
//! - [`ScriptedDice`]: replays a fixed sequence of faces
//!
//! # Example
//!
//! ```
//! use chainmail_core::dice::{DiceSource, ScriptedDice, SeededDice};
//!
//! let mut a = SeededDice::new(7);
//! let mut b = SeededDice::new(7);
//! assert_eq!(a.roll_dice(10), b.roll_dice(10));
//!
//! let mut scripted = ScriptedDice::new([6, 1, 4]).unwrap();
//! assert_eq!(scripted.roll_dice(3), vec![6, 1, 4]);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Source of uniformly distributed d6 rolls.
///
/// Implementors only provide [`roll_die`](DiceSource::roll_die); rolling a
/// batch is defined as that many independent single rolls, in order.
pub trait DiceSource {
    /// Rolls one die, returning a face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Rolls `n` dice. `n == 0` yields an empty vector.
    fn roll_dice(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.roll_die()).collect()
    }
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

// =============================================================================
// SeededDice
// =============================================================================

/// Dice backed by a seeded ChaCha8 generator.
///
/// Two instances created from the same seed produce identical roll sequences.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededDice {
    /// Creates dice from an explicit seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates dice from a seed drawn from the thread-local generator.
    ///
    /// The chosen seed is still available through [`seed`](Self::seed), so a
    /// round rolled with these dice can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed these dice were created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Re-seeds the generator, restarting the roll sequence.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

impl DiceSource for SeededDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.rng.gen_range(1..=DIE_FACES);
        tracing::trace!(face, "rolled die");
        face
    }
}

// =============================================================================
// ScriptedDice
// =============================================================================

/// Dice that replay a predetermined sequence of faces.
///
/// Running out of faces is a caller error and panics.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    /// Creates dice that will return `faces` in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDieFace`] if any face is outside `1..=6`.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Result<Self> {
        let faces: VecDeque<u8> = faces.into_iter().collect();
        if let Some(&bad) = faces.iter().find(|f| !(1..=DIE_FACES).contains(*f)) {
            return Err(Error::InvalidDieFace(bad));
        }
        Ok(Self { faces })
    }

    /// Number of faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        match self.faces.pop_front() {
            Some(face) => face,
            None => panic!("scripted dice exhausted"),
        }
    }
}
