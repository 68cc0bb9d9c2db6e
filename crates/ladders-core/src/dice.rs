//! Six-sided dice.
//!
//! A [`DiceSet`] owns its dice and its random number generator, so a set
//! built with [`DiceSet::with_seed`] replays the same sequence of rolls.

use crate::error::GameError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of faces on a die
pub const FACES: u8 = 6;

/// A single die remembering its last value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    value: u8,
}

impl Die {
    /// Create a die and roll it once so it always shows a face
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut die = Self { value: 1 };
        die.roll(rng);
        die
    }

    /// Roll the die, returning the new value
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u8 {
        self.value = rng.gen_range(1..=FACES);
        self.value
    }

    /// Last rolled value, always in `1..=6`
    pub fn value(&self) -> u8 {
        self.value
    }
}

/// Result of rolling every die in a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Value of each die, in die order
    pub values: Vec<u8>,
    /// Sum of `values`
    pub total: u32,
}

/// An ordered set of dice rolled together
#[derive(Debug, Clone)]
pub struct DiceSet {
    dice: Vec<Die>,
    last_total: u32,
    rng: StdRng,
}

impl DiceSet {
    /// Create a set of `count` dice seeded from the operating system
    pub fn new(count: usize) -> Result<Self, GameError> {
        Self::with_rng(count, StdRng::from_entropy())
    }

    /// Create a set of `count` dice with a fixed seed
    pub fn with_seed(count: usize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, mut rng: StdRng) -> Result<Self, GameError> {
        if count < 1 {
            return Err(GameError::InvalidDiceCount(count));
        }

        let dice: Vec<Die> = (0..count).map(|_| Die::new(&mut rng)).collect();
        let last_total = dice.iter().map(|d| u32::from(d.value())).sum();

        Ok(Self {
            dice,
            last_total,
            rng,
        })
    }

    /// Roll every die
    pub fn roll(&mut self) -> DiceRoll {
        let rng = &mut self.rng;
        let values: Vec<u8> = self.dice.iter_mut().map(|die| die.roll(&mut *rng)).collect();
        let total = values.iter().map(|&v| u32::from(v)).sum();
        self.last_total = total;

        DiceRoll { values, total }
    }

    /// Number of dice
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Change the number of dice. New dice are rolled once on creation;
    /// removing dice drops them from the end.
    pub fn set_count(&mut self, count: usize) -> Result<(), GameError> {
        if count < 1 {
            return Err(GameError::InvalidDiceCount(count));
        }

        while self.dice.len() < count {
            let die = Die::new(&mut self.rng);
            self.dice.push(die);
        }
        self.dice.truncate(count);
        self.last_total = self.dice.iter().map(|d| u32::from(d.value())).sum();

        Ok(())
    }

    /// Value showing on the die at `index`
    pub fn die(&self, index: usize) -> Option<u8> {
        self.dice.get(index).map(Die::value)
    }

    /// Values showing on every die
    pub fn last_values(&self) -> Vec<u8> {
        self.dice.iter().map(Die::value).collect()
    }

    /// Sum of the values showing
    pub fn last_total(&self) -> u32 {
        self.last_total
    }

    /// Smallest and largest possible totals for this set
    pub fn total_range(&self) -> (u32, u32) {
        let n = self.dice.len() as u32;
        (n, n * u32::from(FACES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_die_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut die = Die::new(&mut rng);
        for _ in 0..500 {
            let value = die.roll(&mut rng);
            assert!((1..=6).contains(&value));
            assert_eq!(die.value(), value);
        }
    }

    #[test]
    fn test_die_hits_every_face() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut die = Die::new(&mut rng);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[(die.roll(&mut rng) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_roll_total_matches_values() {
        for count in 1..=5 {
            let mut dice = DiceSet::with_seed(count, count as u64).unwrap();
            let (min, max) = dice.total_range();
            for _ in 0..200 {
                let roll = dice.roll();
                assert_eq!(roll.values.len(), count);
                assert!(roll.values.iter().all(|v| (1..=6).contains(v)));
                assert_eq!(roll.total, roll.values.iter().map(|&v| v as u32).sum::<u32>());
                assert!(roll.total >= min && roll.total <= max);
                assert_eq!(dice.last_total(), roll.total);
                assert_eq!(dice.last_values(), roll.values);
            }
        }
    }

    #[test]
    fn test_zero_dice_rejected() {
        assert!(matches!(
            DiceSet::new(0),
            Err(GameError::InvalidDiceCount(0))
        ));
    }

    #[test]
    fn test_seeded_sets_repeat() {
        let mut a = DiceSet::with_seed(2, 99).unwrap();
        let mut b = DiceSet::with_seed(2, 99).unwrap();
        for _ in 0..20 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_set_count_grows_and_shrinks() {
        let mut dice = DiceSet::with_seed(1, 3).unwrap();
        dice.roll();

        dice.set_count(4).unwrap();
        assert_eq!(dice.count(), 4);
        assert!(dice.last_values().iter().all(|v| (1..=6).contains(v)));
        assert_eq!(
            dice.last_total(),
            dice.last_values().iter().map(|&v| v as u32).sum::<u32>()
        );

        let first = dice.die(0);
        dice.set_count(1).unwrap();
        assert_eq!(dice.count(), 1);
        assert_eq!(dice.die(0), first);
        assert_eq!(dice.die(1), None);

        assert!(dice.set_count(0).is_err());
        assert_eq!(dice.count(), 1);
    }
}
