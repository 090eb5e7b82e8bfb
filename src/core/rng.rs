//! Deterministic random number generation for shuffles and random discards.
//!
//! A match is seeded once at creation. Replaying the same actions against the
//! same seed reproduces every shuffle, which keeps archived snapshots and event
//! logs consistent with each other.
//!
//! ```
//! use rust_duel::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seeded ChaCha8 RNG whose position can be captured and restored.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle a persistent vector.
    pub fn shuffle_vector<T: Clone>(&mut self, vector: &mut im::Vector<T>) {
        let mut items: Vec<T> = vector.iter().cloned().collect();
        self.shuffle(&mut items);
        *vector = items.into_iter().collect();
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

impl Serialize for GameRng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        GameRngState::deserialize(deserializer).map(|state| GameRng::from_state(&state))
    }
}

/// Serializable RNG position.
///
/// Uses the ChaCha8 word position, so capture is O(1) however many values
/// have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut data: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..20 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
        assert_ne!(shuffled(&mut GameRng::new(43)), shuffled(&mut GameRng::new(42)));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=20).collect();

        rng.shuffle(&mut data);
        assert_ne!(data, (1..=20).collect::<Vec<_>>());

        data.sort_unstable();
        assert_eq!(data, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_vector() {
        let mut rng = GameRng::new(3);
        let mut deck: im::Vector<u32> = (0..10).collect();
        rng.shuffle_vector(&mut deck);

        assert_eq!(deck.len(), 10);
        let mut sorted: Vec<u32> = deck.iter().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore_continues_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..5 {
            shuffled(&mut rng);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..3).map(|_| shuffled(&mut rng)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..3).map(|_| shuffled(&mut restored)).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_serde_through_state() {
        let mut rng = GameRng::new(9);
        shuffled(&mut rng);

        let bytes = bincode::serialize(&rng).unwrap();
        let mut back: GameRng = bincode::deserialize(&bytes).unwrap();
        assert_eq!(rng, back);
        assert_eq!(shuffled(&mut rng), shuffled(&mut back));
    }
}
