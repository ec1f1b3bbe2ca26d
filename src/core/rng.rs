//! Randomness adapter: uniform samples, die faces, and deterministic sources.
//!
//! ## Key Features
//!
//! - **Injectable**: the resolver and simulator only see [`RandomSource`]
//! - **Deterministic**: same seed produces the identical sample sequence
//! - **Forkable**: independent per-game streams for batch simulation
//!
//! ```
//! use dice_race::core::{roll_die, GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let face = roll_die(rng.next_sample());
//! assert!((1..=6).contains(&face));
//!
//! assert_eq!(roll_die(0.0), 1);
//! assert_eq!(roll_die(0.9), 6);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of faces on the race die.
pub const DIE_FACES: u8 = 6;

/// A source of uniform samples in `[0, 1)`.
///
/// Live play uses an unseeded [`GameRng`]; tests use a seeded one or a
/// [`ScriptedSource`].
pub trait RandomSource {
    /// Draw the next sample in `[0, 1)`.
    fn next_sample(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }
}

/// Convert a uniform sample into a die face `1..=6`.
///
/// Samples outside `[0, 1)` are clamped onto the nearest face.
#[must_use]
pub fn roll_die(sample: f64) -> u8 {
    let face = (sample * f64::from(DIE_FACES)).floor();
    face.clamp(0.0, f64::from(DIE_FACES - 1)) as u8 + 1
}

/// Deterministic RNG backed by ChaCha8.
///
/// Supports forking so each game in a batch gets its own reproducible stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an unseeded RNG for live play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Roll the race die directly.
    pub fn roll(&mut self) -> u8 {
        roll_die(self.next_sample())
    }
}

impl RandomSource for GameRng {
    fn next_sample(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Replays a fixed list of samples, then yields `0.0` forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source that replays `samples` in order.
    #[must_use]
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Create a source whose samples land exactly on the given die faces.
    ///
    /// Faces outside `1..=6` are clamped by [`roll_die`].
    #[must_use]
    pub fn from_faces(faces: &[u8]) -> Self {
        let samples = faces
            .iter()
            .map(|&face| (f64::from(face) - 0.5) / f64::from(DIE_FACES))
            .collect();
        Self::new(samples)
    }

    /// Number of samples drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_sample(&mut self) -> f64 {
        let sample = self.samples.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_die_boundaries() {
        assert_eq!(roll_die(0.0), 1);
        assert_eq!(roll_die(0.166), 1);
        assert_eq!(roll_die(0.5), 4);
        assert_eq!(roll_die(0.9), 6);
        assert_eq!(roll_die(0.999_999), 6);
    }

    #[test]
    fn test_roll_die_clamps_out_of_range() {
        assert_eq!(roll_die(1.0), 6);
        assert_eq!(roll_die(7.5), 6);
        assert_eq!(roll_die(-0.3), 1);
        assert_eq!(roll_die(f64::NAN), 1);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(), rng2.roll());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_samples_in_unit_interval() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let sample = rng.next_sample();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();
        assert_eq!(forked1.seed(), forked2.seed());

        let next1 = rng1.fork();
        assert_ne!(forked1.seed(), next1.seed());
    }

    #[test]
    fn test_scripted_source_falls_back_to_zero() {
        let mut source = ScriptedSource::new(vec![0.9]);

        assert_eq!(roll_die(source.next_sample()), 6);
        assert_eq!(roll_die(source.next_sample()), 1);
        assert_eq!(source.drawn(), 2);
    }

    #[test]
    fn test_scripted_source_from_faces() {
        let mut source = ScriptedSource::from_faces(&[1, 2, 3, 4, 5, 6]);
        let faces: Vec<_> = (0..6).map(|_| roll_die(source.next_sample())).collect();
        assert_eq!(faces, vec![1, 2, 3, 4, 5, 6]);
    }
}
