//! Randomness capability used by the generator.
//!
//! Generation only ever needs uniform draws in `[0, 1)`. Anything that can
//! produce those can drive it, which keeps tests free of real randomness.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`. Not required to be
/// cryptographically secure.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Index into a sequence of `len` items, `floor(r * len)`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty sequence");
        let idx = (self.next_unit() * len as f64) as usize;
        // guards against a misbehaving source returning 1.0
        idx.min(len - 1)
    }

    /// Fair coin, true when the draw lands above one half.
    fn coin(&mut self) -> bool {
        self.next_unit() > 0.5
    }
}

/// Adapter from any `rand` generator.
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source, same seed gives the same passwords.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
