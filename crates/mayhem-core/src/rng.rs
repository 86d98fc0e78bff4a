//! Deterministic random number generation for fight simulation.
//!
//! All randomness in a fight flows through a single [`FightRng`] seeded once
//! at construction. Two fights built with the same seed and the same roster
//! draw identical random sequences, which is the foundation of the engine's
//! replay guarantee.
//!
//! # Determinism
//!
//! The generator is a pure function of its internal state — there is no
//! external entropy source after seeding. `FightRng` is never global: it is
//! owned by the [`Fight`](crate::fight::Fight) and passed by reference into
//! every call site that needs randomness, keeping determinism auditable.
//!
//! # Example
//!
//! ```
//! use mayhem_core::rng::FightRng;
//!
//! let mut a = FightRng::new(42);
//! let mut b = FightRng::new(42);
//!
//! assert_eq!(a.rand_int(0, 100), b.rand_int(0, 100));
//! assert_eq!(a.rand_real(), b.rand_real());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded deterministic random number generator for one fight.
///
/// Wraps a `ChaCha8Rng` so the stream is reproducible across platforms and
/// rust versions that pin the same `rand_chacha` release.
#[derive(Debug, Clone)]
pub struct FightRng {
    inner: ChaCha8Rng,
}

impl FightRng {
    /// Creates a new generator from a 64-bit seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform integer in the inclusive range `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` — a contract violation by the caller.
    pub fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        assert!(min <= max, "rand_int called with min {min} > max {max}");
        self.inner.gen_range(min..=max)
    }

    /// Returns a uniform float in `[0, 1)`.
    pub fn rand_real(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Returns a uniform index in `[0, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0` — a contract violation by the caller.
    pub fn rand_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "rand_index called with empty range");
        self.inner.gen_range(0..len)
    }

    /// Returns a uniformly chosen element of `items`.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty — a contract violation by the caller.
    pub fn rand_element<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rand_index(items.len())]
    }
}

// =============================================================================
// Tests
// =============================================================================
