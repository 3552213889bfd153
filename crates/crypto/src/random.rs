//! Seeded xorshift generator
//!
//! The game derives every key from this 128-bit xorshift generator, so the
//! update rule and the bounded draw must match it bit for bit.

use crate::types::Seed;

/// Four-word xorshift generator
///
/// Each codec call owns one generator and threads it through its key
/// derivations by `&mut`; the order of draws is part of the file format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    state: [u32; 4],
}

impl Generator {
    pub fn new(state: [u32; 4]) -> Self {
        Self { state }
    }

    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(seed.words())
    }

    /// Advance the state and return the new word
    pub fn next_u32(&mut self) -> u32 {
        let [s0, s1, s2, s3] = self.state;
        let mut t = s0 ^ (s0 << 11);
        t ^= t >> 8;
        t ^= s3 ^ (s3 >> 19);
        self.state = [s1, s2, s3, t];
        t
    }

    /// Draw a value in `[0, max)` by multiply-shift scaling
    ///
    /// This is not a uniform reduction; the slight bias towards low values
    /// is what the game produces and must be kept.
    pub fn next_bounded(&mut self, max: u32) -> u64 {
        (u64::from(self.next_u32()) * u64::from(max)) >> 32
    }

    pub fn state(&self) -> [u32; 4] {
        self.state
    }
}
