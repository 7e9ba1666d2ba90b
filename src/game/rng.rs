//! Deterministic random source shared by every implementation of the duel
//!
//! The generator is Mulberry32: a 32-bit counter advanced by a fixed odd
//! increment and passed through an integer mixing function. Output is a
//! pure function of the seed and the number of draws.

use rand::{Error, RngCore, SeedableRng};

/// Stream constant XORed into the match seed for combatant A's angle draw
pub const JITTER_SEED_A: u32 = 0x9E37_79B9;
/// Stream constant XORed into the match seed for combatant B's angle draw
pub const JITTER_SEED_B: u32 = 0x85EB_CA6B;

const INCREMENT: u32 = 0x6D2B_79F5;
const UNIT_DENOMINATOR: f64 = 4_294_967_296.0;

/// Counter-based PRNG producing uniform values in [0,1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelRng {
    state: u32,
}

impl DuelRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next uniform value in [0,1).
    /// Computed as `next_u32() / 2^32`, exact in f64 on every platform.
    pub fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / UNIT_DENOMINATOR
    }
}

impl RngCore for DuelRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.next_u32() as u64;
        let high = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for DuelRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
