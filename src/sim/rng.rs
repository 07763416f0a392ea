//! Deterministic random number generator
//!
//! A 1024-lag multiply-with-carry generator seeded through an xorshift
//! recurrence. Same seed, same draws: obstacle gap placement for a session
//! is fully determined by the seed reported in the score line.

use rand::{RngCore, SeedableRng};

/// Size of the lag table
const LAG: usize = 1024;
/// Multiplier for the multiply-with-carry step
const MULTIPLIER: u64 = 123_471_786;
/// Carry value after seeding
const INITIAL_CARRY: u32 = 8_471_623;
/// Modulus complement for the MWC output
const R: u32 = 0xffff_fffe;

/// Seedable 1024-lag multiply-with-carry generator
#[derive(Clone)]
pub struct Random {
    q: Box<[u32; LAG]>,
    carry: u32,
    index: usize,
}

impl std::fmt::Debug for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Random")
            .field("carry", &self.carry)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Random {
    pub fn new(seed: u32) -> Self {
        let mut rng = Self {
            q: Box::new([0; LAG]),
            carry: INITIAL_CARRY,
            index: LAG - 1,
        };
        rng.set_seed(seed);
        rng
    }

    /// Reinitialize the whole generator state from `seed`
    pub fn set_seed(&mut self, mut seed: u32) {
        for slot in self.q.iter_mut() {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            *slot = seed;
        }
        self.carry = INITIAL_CARRY;
        self.index = LAG - 1;
    }

    /// One raw 32-bit draw
    fn generate_u32(&mut self) -> u32 {
        self.index = (self.index + 1) & (LAG - 1);
        let t = MULTIPLIER * u64::from(self.q[self.index]) + u64::from(self.carry);
        self.carry = (t >> 32) as u32;
        let mut x = t.wrapping_add(u64::from(self.carry)) as u32;
        if x < self.carry {
            x = x.wrapping_add(1);
            self.carry = self.carry.wrapping_add(1);
        }
        self.q[self.index] = R.wrapping_sub(x);
        self.q[self.index]
    }

    /// Draw a seed for a follow-up stream
    pub fn next_seed(&mut self) -> u32 {
        self.generate_u32()
    }

    /// Uniform draw in [0, 1)
    pub fn generate(&mut self) -> f64 {
        f64::from(self.generate_u32()) / 4_294_967_296.0
    }

    /// Uniform draw in [0, count - 1]
    pub fn generate_count(&mut self, count: u32) -> u32 {
        (self.generate() * f64::from(count)) as u32
    }

    /// Uniform integer in [min, max]
    pub fn generate_range_i32(&mut self, min: i32, max: i32) -> i32 {
        let span = f64::from(max) - f64::from(min) + 1.0;
        (self.generate() * span) as i32 + min
    }

    /// Uniform integer in [min, max]
    pub fn generate_range_u32(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max) - f64::from(min) + 1.0;
        (self.generate() * span) as u32 + min
    }

    /// Uniform real in [min, max].
    ///
    /// Normalizes by 2^32 - 1 rather than 2^32, so `max` itself is reachable.
    pub fn generate_range_f64(&mut self, min: f64, max: f64) -> f64 {
        (f64::from(self.generate_u32()) / 4_294_967_295.0) * (max - min) + min
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        self.generate_u32()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.generate_u32());
        let high = u64::from(self.generate_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.generate_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Random {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Seed derived from the system clock, for sessions without a pinned seed
pub fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(0)
}
