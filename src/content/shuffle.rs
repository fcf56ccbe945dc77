//! Seeded presentation order.
//!
//! A Park-Miller linear-congruential generator drives a Fisher-Yates
//! shuffle. The generator is an explicit value so the same seed always
//! yields the same permutation.

/// LCG multiplier (7^5)
pub const MULTIPLIER: u64 = 16_807;

/// LCG modulus (2^31 - 1)
pub const MODULUS: u64 = 2_147_483_647;

/// Seed used for the archive's presentation order
pub const DEFAULT_SEED: u64 = 9001;

/// Park-Miller minimal standard generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Create a generator; a seed that reduces to zero is remapped so the
    /// sequence never degenerates.
    pub fn new(seed: u64) -> Self {
        let mut state = seed % MODULUS;
        if state == 0 {
            state = MODULUS - 1;
        }
        Self { state }
    }

    /// Advance and return the next state, in `1..MODULUS`
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as u32
    }

    /// Draw a uniform index in `0..bound`
    ///
    /// Equivalent to `floor((next - 1) / (MODULUS - 1) * bound)` without
    /// going through floating point.
    pub fn next_index(&mut self, bound: usize) -> usize {
        let unit = u128::from(self.next_u32() - 1);
        (unit * bound as u128 / u128::from(MODULUS - 1)) as usize
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Fisher-Yates shuffle in place
pub fn shuffle<T>(items: &mut [T], rng: &mut Lcg) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
