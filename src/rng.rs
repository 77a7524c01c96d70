/// Deterministic RNG based on splitmix64. Every stage gets its own stream
/// derived from the run seed, so parallel work does not depend on scheduling.

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Seed for the `index`-th stream of a stage identified by `salt`.
#[inline]
pub fn stream_seed(seed: u64, salt: u64, index: u64) -> u64 {
    splitmix64(seed ^ salt) ^ splitmix64(index.wrapping_add(salt))
}

/// Simple sequential RNG.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    /// Uniform in [0, 1) with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / 9007199254740992.0
    }

    /// Uniform in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform in [-1, 1].
    pub fn signed_unit(&mut self) -> f64 {
        2.0 * self.next_f64() - 1.0
    }

    /// Uniform in [0, max). `max` must be non-zero.
    pub fn range_usize(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }

    /// Uniform in [lo, hi). Requires `lo < hi`.
    pub fn between(&mut self, lo: usize, hi: usize) -> usize {
        lo + self.range_usize(hi - lo)
    }

    /// Bernoulli draw.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
