/// Source of initial-placement jitter for the force layout.
///
/// Implementations must return values in `[-1, 1)`. The layout scales them by the
/// configured jitter radius.
pub trait JitterSource {
    /// Next jitter sample in `[-1, 1)`.
    fn next_jitter(&mut self) -> f64;
}

/// Small deterministic PRNG (SplitMix64).
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Derive an independent generator for a sub-stream (e.g. one step index).
    pub fn derive(seed: u64, stream: u64) -> Self {
        Self::new(seed ^ stream.wrapping_mul(0xD6E8_FEB8_6659_FD93))
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

impl JitterSource for Rng64 {
    fn next_jitter(&mut self) -> f64 {
        self.next_f64_01() * 2.0 - 1.0
    }
}

/// Jitter source that always returns zero. Every unplaced vertex starts at the canvas
/// centre; the simulation separates coincident vertices deterministically.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_jitter(&mut self) -> f64 {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
