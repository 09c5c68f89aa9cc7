//! White-noise source for percussive bursts.
//!
//! A 32-bit linear congruential generator masked to 30 bits and centered
//! around zero. Statistical quality is irrelevant here - the output is
//! band-pass filtered immediately - so the cheapest possible generator wins.

/// LCG white noise in [-1.0, 1.0).
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    state: u32,
}

const MASK: u32 = 0x3fff_ffff;

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new(1)
    }
}

impl WhiteNoise {
    /// Create a generator with the given starting state (0 is remapped to 1).
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Next noise sample in [-1.0, 1.0).
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.state & MASK) as f32 / 536_870_912.0 - 1.0
    }
}
