//! Audio-rate sine oscillator.
//!
//! The additive drone layer runs many of these at once (12 per string), so
//! the per-sample path is a phase accumulator and one `sinf` call - no
//! branches, no coefficient work.

use core::f32::consts::TAU;
use libm::sinf;

/// Phase-accumulator sine oscillator.
///
/// Frequency changes take effect on the next sample; phase is preserved
/// across retunes so slow detune drift does not click.
///
/// # Example
///
/// ```rust
/// use lumen_core::SineOscillator;
///
/// let mut osc = SineOscillator::new(32768.0);
/// osc.set_frequency(440.0);
/// let sample = osc.advance(); // in [-1.0, 1.0]
/// ```
#[derive(Debug, Clone)]
pub struct SineOscillator {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Frequency in Hz
    frequency: f32,
}

impl SineOscillator {
    /// Create a new oscillator at the given sample rate, silent at 0 Hz.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
            frequency: 0.0,
        }
    }

    /// Set frequency in Hz. Negative values are clamped to 0.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
        self.phase_inc = self.frequency / self.sample_rate;
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Advance one sample and return the oscillator output in [-1.0, 1.0].
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let out = sinf(self.phase * TAU);
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}
