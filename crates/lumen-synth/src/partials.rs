//! Additive partial bank: 12 sine oscillators per string.

use crate::constants::{
    AUDIO_RATE, DECR_CUTOFF, DECR_FREQ_MAX, DECR_HF, DECR_SLOPE, DETUNE_FACTOR, DRONE_MASTER_GAIN,
    NUM_PARTIALS,
};
use crate::rng::SynthRng;
use lumen_core::{SineOscillator, freq_rolloff};

/// Normalization so a full-gain bank peaks at `DRONE_MASTER_GAIN` relative
/// to a single unit oscillator: 1 / (partials x 8-bit gain ceiling).
const MIX_SCALER: f32 = 1.0 / (NUM_PARTIALS as f32 * 255.0) * DRONE_MASTER_GAIN;

/// Fixed bank of harmonic partials above a movable cutoff harmonic.
///
/// `retune` places partial `i` at `fundamental x (cutoff_partial + i)`,
/// draws a fresh random detune within `+-DETUNE_FACTOR x base`, and derives
/// a per-partial drone decay step - higher partials decay faster through a
/// power-law rolloff so the texture thins from the top down.
#[derive(Debug, Clone)]
pub struct PartialBank {
    oscillators: [SineOscillator; NUM_PARTIALS],
    base_freq: [f32; NUM_PARTIALS],
    detune: [f32; NUM_PARTIALS],
    freq: [f32; NUM_PARTIALS],
    decrease_step: [i32; NUM_PARTIALS],
}

impl Default for PartialBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialBank {
    /// Create a silent bank.
    pub fn new() -> Self {
        Self {
            oscillators: core::array::from_fn(|_| SineOscillator::new(AUDIO_RATE as f32)),
            base_freq: [0.0; NUM_PARTIALS],
            detune: [0.0; NUM_PARTIALS],
            freq: [0.0; NUM_PARTIALS],
            decrease_step: [0; NUM_PARTIALS],
        }
    }

    /// Retune every partial against a new fundamental and cutoff harmonic.
    ///
    /// `master_decrease_step` is the string's slot-level decay step; the
    /// per-partial step divides it by the frequency rolloff factor, floored
    /// so the division can never blow up.
    pub fn retune(
        &mut self,
        rng: &mut SynthRng,
        fundamental: f32,
        cutoff_partial: u32,
        master_decrease_step: i32,
    ) {
        for i in 0..NUM_PARTIALS {
            self.base_freq[i] = fundamental * (cutoff_partial as f32 + i as f32);

            let span = DETUNE_FACTOR * self.base_freq[i];
            self.detune[i] = rng.bipolar() * span;
            self.freq[i] = self.base_freq[i] + self.detune[i];
            self.oscillators[i].set_frequency(self.freq[i]);

            let scaler = freq_rolloff(self.freq[i], DECR_CUTOFF, DECR_FREQ_MAX, DECR_HF, DECR_SLOPE)
                .max(1e-5);
            self.decrease_step[i] = (master_decrease_step as f32 / scaler) as i32;
        }
    }

    /// Re-derive modulated frequencies from the current LFO value and retune
    /// the oscillators. `lfo` is unipolar [0, 1].
    pub fn apply_lfo(&mut self, lfo: f32) {
        for i in 0..NUM_PARTIALS {
            self.freq[i] = self.base_freq[i] + self.detune[i] * lfo;
            self.oscillators[i].set_frequency(self.freq[i]);
        }
    }

    /// Advance all oscillators one audio sample and mix them against the
    /// given 8-bit smoothed gains.
    #[inline]
    pub fn process(&mut self, gains: &[u8; NUM_PARTIALS]) -> f32 {
        let mut sum = 0.0;
        for (osc, &gain) in self.oscillators.iter_mut().zip(gains.iter()) {
            sum += osc.advance() * f32::from(gain);
        }
        sum * MIX_SCALER
    }

    /// Current modulated frequency of partial `i`.
    pub fn frequency(&self, i: usize) -> f32 {
        self.freq[i]
    }

    /// Unmodulated base frequency of partial `i`.
    pub fn base_frequency(&self, i: usize) -> f32 {
        self.base_freq[i]
    }

    /// Random detune offset of partial `i`.
    pub fn detune(&self, i: usize) -> f32 {
        self.detune[i]
    }

    /// Drone decay step of partial `i`.
    pub fn decrease_step(&self, i: usize) -> i32 {
        self.decrease_step[i]
    }
}
