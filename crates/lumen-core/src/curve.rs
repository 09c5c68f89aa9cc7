//! Control-signal mapping curves.
//!
//! Two shapes recur throughout the engine:
//!
//! - a **bell curve**: cosine bump over a bounded input range, used to map
//!   activity statistics (trigger rate, light excursion) onto pulse gain and
//!   resonance - quiet at both extremes, loudest in the middle;
//! - a **frequency rolloff**: power-law attenuation above a cutoff, used to
//!   weight partial gains and decay steps so high partials sound softer and
//!   die faster.
//!
//! The gain rolloff runs for every partial on every control tick, so it is
//! tabulated once at startup ([`FreqGainTable`]); the decay-step rolloff
//! only runs at retune and uses [`freq_rolloff`] directly.

use libm::{cosf, floorf, powf};

/// Cosine bell mapping of `input` over `[in_min, in_max]` onto
/// `[out_min, out_max]`.
///
/// Returns `out_min` at both range edges and `out_max` at the midpoint;
/// inputs outside the range are clamped to the nearest edge.
pub fn bell_curve(input: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let clamped = input.clamp(in_min, in_max);
    let norm = (clamped - in_min) / (in_max - in_min);
    let out = out_min + (1.0 - cosf(core::f32::consts::TAU * norm)) * 0.5 * (out_max - out_min);
    out.clamp(out_min, out_max)
}

/// Power-law attenuation factor for a frequency above a cutoff.
///
/// Returns 1.0 for `freq <= cutoff`; beyond the cutoff the factor falls as
/// `1 - ((freq - cutoff) / (freq_max - cutoff))^slope · (1 - floor)`,
/// clamped to `floor`. A slope below 1 sags early, above 1 holds on longer.
pub fn freq_rolloff(freq: f32, cutoff: f32, freq_max: f32, floor: f32, slope: f32) -> f32 {
    let over = freq - cutoff;
    if over <= 0.0 {
        return 1.0;
    }
    let factor = 1.0 - powf(over / (freq_max - cutoff), slope) * (1.0 - floor);
    factor.max(floor)
}

/// Number of bins in a [`FreqGainTable`].
pub const FREQ_GAIN_TABLE_SIZE: usize = 128;

/// Tabulated [`freq_rolloff`] over linear frequency bins.
///
/// Built once at engine startup and shared immutably by every string; the
/// lookup is a subtraction, one divide and an index - no `powf` on the
/// control path.
#[derive(Debug, Clone)]
pub struct FreqGainTable {
    table: [f32; FREQ_GAIN_TABLE_SIZE],
    cutoff: f32,
    step: f32,
}

impl FreqGainTable {
    /// Precompute the attenuation table for the given curve parameters.
    pub fn build(cutoff: f32, freq_max: f32, floor: f32, slope: f32) -> Self {
        let range = freq_max - cutoff + 1.0;
        let step = range / FREQ_GAIN_TABLE_SIZE as f32;
        let mut table = [0.0; FREQ_GAIN_TABLE_SIZE];
        for (n, slot) in table.iter_mut().enumerate() {
            let f = n as f32 * step;
            let g = 1.0 - powf(f / range, slope) * (1.0 - floor);
            *slot = g.max(floor);
        }
        Self {
            table,
            cutoff,
            step,
        }
    }

    /// Attenuation factor for `freq`; 1.0 at or below the cutoff.
    pub fn factor(&self, freq: f32) -> f32 {
        let over = freq - self.cutoff;
        if over <= 0.0 {
            return 1.0;
        }
        // nearest-bin lookup, clamped so frequencies past the table end
        // saturate at the floor instead of indexing out of range
        let bin = (floorf(over / self.step) as usize).min(FREQ_GAIN_TABLE_SIZE - 1);
        self.table[bin]
    }

    /// Scale an 8-bit gain by the attenuation factor for `freq`.
    #[inline]
    pub fn scale(&self, freq: f32, gain: u8) -> u8 {
        if freq <= self.cutoff {
            return gain;
        }
        (f32::from(gain) * self.factor(freq)) as u8
    }
}
