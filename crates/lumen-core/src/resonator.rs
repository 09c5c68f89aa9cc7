//! Two-pole resonant band-pass filter.
//!
//! The percussive "pulse" layer is a noise burst shaped by this filter:
//! a pole pair at the target frequency with radius set by the bandwidth,
//!
//! ```text
//! R  = exp(-2π · (fc/Q) / sample_rate)
//! a1 = 2·R·cos(2π · fc / sample_rate)
//! a2 = -R²
//! b0 = R · gain · (1 - R),  b2 = -b0
//! y[n] = b0·x[n] + b2·x[n-2] + a1·y[n-1] + a2·y[n-2]
//! ```
//!
//! The feed-forward gain is scaled by `(1 - R)` so the passband peak tracks
//! `gain` roughly independently of Q. Coefficients are recomputed only on
//! parameter changes, never per sample.

use core::f32::consts::TAU;
use libm::{cosf, expf};

/// Resonant two-pole band-pass filter with gain-compensated peak.
#[derive(Debug, Clone)]
pub struct Resonator {
    /// 2π / sample_rate, precomputed at construction
    omega_factor: f32,

    fc: f32,
    q: f32,
    gain: f32,

    /// Pole radius
    r: f32,
    b0: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Resonator {
    /// Create a resonator at the given sample rate with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            omega_factor: TAU / sample_rate,
            fc: 1000.0,
            q: 1.0,
            gain: 1.0,
            r: 0.0,
            b0: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        };
        filter.recalculate();
        filter
    }

    /// Set center frequency, Q and peak gain in one call.
    ///
    /// Values are clamped to safe floors: frequency >= 20 Hz, Q >= 1,
    /// gain >= 0.
    pub fn set(&mut self, freq_hz: f32, q: f32, gain: f32) {
        self.fc = freq_hz.max(20.0);
        self.q = q.max(1.0);
        self.gain = gain.max(0.0);
        self.recalculate();
    }

    /// Set only the peak gain, reusing the current pole placement.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
        self.b0 = self.r * self.gain * (1.0 - self.r);
        self.b2 = -self.b0;
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b2 * self.x2 + self.a1 * self.y1 + self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }

    /// Clear the delay lines without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn recalculate(&mut self) {
        let bandwidth = self.fc / self.q;
        self.r = expf(-self.omega_factor * bandwidth);
        // stored with signs folded in: these are -a1, -a2 of the direct form
        self.a2 = -self.r * self.r;
        self.a1 = 2.0 * self.r * cosf(self.omega_factor * self.fc);
        self.b0 = self.r * self.gain * (1.0 - self.r);
        self.b2 = -self.b0;
    }
}
