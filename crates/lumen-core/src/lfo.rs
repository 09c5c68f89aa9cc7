//! Stepped triangle LFO for slow detune drift.
//!
//! Runs at a very low update rate (a few Hz): the caller decides how often
//! to call [`TriangleLfo::next`] and passes that rate to the constructor.
//! Output is unipolar [0.0, 1.0], rising then falling linearly - the drone
//! layer scales it by a per-partial detune offset.

/// Counter-based unipolar triangle oscillator.
///
/// The period is quantized to whole update steps; rates faster than the
/// update rate degenerate to the shortest representable ramp (one step up,
/// one step down).
#[derive(Debug, Clone)]
pub struct TriangleLfo {
    update_rate: f32,
    timer: i32,
    step: i32,
    half_period: i32,
}

impl TriangleLfo {
    /// Create an LFO that will be ticked at `update_rate` Hz.
    pub fn new(update_rate: f32) -> Self {
        let mut lfo = Self {
            update_rate,
            timer: 0,
            step: 1,
            half_period: 1,
        };
        lfo.set_rate(0.1);
        lfo
    }

    /// Set the oscillation rate in Hz and restart the ramp from zero.
    pub fn set_rate(&mut self, rate_hz: f32) {
        let period = if rate_hz > 0.0 {
            (self.update_rate / rate_hz) as i32
        } else {
            i32::MAX
        };
        self.half_period = (period / 2).max(1);
        self.timer = 0;
        self.step = 1;
    }

    /// Advance one update step and return the current value in [0.0, 1.0].
    #[inline]
    pub fn next(&mut self) -> f32 {
        let value = self.timer as f32 / self.half_period as f32;
        if self.timer == 0 {
            self.step = 1;
        } else if self.timer >= self.half_period {
            self.step = -1;
        }
        self.timer += self.step;
        value
    }
}
