//! Single-pole exponential smoother.
//!
//! Used at control rate to ramp per-partial gains so drone level steps are
//! never audible. The recurrence is
//!
//! ```text
//! y[n] = y[n-1] + (1 - a) * (x[n] - y[n-1])
//! ```
//!
//! where `a` is the smoothness constant in [0, 1): larger values smooth
//! harder. At a = 0.975 and 64 Hz control rate the step response reaches
//! ~80% in roughly one second.

/// Exponential smoother toward a stepped target.
#[derive(Debug, Clone)]
pub struct Smoother {
    state: f32,
    smoothness: f32,
}

impl Smoother {
    /// Create a smoother with the given smoothness constant, clamped to [0, 1).
    pub fn new(smoothness: f32) -> Self {
        Self {
            state: 0.0,
            smoothness: smoothness.clamp(0.0, 0.999_999),
        }
    }

    /// Advance one step toward `target` and return the smoothed value.
    #[inline]
    pub fn next(&mut self, target: f32) -> f32 {
        self.state += (1.0 - self.smoothness) * (target - self.state);
        self.state
    }

    /// Current smoothed value without advancing.
    pub fn value(&self) -> f32 {
        self.state
    }

    /// Reset the internal state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_target() {
        let mut s = Smoother::new(0.975);
        let mut out = 0.0;
        for _ in 0..1000 {
            out = s.next(200.0);
        }
        assert!((out - 200.0).abs() < 1.0, "should converge, got {out}");
    }

    #[test]
    fn monotone_rise_on_step() {
        let mut s = Smoother::new(0.9);
        let mut prev = 0.0;
        for _ in 0..50 {
            let out = s.next(100.0);
            assert!(out >= prev);
            prev = out;
        }
    }

    #[test]
    fn zero_smoothness_passes_through() {
        let mut s = Smoother::new(0.0);
        assert_eq!(s.next(42.0), 42.0);
    }
}
