//! Simulated photosensor.
//!
//! Stands in for the installation's light sensor: an ambient level on a
//! slow random walk, punctuated by gestures (a hand shadow, a cloud edge,
//! sun breaking through) that swing the reading hard for a moment. The raw
//! value is then pushed through the same perceptual scaling the hardware
//! applies: 20*log10 into a fixed dB window, normalized onto [0, 1050].

use lumen_synth::constants::LIGHT_RANGE;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Full-scale raw sensor reading (12-bit ADC).
pub const LUX_RAW_MAX: i32 = 4095;

/// Sensor floor: a raw zero reads as 1/256 lux.
const LUX_FLOOR: f32 = 1.0 / 256.0;

/// Perceptual window, dB.
const DB_MIN: f32 = -48.18;
const DB_MAX: f32 = 72.25;

/// Perceptually scale a raw sensor reading onto the engine's light range.
pub fn scale_lux(raw: i32) -> i32 {
    let lux = (raw as f32).max(LUX_FLOOR);
    let db = (20.0 * lux.log10()).clamp(DB_MIN, DB_MAX);
    let norm = (db - DB_MIN) / (DB_MAX - DB_MIN);
    (norm * LIGHT_RANGE).round() as i32
}

/// Ambient light generator with occasional gestures.
#[derive(Debug, Clone)]
pub struct LightSimulator {
    rng: Pcg32,
    ambient: f32,
    gesture: f32,
    /// Probability of a new gesture per control tick, in millionths.
    gesture_prob_micro: u32,
}

impl LightSimulator {
    /// Create a simulator from a seed and a target gesture density
    /// (gestures per minute at a 64 Hz tick rate).
    pub fn new(seed: u64, gestures_per_minute: f32, tick_rate: u32) -> Self {
        let ticks_per_minute = 60.0 * tick_rate as f32;
        let prob = (gestures_per_minute / ticks_per_minute).clamp(0.0, 1.0);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            ambient: 2000.0,
            gesture: 0.0,
            gesture_prob_micro: (prob * 1_000_000.0) as u32,
        }
    }

    /// Produce the next raw sensor reading (one per control tick).
    pub fn next(&mut self) -> i32 {
        // slow ambient drift
        self.ambient += self.rng.gen_range(-8.0..8.0);
        self.ambient = self.ambient.clamp(200.0, 3500.0);

        // gesture onset: shadows darken, breakthroughs brighten
        if self.rng.gen_range(0..1_000_000) < self.gesture_prob_micro {
            let depth = self.rng.gen_range(800.0..2000.0);
            self.gesture = if self.rng.gen_bool(0.6) { -depth } else { depth };
        }
        // gestures release over roughly half a second
        self.gesture *= 0.95;

        let jitter = self.rng.gen_range(-10.0..10.0);
        let raw = self.ambient + self.gesture + jitter;
        (raw as i32).clamp(0, LUX_RAW_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_covers_the_light_range() {
        assert_eq!(scale_lux(0), 0);
        assert_eq!(scale_lux(LUX_RAW_MAX), LIGHT_RANGE as i32);
        // monotone in between
        let mut prev = -1;
        for raw in (0..=LUX_RAW_MAX).step_by(64) {
            let scaled = scale_lux(raw);
            assert!(scaled >= prev);
            prev = scaled;
        }
    }

    #[test]
    fn scaling_is_perceptual_not_linear() {
        // the log mapping spends most of its range on dim light
        assert!(scale_lux(100) > LIGHT_RANGE as i32 / 2);
    }

    #[test]
    fn simulator_stays_in_sensor_range() {
        let mut sim = LightSimulator::new(5, 120.0, 64);
        for _ in 0..100_000 {
            let raw = sim.next();
            assert!((0..=LUX_RAW_MAX).contains(&raw));
        }
    }

    #[test]
    fn simulator_is_seed_deterministic() {
        let mut a = LightSimulator::new(9, 40.0, 64);
        let mut b = LightSimulator::new(9, 40.0, 64);
        for _ in 0..10_000 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn gestures_actually_move_the_signal() {
        let mut sim = LightSimulator::new(2, 240.0, 64);
        let mut min = LUX_RAW_MAX;
        let mut max = 0;
        for _ in 0..64 * 60 {
            let raw = sim.next();
            min = min.min(raw);
            max = max.max(raw);
        }
        assert!(max - min > 500, "a minute of gestures must swing the light");
    }
}
