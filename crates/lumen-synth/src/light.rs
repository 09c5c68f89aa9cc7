//! Light-signal conditioning and the slow behavioral statistics.
//!
//! Three pieces, all control-rate:
//!
//! * [`LightConditioner`] turns a raw + perceptually scaled sample pair into
//!   the slow average (chord selection), the adaptively scaled delta
//!   (event energy) and the trigger flag.
//! * [`TriggerRate`] counts triggers per one-second interval and maps the
//!   rolling rate through a bell curve onto the pulse master gain.
//! * [`LightExcursion`] tracks the min/max spread of the scaled signal over
//!   the last minute and maps it, bell-shaped again, onto the pulse
//!   resonance.

use crate::constants::{
    CONTROL_RATE, DELTA_ROLLING_SIZE, DELTA_SCALER_DEFAULT, DELTA_SCALER_MAX, DELTA_SCALER_MIN,
    LIGHT_EXCURSION_INTERVAL_SECS, LIGHT_EXCURSION_MAX, LIGHT_EXCURSION_MIN,
    LIGHT_FAST_ROLLING_SIZE, LIGHT_SLOW_ROLLING_SIZE, LIGHT_TRIGGER_THRESHOLD,
    PULSE_MASTER_GAIN_MAX, PULSE_MASTER_GAIN_MIN, PULSE_RESONANCE_MAX, PULSE_RESONANCE_MIN,
    TRIGGERS_AVG_MAX, TRIGGERS_AVG_MIN, TRIGGERS_INTERVAL_TICKS, TRIGGERS_ROLLING_SIZE,
};
use lumen_core::{RollingAverage, bell_curve, map_range};

/// One conditioned control-tick observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightFrame {
    /// Slow rolling average of the scaled signal; selects the chord band.
    pub slow_avg: i32,
    /// Adaptively scaled deviation of the raw signal from its fast average.
    pub delta: i32,
    /// True when `delta` exceeds the trigger threshold.
    pub triggered: bool,
}

/// Adaptive delta detection over the raw light signal.
///
/// The scaler adapts so the installation stays lively in flat light and
/// does not saturate in busy light: a delta average below the trigger
/// threshold drives the scaler up (to 20x), one above drives it down
/// toward its 0.5x floor. The scaler is kept in thousandths so the whole
/// path stays in integers.
#[derive(Debug, Clone)]
pub struct LightConditioner {
    fast: RollingAverage<LIGHT_FAST_ROLLING_SIZE>,
    slow: RollingAverage<LIGHT_SLOW_ROLLING_SIZE>,
    delta: RollingAverage<DELTA_ROLLING_SIZE>,
    scaler_milli: i32,
}

impl Default for LightConditioner {
    fn default() -> Self {
        Self::new()
    }
}

impl LightConditioner {
    /// Create a conditioner with a unity delta scaler.
    pub fn new() -> Self {
        Self {
            fast: RollingAverage::new(),
            slow: RollingAverage::new(),
            delta: RollingAverage::new(),
            scaler_milli: DELTA_SCALER_DEFAULT,
        }
    }

    /// Condition one control-tick sample pair.
    pub fn process(&mut self, raw: i32, scaled: i32) -> LightFrame {
        let fast_avg = self.fast.next(raw);
        let slow_avg = self.slow.next(scaled);

        let deviation = (raw - fast_avg).abs();
        let delta = ((i64::from(deviation) * i64::from(self.scaler_milli)) / 1000) as i32;

        let triggered = delta > LIGHT_TRIGGER_THRESHOLD;

        let delta_avg = self.delta.next(delta);
        self.scaler_milli = if delta_avg <= LIGHT_TRIGGER_THRESHOLD {
            // quiet light: boost sensitivity as the average falls to zero
            map_range(
                delta_avg,
                LIGHT_TRIGGER_THRESHOLD,
                0,
                DELTA_SCALER_DEFAULT,
                DELTA_SCALER_MAX,
            )
        } else {
            // busy light: back off toward the scaler floor
            map_range(
                delta_avg,
                LIGHT_TRIGGER_THRESHOLD * 2,
                LIGHT_TRIGGER_THRESHOLD * 5,
                DELTA_SCALER_DEFAULT,
                DELTA_SCALER_MIN,
            )
            .clamp(DELTA_SCALER_MIN, DELTA_SCALER_DEFAULT)
        };

        LightFrame {
            slow_avg,
            delta,
            triggered,
        }
    }

    /// Current delta scaler, in thousandths.
    pub fn scaler_milli(&self) -> i32 {
        self.scaler_milli
    }
}

/// Rolling triggers-per-second statistic driving the pulse master gain.
#[derive(Debug, Clone)]
pub struct TriggerRate {
    timer: u32,
    counter: i32,
    rolling: RollingAverage<TRIGGERS_ROLLING_SIZE>,
    gain: f32,
}

impl Default for TriggerRate {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerRate {
    /// Create the tracker at unity gain.
    pub fn new() -> Self {
        Self {
            timer: 0,
            counter: 0,
            rolling: RollingAverage::new(),
            gain: 1.0,
        }
    }

    /// Record one control tick. On each one-second boundary the counter is
    /// folded into the rolling rate and the gain re-derived: few triggers
    /// or a torrent of them both pull the gain down, a moderate rate peaks
    /// it.
    pub fn update(&mut self, triggered: bool) {
        if triggered {
            self.counter += 1;
        }
        self.timer += 1;
        if self.timer >= TRIGGERS_INTERVAL_TICKS {
            self.timer = 0;
            let avg = self.rolling.next(self.counter);
            self.counter = 0;
            self.gain = bell_curve(
                avg as f32,
                TRIGGERS_AVG_MIN as f32,
                TRIGGERS_AVG_MAX as f32,
                PULSE_MASTER_GAIN_MIN,
                PULSE_MASTER_GAIN_MAX,
            );
            #[cfg(feature = "tracing")]
            tracing::trace!(rate = avg, gain = self.gain, "trigger-rate snapshot");
        }
    }

    /// Current pulse master gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }
}

/// Min/max spread of the scaled light over the last minute, mapped onto the
/// pulse resonance.
#[derive(Debug, Clone)]
pub struct LightExcursion {
    cur_min: i32,
    cur_max: i32,
    minima: [i32; LIGHT_EXCURSION_INTERVAL_SECS],
    maxima: [i32; LIGHT_EXCURSION_INTERVAL_SECS],
    timer: usize,
    resonance: f32,
}

const EXCURSION_INTERVAL_TICKS: usize = LIGHT_EXCURSION_INTERVAL_SECS * CONTROL_RATE as usize;

impl Default for LightExcursion {
    fn default() -> Self {
        Self::new()
    }
}

impl LightExcursion {
    /// Create the tracker at the resonance floor.
    pub fn new() -> Self {
        Self {
            cur_min: i32::MAX,
            cur_max: 0,
            minima: [i32::MAX; LIGHT_EXCURSION_INTERVAL_SECS],
            maxima: [0; LIGHT_EXCURSION_INTERVAL_SECS],
            timer: 0,
            resonance: PULSE_RESONANCE_MIN,
        }
    }

    /// Record one control tick of the scaled signal. On each one-second
    /// boundary the per-second history is scanned for the widest spread and
    /// the resonance re-derived through the bell curve.
    pub fn update(&mut self, scaled: i32) {
        self.cur_min = self.cur_min.min(scaled);
        self.cur_max = self.cur_max.max(scaled);
        let second = self.timer / CONTROL_RATE as usize;
        self.minima[second] = self.cur_min;
        self.maxima[second] = self.cur_max;

        if self.timer % CONTROL_RATE as usize == 0 {
            let mut min = i32::MAX;
            let mut max = 0;
            for i in 0..LIGHT_EXCURSION_INTERVAL_SECS {
                min = min.min(self.minima[i]);
                max = max.max(self.maxima[i]);
            }
            // an unfilled history yields a non-positive spread; the bell
            // clamps it to the resonance floor
            let excursion = (max as i64 - min as i64) as f32;
            self.resonance = bell_curve(
                excursion,
                LIGHT_EXCURSION_MIN,
                LIGHT_EXCURSION_MAX,
                PULSE_RESONANCE_MIN,
                PULSE_RESONANCE_MAX,
            );
            self.cur_min = i32::MAX;
            self.cur_max = 0;
            #[cfg(feature = "tracing")]
            tracing::trace!(excursion, resonance = self.resonance, "excursion snapshot");
        }

        self.timer = (self.timer + 1) % EXCURSION_INTERVAL_TICKS;
    }

    /// Current pulse resonance.
    pub fn resonance(&self) -> f32 {
        self.resonance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_signal_never_triggers() {
        let mut cond = LightConditioner::new();
        // the zero-filled fast window reads the first samples as a step;
        // let it fill before asserting
        for _ in 0..LIGHT_FAST_ROLLING_SIZE {
            cond.process(2000, 500);
        }
        for _ in 0..5000 {
            let frame = cond.process(2000, 500);
            assert!(!frame.triggered);
            assert_eq!(frame.delta, 0);
        }
        // a dead-flat signal drives the scaler to its ceiling
        assert_eq!(cond.scaler_milli(), DELTA_SCALER_MAX);
    }

    #[test]
    fn step_change_triggers() {
        let mut cond = LightConditioner::new();
        for _ in 0..LIGHT_FAST_ROLLING_SIZE {
            cond.process(1000, 300);
        }
        let frame = cond.process(9000, 900);
        assert!(frame.triggered, "large step must fire a trigger");
        assert!(frame.delta > LIGHT_TRIGGER_THRESHOLD);
    }

    #[test]
    fn busy_signal_backs_the_scaler_off() {
        let mut cond = LightConditioner::new();
        // alternate hard so the deviation stays huge
        for i in 0..DELTA_ROLLING_SIZE {
            let raw = if i % 2 == 0 { 0 } else { 10_000 };
            cond.process(raw, 500);
        }
        assert_eq!(cond.scaler_milli(), DELTA_SCALER_MIN);
    }

    #[test]
    fn scaler_stays_within_bounds() {
        let mut cond = LightConditioner::new();
        // a rough mix of quiet stretches and violent swings
        for i in 0..10_000u32 {
            let raw = match i % 7 {
                0 => 0,
                1 => 12_000,
                _ => 2000 + (i % 97) as i32,
            };
            cond.process(raw, 500);
            let scaler = cond.scaler_milli();
            assert!((DELTA_SCALER_MIN..=DELTA_SCALER_MAX).contains(&scaler));
        }
    }

    #[test]
    fn slow_average_follows_scaled_input() {
        let mut cond = LightConditioner::new();
        let mut frame = cond.process(0, 0);
        for _ in 0..LIGHT_SLOW_ROLLING_SIZE {
            frame = cond.process(0, 800);
        }
        assert_eq!(frame.slow_avg, 800);
    }

    #[test]
    fn trigger_rate_peaks_at_moderate_activity() {
        // run three trackers at different densities for long enough to fill
        // the 30-snapshot window
        let densities = [1u32, 32, 64];
        let mut gains = [0.0f32; 3];
        for (g, &per_interval) in gains.iter_mut().zip(&densities) {
            let mut rate = TriggerRate::new();
            for _ in 0..40 {
                for tick in 0..TRIGGERS_INTERVAL_TICKS {
                    rate.update(tick < per_interval);
                }
            }
            *g = rate.gain();
        }
        assert!(gains[1] > gains[0], "moderate rate must out-gain sparse");
        assert!(gains[1] > gains[2], "moderate rate must out-gain dense");
        for g in gains {
            assert!((PULSE_MASTER_GAIN_MIN..=PULSE_MASTER_GAIN_MAX).contains(&g));
        }
    }

    #[test]
    fn excursion_at_rest_sits_on_resonance_floor() {
        let mut exc = LightExcursion::new();
        for _ in 0..10 * CONTROL_RATE as usize {
            exc.update(500);
        }
        assert!((exc.resonance() - PULSE_RESONANCE_MIN).abs() < 1e-3);
    }

    #[test]
    fn mid_range_excursion_raises_resonance() {
        let mut exc = LightExcursion::new();
        // oscillate with a spread of ~150, the bell midpoint
        for tick in 0..10 * CONTROL_RATE as usize {
            let scaled = if tick % 2 == 0 { 400 } else { 550 };
            exc.update(scaled);
        }
        assert!(
            exc.resonance() > PULSE_RESONANCE_MIN + 10.0,
            "mid spread should lift resonance well off the floor"
        );
    }
}
