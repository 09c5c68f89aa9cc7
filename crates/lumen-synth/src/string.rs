//! A drone string: partial bank + accumulators + pulse pool.
//!
//! The string is the unit that actually turns light statistics into sound.
//! Per partial it carries a slowly decaying drone level and three pulse
//! accumulators (large/medium/small thresholds). Light events land in
//! [`StringVoice::update_levels`]; [`StringVoice::update`] runs every
//! control tick and derives gains, mute state, decay, pulse triggers and
//! detune drift from the accumulated state.

use crate::constants::{
    DRONE_DECREASE_STEPS, DRONE_DECREASE_TICKS, DRONE_RANGES, DRONE_START_THRESHOLD, GAIN_MAX,
    GAIN_MIN, GAIN_SMOOTHNESS, LFO_RATES, LFO_SAMPLE_RATE, LFO_UPDATE_INTERVAL,
    LIGHT_TRIGGER_THRESHOLD, NUM_PARTIALS, NUM_STRINGS, PULSE_GAIN_LARGE, PULSE_GAIN_MEDIUM,
    PULSE_GAIN_SMALL, PULSE_IMPULSE_DUR_MIN, PULSE_IMPULSE_DUR_RANGE, PULSE_LARGE_THRESHOLDS,
    PULSE_MEDIUM_THRESHOLDS, PULSE_RESONANCE_MIN, PULSE_RESONANCE_RAND_RANGE,
    PULSE_SMALL_THRESHOLDS,
};
use crate::partials::PartialBank;
use crate::pulse::PulseSynth;
use crate::rng::SynthRng;
use lumen_core::{FreqGainTable, Smoother, TriangleLfo, map_range};

/// One polyphonic string voice.
#[derive(Debug, Clone)]
pub struct StringVoice {
    id: u32,
    active: bool,
    triggered: bool,
    fund_freq: f32,

    /// Harmonic index of the first partial, drawn in [1, MAX_TUNING_OFFSET]
    /// on every retune.
    cutoff_partial: u32,

    partials: PartialBank,
    smoothers: [Smoother; NUM_PARTIALS],
    gains: [u8; NUM_PARTIALS],
    smooth_gains: [u8; NUM_PARTIALS],

    pulse_synth: PulseSynth,
    pulse_master_gain: f32,
    pulse_resonance_avg: f32,

    pulse_large_levels: [i32; NUM_PARTIALS],
    pulse_medium_levels: [i32; NUM_PARTIALS],
    pulse_small_levels: [i32; NUM_PARTIALS],
    pulse_large_threshold: i32,
    pulse_medium_threshold: i32,
    pulse_small_threshold: i32,

    drone_levels: [i32; NUM_PARTIALS],
    drone_range: i32,
    drone_decrease_master: i32,
    decrease_timer: u32,

    /// Per-partial light sub-bands, half-open `[min, max)`
    light_range_min: [i32; NUM_PARTIALS],
    light_range_max: [i32; NUM_PARTIALS],

    lfo: TriangleLfo,
    lfo_timer: u32,
}

impl StringVoice {
    /// Create a silent string for chord slot `slot` (0..3). The slot picks
    /// the fixed per-string thresholds, drone range, decay step and LFO
    /// rate.
    pub fn new(id: u32, slot: usize) -> Self {
        debug_assert!(slot < NUM_STRINGS);
        let mut lfo = TriangleLfo::new(LFO_SAMPLE_RATE as f32);
        lfo.set_rate(LFO_RATES[slot]);
        Self {
            id,
            active: false,
            triggered: false,
            fund_freq: 333.0,
            cutoff_partial: 1,
            partials: PartialBank::new(),
            smoothers: core::array::from_fn(|_| Smoother::new(GAIN_SMOOTHNESS)),
            gains: [0; NUM_PARTIALS],
            smooth_gains: [0; NUM_PARTIALS],
            pulse_synth: PulseSynth::new(),
            pulse_master_gain: 1.0,
            // floor of the resonance mapping, so a pulse fired before the
            // first excursion snapshot never sees a degenerate Q
            pulse_resonance_avg: PULSE_RESONANCE_MIN,
            pulse_large_levels: [0; NUM_PARTIALS],
            pulse_medium_levels: [0; NUM_PARTIALS],
            pulse_small_levels: [0; NUM_PARTIALS],
            pulse_large_threshold: PULSE_LARGE_THRESHOLDS[slot],
            pulse_medium_threshold: PULSE_MEDIUM_THRESHOLDS[slot],
            pulse_small_threshold: PULSE_SMALL_THRESHOLDS[slot],
            drone_levels: [0; NUM_PARTIALS],
            drone_range: DRONE_RANGES[slot],
            drone_decrease_master: DRONE_DECREASE_STEPS[slot],
            decrease_timer: 0,
            light_range_min: [0; NUM_PARTIALS],
            light_range_max: [0; NUM_PARTIALS],
            lfo,
            lfo_timer: 0,
        }
    }

    /// Audio-rate output: additive drone mix plus the pulse layer.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.partials.process(&self.smooth_gains) + self.pulse_synth.process()
    }

    /// Control-rate update: gain derivation, smoothing, mute state, drone
    /// decay, pulse-trigger scan and detune drift.
    pub fn update(&mut self, rng: &mut SynthRng, freq_gain: &FreqGainTable) {
        self.triggered = false;

        // raw gains from drone levels: linear map into the 8-bit domain,
        // cubed for a convex loudness curve, then frequency-weighted
        for i in 0..NUM_PARTIALS {
            if self.drone_levels[i] < DRONE_START_THRESHOLD {
                self.gains[i] = 0;
            } else {
                let linear = map_range(
                    self.drone_levels[i],
                    DRONE_START_THRESHOLD,
                    self.drone_range,
                    0,
                    GAIN_MAX,
                );
                let cubed = ((i64::from(linear) * i64::from(linear) * i64::from(linear)) >> 16) as u8;
                self.gains[i] = freq_gain.scale(self.partials.frequency(i), cubed);
            }
        }

        // smooth and sum; the truncation to u8 lets a fully decayed string
        // reach an exact zero and mute
        let mut gain_sum: u32 = 0;
        for i in 0..NUM_PARTIALS {
            self.smooth_gains[i] = self.smoothers[i].next(f32::from(self.gains[i])) as u8;
            gain_sum += u32::from(self.smooth_gains[i]);
        }

        if gain_sum <= GAIN_MIN {
            self.mute();
        } else {
            self.unmute(rng);
        }

        if !self.active {
            return;
        }

        // drone decay, rate-limited to a fixed wall-clock interval
        self.decrease_timer += 1;
        if self.decrease_timer >= DRONE_DECREASE_TICKS {
            for i in 0..NUM_PARTIALS {
                self.drone_levels[i] =
                    (self.drone_levels[i] - self.partials.decrease_step(i)).max(0);
            }
            self.decrease_timer = 0;
        }

        // pulse-trigger scan, large pre-empts medium pre-empts small
        for i in 0..NUM_PARTIALS {
            if self.pulse_large_levels[i] >= self.pulse_large_threshold {
                self.pulse_large_levels[i] = 0;
                self.trigger_pulse(rng, self.partials.frequency(i), PULSE_GAIN_LARGE);
            } else if self.pulse_medium_levels[i] >= self.pulse_medium_threshold {
                self.pulse_medium_levels[i] = 0;
                self.trigger_pulse(rng, self.partials.frequency(i), PULSE_GAIN_MEDIUM);
            } else if self.pulse_small_levels[i] >= self.pulse_small_threshold {
                self.pulse_small_levels[i] = 0;
                self.trigger_pulse(rng, self.partials.frequency(i), PULSE_GAIN_SMALL);
            }
        }

        self.pulse_synth.update();

        // detune drift stepped on a fixed sub-interval of control ticks
        self.lfo_timer += 1;
        if self.lfo_timer >= LFO_UPDATE_INTERVAL {
            let lfo = self.lfo.next();
            self.partials.apply_lfo(lfo);
            self.lfo_timer = 0;
        }
    }

    /// Accumulate a light event into the partial whose sub-band contains
    /// `light_input`. Called every control tick for strings of the chord(s)
    /// selected by the slow light average.
    pub fn update_levels(&mut self, light_input: i32, light_delta: i32) {
        if light_delta < LIGHT_TRIGGER_THRESHOLD {
            return;
        }
        for i in 0..NUM_PARTIALS {
            if light_input >= self.light_range_min[i] && light_input < self.light_range_max[i] {
                // drone level clamps at its range; pulse accumulators are
                // unclamped and reset when their tier fires
                self.drone_levels[i] = (self.drone_levels[i] + light_delta).min(self.drone_range);
                self.pulse_large_levels[i] += light_delta;
                self.pulse_medium_levels[i] += light_delta;
                self.pulse_small_levels[i] += light_delta;
            }
        }
    }

    /// Partition the owning chord's light band into equal per-partial
    /// sub-bands.
    pub fn set_light_range(&mut self, min: i32, max: i32) {
        let sub = (max - min) / NUM_PARTIALS as i32;
        for i in 0..NUM_PARTIALS {
            self.light_range_min[i] = min + i as i32 * sub;
            self.light_range_max[i] = min + (i as i32 + 1) * sub;
        }
    }

    /// Retune against a new fundamental: draws a fresh cutoff partial and
    /// rebuilds the bank (frequencies, detunes, decay steps).
    pub fn retune(&mut self, rng: &mut SynthRng, fundamental: f32) {
        self.cutoff_partial = rng.below(crate::constants::MAX_TUNING_OFFSET) + 1;
        self.fund_freq = fundamental;
        self.partials.retune(
            rng,
            fundamental,
            self.cutoff_partial,
            self.drone_decrease_master,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(
            string = self.id,
            fundamental,
            cutoff = self.cutoff_partial,
            "string retune"
        );
    }

    /// Edge-triggered mute: only an active->inactive transition has effect.
    pub fn mute(&mut self) {
        if self.active {
            self.active = false;
            #[cfg(feature = "tracing")]
            tracing::debug!(string = self.id, "muting string");
        }
    }

    /// Edge-triggered unmute; rising from silence retunes the string.
    pub fn unmute(&mut self, rng: &mut SynthRng) {
        if !self.active {
            self.retune(rng, self.fund_freq);
            self.active = true;
            self.triggered = true;
            #[cfg(feature = "tracing")]
            tracing::debug!(string = self.id, "unmuting string");
        }
    }

    /// True while the string is sounding.
    pub fn active(&self) -> bool {
        self.active
    }

    /// True for the single control tick on which the string unmuted.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// String identifier (chord/slot encoded by the owner).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Current cutoff partial.
    pub fn cutoff_partial(&self) -> u32 {
        self.cutoff_partial
    }

    /// The partial bank (frequencies, detunes, decay steps).
    pub fn partials(&self) -> &PartialBank {
        &self.partials
    }

    /// The pulse voice pool.
    pub fn pulse_synth(&self) -> &PulseSynth {
        &self.pulse_synth
    }

    /// Current drone level of partial `i`.
    pub fn drone_level(&self, i: usize) -> i32 {
        self.drone_levels[i]
    }

    /// Set the global pulse gain (driven by the trigger-rate statistic).
    pub fn set_pulse_master_gain(&mut self, gain: f32) {
        self.pulse_master_gain = gain;
    }

    /// Set the average pulse resonance (driven by the excursion statistic).
    pub fn set_pulse_resonance_avg(&mut self, q: f32) {
        self.pulse_resonance_avg = q;
    }

    fn trigger_pulse(&mut self, rng: &mut SynthRng, freq: f32, base_gain: f32) {
        // dither the resonance and burst length so repeated pulses on the
        // same partial do not sound machine-stamped
        let q = self.pulse_resonance_avg + rng.bipolar() * PULSE_RESONANCE_RAND_RANGE;
        let dur = PULSE_IMPULSE_DUR_MIN + rng.below(PULSE_IMPULSE_DUR_RANGE);
        let gain = base_gain * self.pulse_master_gain;
        self.pulse_synth.trigger(freq, q, gain, dur);
        #[cfg(feature = "tracing")]
        tracing::trace!(string = self.id, freq, q, gain, "pulse trigger");
    }
}
