//! Top-level engine: light in, 16-bit audio out.
//!
//! The engine runs at two rates. [`SynthEngine::update`] is the control
//! tick (64 Hz): it conditions the light pair, refreshes the behavioral
//! statistics, updates all five chords and rebuilds the active-chord list.
//! [`SynthEngine::process`] is the audio tick (32768 Hz): it mixes the
//! chords active as of the last update and quantizes to a signed 16-bit
//! sample. The host is expected to interleave them at a fixed ratio of
//! [`SAMPLES_PER_CONTROL_TICK`] samples per tick.

use crate::chord::ChordVoice;
use crate::constants::{CHORD_LIGHT_BANDS, FREQ_CUTOFF, FREQ_MAX, GAIN_HF, GAIN_SLOPE, NUM_CHORDS};
#[cfg(feature = "std")]
use crate::constants::SAMPLES_PER_CONTROL_TICK;
use crate::light::{LightConditioner, LightExcursion, LightFrame, TriggerRate};
use crate::rng::SynthRng;
use lumen_core::FreqGainTable;

/// Output headroom scaler from the float mix into the i16 domain.
const OUTPUT_SCALER: f32 = 32000.0;

/// The complete light-reactive instrument.
#[derive(Debug, Clone)]
pub struct SynthEngine {
    rng: SynthRng,
    freq_gain: FreqGainTable,

    chords: [ChordVoice; NUM_CHORDS],
    active_chords: [usize; NUM_CHORDS],
    num_active: usize,

    light: LightConditioner,
    triggers: TriggerRate,
    excursion: LightExcursion,
}

impl SynthEngine {
    /// Build the instrument from a seed. The seed fixes every random draw
    /// (voicings, cutoff partials, detunes, pulse dither), so the same seed
    /// and light sequence reproduce the output exactly.
    pub fn new(seed: u64) -> Self {
        let mut rng = SynthRng::seed_from_u64(seed);
        let mut chords: [ChordVoice; NUM_CHORDS] =
            core::array::from_fn(|id| ChordVoice::new(id, &mut rng));
        for (chord, &(min, max)) in chords.iter_mut().zip(&CHORD_LIGHT_BANDS) {
            chord.set_light_range(min, max);
        }
        Self {
            rng,
            freq_gain: FreqGainTable::build(FREQ_CUTOFF, FREQ_MAX, GAIN_HF, GAIN_SLOPE),
            chords,
            active_chords: [0; NUM_CHORDS],
            num_active: 0,
            light: LightConditioner::new(),
            triggers: TriggerRate::new(),
            excursion: LightExcursion::new(),
        }
    }

    /// Control tick: feed one raw + perceptually scaled light sample pair.
    pub fn update(&mut self, light_raw: i32, light_scaled: i32) -> LightFrame {
        let frame = self.light.process(light_raw, light_scaled);

        self.triggers.update(frame.triggered);
        self.excursion.update(light_scaled);
        let pulse_gain = self.triggers.gain();
        let pulse_resonance = self.excursion.resonance();

        // every chord updates each tick so decay and smoothing keep moving
        // outside the selected band
        self.num_active = 0;
        for id in 0..NUM_CHORDS {
            self.chords[id].update(&mut self.rng, &self.freq_gain, frame.slow_avg, frame.delta);
            self.chords[id].set_pulse_master_gain(pulse_gain);
            self.chords[id].set_pulse_resonance_avg(pulse_resonance);
            if self.chords[id].active() {
                self.active_chords[self.num_active] = id;
                self.num_active += 1;
            }
        }

        frame
    }

    /// Audio tick: one signed 16-bit sample of the active chords.
    #[inline]
    pub fn process(&mut self) -> i16 {
        let mut mix = 0.0;
        for &id in &self.active_chords[..self.num_active] {
            mix += self.chords[id].process();
        }
        (mix * OUTPUT_SCALER) as i16
    }

    /// One full control block: an update followed by the block of audio
    /// samples it governs, appended to `out`.
    #[cfg(feature = "std")]
    pub fn render_block(&mut self, light_raw: i32, light_scaled: i32, out: &mut Vec<i16>) {
        self.update(light_raw, light_scaled);
        out.reserve(SAMPLES_PER_CONTROL_TICK as usize);
        for _ in 0..SAMPLES_PER_CONTROL_TICK {
            out.push(self.process());
        }
    }

    /// Number of chords sounding as of the last update.
    pub fn active_chord_count(&self) -> usize {
        self.num_active
    }

    /// The chord bank.
    pub fn chords(&self) -> &[ChordVoice; NUM_CHORDS] {
        &self.chords
    }

    /// Current pulse master gain (trigger-rate statistic).
    pub fn pulse_gain(&self) -> f32 {
        self.triggers.gain()
    }

    /// Current pulse resonance (excursion statistic).
    pub fn pulse_resonance(&self) -> f32 {
        self.excursion.resonance()
    }

    /// Current adaptive delta scaler, in thousandths.
    pub fn delta_scaler_milli(&self) -> i32 {
        self.light.scaler_milli()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_to_silence_on_steady_light() {
        let mut engine = SynthEngine::new(1);
        // the zero-filled fast window reads startup as a step, so the first
        // ticks chirp; steady light must then decay back to nothing
        for _ in 0..2000 {
            engine.update(2000, 500);
        }
        assert_eq!(engine.active_chord_count(), 0);
        for _ in 0..100 {
            assert_eq!(engine.process(), 0);
        }
    }

    #[test]
    fn light_gesture_wakes_the_band_chord() {
        let mut engine = SynthEngine::new(1);
        // settle the averages around a mid-band value
        for _ in 0..1100 {
            engine.update(2000, 500);
        }
        // a hard gesture: raw swings drive deltas past the threshold
        for tick in 0..64 {
            let raw = if tick % 2 == 0 { 200 } else { 12_000 };
            engine.update(raw, 500);
        }
        assert!(engine.active_chord_count() >= 1);
        // slow avg 500 selects chord 2's band [400, 650)
        assert!(engine.chords()[2].active());

        let mut peak = 0i16;
        for _ in 0..2048 {
            peak = peak.max(engine.process().saturating_abs());
        }
        assert!(peak > 0, "active chord must produce signal");
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = SynthEngine::new(99);
        let mut b = SynthEngine::new(99);
        for tick in 0..300 {
            let raw = if tick % 3 == 0 { 100 } else { 6000 };
            a.update(raw, 700);
            b.update(raw, 700);
            for _ in 0..8 {
                assert_eq!(a.process(), b.process());
            }
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SynthEngine::new(1);
        let mut b = SynthEngine::new(2);
        let mut differed = false;
        for tick in 0..300 {
            let raw = if tick % 3 == 0 { 100 } else { 6000 };
            a.update(raw, 700);
            b.update(raw, 700);
            for _ in 0..8 {
                if a.process() != b.process() {
                    differed = true;
                }
            }
        }
        assert!(differed, "seeds should pick different voicings/detunes");
    }

    #[test]
    fn survives_a_stress_run_with_audio() {
        let mut engine = SynthEngine::new(5);
        let mut peak = 0i16;
        for tick in 0..2000 {
            let raw = if tick % 2 == 0 { 0 } else { 16_000 };
            let scaled = (tick % 1050) as i32;
            engine.update(raw, scaled);
            for _ in 0..32 {
                peak = peak.max(engine.process().saturating_abs());
            }
        }
        assert!(peak > 0, "a violently changing light must make sound");
    }

    #[cfg(feature = "std")]
    #[test]
    fn render_block_emits_one_control_block() {
        let mut engine = SynthEngine::new(3);
        let mut out = Vec::new();
        engine.render_block(2000, 500, &mut out);
        assert_eq!(out.len(), SAMPLES_PER_CONTROL_TICK as usize);
    }
}
