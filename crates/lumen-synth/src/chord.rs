//! A chord: three strings bound to one light band.
//!
//! The chord routes light events to its strings while the slow light
//! average sits inside its band, tracks which strings are sounding, and
//! picks a fresh voicing every time it rises from complete silence.

use crate::constants::{
    CHORD_DEGREES, CHORD_VOICINGS, NUM_CHORD_VOICINGS, NUM_STRINGS,
};
use crate::rng::SynthRng;
use crate::string::StringVoice;
use lumen_core::FreqGainTable;

/// Equal-weight scaling of the three string outputs.
const STRING_MIX_SCALER: f32 = 0.33;

/// One chord voice: 3 strings on 3 of 5 just-intonation degrees.
#[derive(Debug, Clone)]
pub struct ChordVoice {
    id: usize,
    active: bool,
    triggered: bool,

    light_range_min: i32,
    light_range_max: i32,

    strings: [StringVoice; NUM_STRINGS],
    active_strings: [usize; NUM_STRINGS],
    num_active: usize,
}

impl ChordVoice {
    /// Create chord `id` (0..4) with an initial random voicing.
    pub fn new(id: usize, rng: &mut SynthRng) -> Self {
        let mut chord = Self {
            id,
            active: false,
            triggered: false,
            light_range_min: 0,
            light_range_max: 0,
            strings: core::array::from_fn(|s| {
                StringVoice::new(((id as u32) + 1) * 100 + s as u32 + 1, s)
            }),
            active_strings: [0; NUM_STRINGS],
            num_active: 0,
        };
        chord.retune(rng);
        chord
    }

    /// Audio-rate mix of the currently active strings.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let mut mix = 0.0;
        for &s in &self.active_strings[..self.num_active] {
            mix += self.strings[s].process();
        }
        mix * STRING_MIX_SCALER
    }

    /// Control-rate update.
    ///
    /// Light events are routed into the strings only while the slow light
    /// average sits inside this chord's band; the per-tick string update
    /// (decay, smoothing, pulse scan) always runs so inactive chords keep
    /// decaying and sounding ones keep moving.
    pub fn update(
        &mut self,
        rng: &mut SynthRng,
        freq_gain: &FreqGainTable,
        light_avg: i32,
        light_delta: i32,
    ) {
        self.triggered = false;

        if light_avg >= self.light_range_min && light_avg < self.light_range_max {
            for string in &mut self.strings {
                string.update_levels(light_avg, light_delta);
            }
        }

        self.num_active = 0;
        for s in 0..NUM_STRINGS {
            self.strings[s].update(rng, freq_gain);
            if self.strings[s].active() {
                self.active_strings[self.num_active] = s;
                self.num_active += 1;
            }
        }

        if self.num_active > 0 {
            self.unmute(rng);
        } else {
            self.mute();
        }
    }

    /// Pick one of the predefined voicings at random and retune all three
    /// strings onto its degrees.
    pub fn retune(&mut self, rng: &mut SynthRng) {
        let voicing = rng.below(NUM_CHORD_VOICINGS as u32) as usize;
        for (s, string) in self.strings.iter_mut().enumerate() {
            let degree = CHORD_VOICINGS[voicing][s];
            string.retune(rng, CHORD_DEGREES[self.id][degree]);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(chord = self.id, voicing, "chord retune");
    }

    /// Bind the chord to a light band and partition it across the strings'
    /// partials.
    pub fn set_light_range(&mut self, min: i32, max: i32) {
        self.light_range_min = min;
        self.light_range_max = max;
        for string in &mut self.strings {
            string.set_light_range(min, max);
        }
    }

    /// Forward the trigger-rate pulse gain to the sounding strings.
    pub fn set_pulse_master_gain(&mut self, gain: f32) {
        for &s in &self.active_strings[..self.num_active] {
            self.strings[s].set_pulse_master_gain(gain);
        }
    }

    /// Forward the excursion-derived pulse resonance to the sounding
    /// strings.
    pub fn set_pulse_resonance_avg(&mut self, q: f32) {
        for &s in &self.active_strings[..self.num_active] {
            self.strings[s].set_pulse_resonance_avg(q);
        }
    }

    fn mute(&mut self) {
        if self.active {
            self.active = false;
            #[cfg(feature = "tracing")]
            tracing::debug!(chord = self.id, "muting chord");
        }
    }

    // rising from complete silence re-voices the chord
    fn unmute(&mut self, rng: &mut SynthRng) {
        if !self.active {
            self.retune(rng);
            self.active = true;
            self.triggered = true;
            #[cfg(feature = "tracing")]
            tracing::debug!(chord = self.id, "unmuting chord");
        }
    }

    /// True while at least one string is sounding.
    pub fn active(&self) -> bool {
        self.active
    }

    /// True for the single control tick on which the chord unmuted.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Chord index (0..4).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of sounding strings as of the last update.
    pub fn active_string_count(&self) -> usize {
        self.num_active
    }

    /// The chord's strings.
    pub fn strings(&self) -> &[StringVoice; NUM_STRINGS] {
        &self.strings
    }
}
