//! Percussive transient generator: noise burst through a resonator.
//!
//! A [`PulseVoice`] plays one tick: a rectangular white-noise impulse fed
//! into a two-pole band-pass resonator tuned to a partial's frequency. The
//! voice reports itself alive via a life-estimate counter - a fixed
//! worst-case decay time in samples, not an envelope-complete detector. The
//! estimate may release a slot while the tail is still faintly ringing, or
//! hold a silent slot a little longer than needed; both are accepted.
//!
//! [`PulseSynth`] is the fixed pool of 12 voices per string. Allocation is
//! strictly no-steal: a trigger takes the first free slot or is silently
//! dropped. A missing pulse in a dense texture is inaudible, and the audio
//! path must never block or queue.

use crate::constants::{AUDIO_RATE, NUM_PULSE_VOICES, PULSE_DUR_ESTIMATE_MS};
use lumen_core::{Resonator, WhiteNoise};

/// One resonant noise-burst voice.
#[derive(Debug, Clone)]
pub struct PulseVoice {
    noise: WhiteNoise,
    filter: Resonator,
    /// Noise burst length in samples
    env_dur: u32,
    /// Samples elapsed since trigger (burst envelope position)
    env_counter: u32,
    /// Samples after which the slot is considered free
    life_estimate: u32,
    /// Monotone life counter, saturates at `life_estimate`
    on_counter: u32,
}

impl PulseVoice {
    /// Create an expired (free) voice.
    pub fn new(noise_seed: u32) -> Self {
        let life_estimate = (AUDIO_RATE as f32 * PULSE_DUR_ESTIMATE_MS * 0.001) as u32;
        Self {
            noise: WhiteNoise::new(noise_seed),
            filter: Resonator::new(AUDIO_RATE as f32),
            env_dur: 25,
            env_counter: 0,
            life_estimate,
            on_counter: life_estimate,
        }
    }

    /// Start a burst at the given center frequency, Q, peak gain and
    /// impulse duration (samples). Out-of-range parameters are clamped to
    /// safe floors; the filter coefficients are recomputed here and nowhere
    /// else on the audio path.
    pub fn trigger(&mut self, freq: f32, q: f32, gain: f32, impulse_dur: u32) {
        self.env_dur = impulse_dur.max(1);
        self.filter.set(freq, q, gain);
        self.env_counter = 0;
        self.on_counter = 0;
    }

    /// True while the voice occupies its slot.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.on_counter < self.life_estimate
    }

    /// Advance one audio sample.
    #[inline]
    pub fn process(&mut self) -> f32 {
        if self.on_counter < self.life_estimate {
            self.on_counter += 1;
        }

        let source = self.noise.next() * 1.5;

        // rectangular burst envelope
        self.env_counter += 1;
        let signal = if self.env_counter < self.env_dur {
            source
        } else {
            0.0
        };

        self.filter.process(signal)
    }
}

/// Fixed pool of pulse voices with no-steal allocation.
#[derive(Debug, Clone)]
pub struct PulseSynth {
    voices: [PulseVoice; NUM_PULSE_VOICES],
    active: [usize; NUM_PULSE_VOICES],
    num_active: usize,
}

impl Default for PulseSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseSynth {
    /// Create a pool of free voices.
    pub fn new() -> Self {
        Self {
            // distinct noise seeds so concurrent bursts decorrelate
            voices: core::array::from_fn(|i| PulseVoice::new(i as u32 * 7919 + 1)),
            active: [0; NUM_PULSE_VOICES],
            num_active: 0,
        }
    }

    /// Trigger the first free voice; silently dropped when all 12 are
    /// sounding.
    pub fn trigger(&mut self, freq: f32, q: f32, gain: f32, impulse_dur: u32) {
        if let Some(voice) = self.voices.iter_mut().find(|v| !v.is_on()) {
            voice.trigger(freq, q, gain, impulse_dur);
        }
        #[cfg(feature = "tracing")]
        if self.voices.iter().all(|v| v.is_on()) {
            tracing::trace!("pulse pool full, trigger dropped");
        }
    }

    /// Trigger an explicit slot; ignored for an invalid index or a slot
    /// that is still sounding.
    pub fn trigger_voice(&mut self, voice: usize, freq: f32, q: f32, gain: f32, impulse_dur: u32) {
        let Some(slot) = self.voices.get_mut(voice) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(voice, "pulse trigger on invalid slot ignored");
            return;
        };
        if slot.is_on() {
            return;
        }
        slot.trigger(freq, q, gain, impulse_dur);
    }

    /// Control-rate upkeep: rebuild the active index list.
    pub fn update(&mut self) {
        self.num_active = 0;
        for (i, voice) in self.voices.iter().enumerate() {
            if voice.is_on() {
                self.active[self.num_active] = i;
                self.num_active += 1;
            }
        }
    }

    /// Audio-rate mix of the voices active as of the last `update`.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let mut mix = 0.0;
        for &i in &self.active[..self.num_active] {
            mix += self.voices[i].process();
        }
        mix
    }

    /// True while at least one slot is free.
    pub fn available(&self) -> bool {
        self.num_active < NUM_PULSE_VOICES
    }

    /// Number of voices on the active list.
    pub fn active_count(&self) -> usize {
        self.num_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_self_expires_after_life_estimate() {
        let mut voice = PulseVoice::new(1);
        assert!(!voice.is_on());

        voice.trigger(440.0, 30.0, 1.0, 20);
        assert!(voice.is_on());

        let life = (AUDIO_RATE as f32 * PULSE_DUR_ESTIMATE_MS * 0.001) as u32;
        for _ in 0..life - 1 {
            voice.process();
            assert!(voice.is_on());
        }
        voice.process();
        assert!(!voice.is_on());
    }

    #[test]
    fn voice_rings_after_burst_ends() {
        let mut voice = PulseVoice::new(1);
        voice.trigger(1000.0, 40.0, 2.0, 15);
        // consume the burst
        for _ in 0..15 {
            voice.process();
        }
        // the resonator keeps ringing on zero input
        let mut tail = 0.0f32;
        for _ in 0..200 {
            tail = tail.max(voice.process().abs());
        }
        assert!(tail > 0.0, "tail should ring past the burst");
    }

    #[test]
    fn pool_capacity_is_hard() {
        let mut pool = PulseSynth::new();
        for _ in 0..NUM_PULSE_VOICES {
            pool.trigger(440.0, 30.0, 1.0, 20);
        }
        pool.update();
        assert_eq!(pool.active_count(), NUM_PULSE_VOICES);
        assert!(!pool.available());

        // 13th trigger must not disturb the sounding 12
        pool.trigger(880.0, 30.0, 1.0, 20);
        pool.update();
        assert_eq!(pool.active_count(), NUM_PULSE_VOICES);
    }

    #[test]
    fn explicit_slot_trigger_respects_sounding_voice() {
        let mut pool = PulseSynth::new();
        pool.trigger_voice(3, 440.0, 30.0, 1.0, 20);
        pool.update();
        assert_eq!(pool.active_count(), 1);

        // re-trigger of the same sounding slot is ignored
        pool.trigger_voice(3, 880.0, 30.0, 1.0, 20);
        pool.update();
        assert_eq!(pool.active_count(), 1);

        // invalid index is ignored
        pool.trigger_voice(99, 440.0, 30.0, 1.0, 20);
        pool.update();
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn expired_voices_leave_the_active_list() {
        let mut pool = PulseSynth::new();
        pool.trigger(440.0, 30.0, 1.0, 20);
        pool.update();
        assert_eq!(pool.active_count(), 1);

        let life = (AUDIO_RATE as f32 * PULSE_DUR_ESTIMATE_MS * 0.001) as u32;
        for _ in 0..=life {
            pool.process();
        }
        pool.update();
        assert_eq!(pool.active_count(), 0);
        assert!(pool.available());
    }

    #[test]
    fn silent_when_idle() {
        let mut pool = PulseSynth::new();
        pool.update();
        for _ in 0..100 {
            assert_eq!(pool.process(), 0.0);
        }
    }
}
