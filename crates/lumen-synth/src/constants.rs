//! Fixed tuning and behavior constants for the installation.
//!
//! The instrument is a fixed topology: 5 chords x 3 strings x 12 partials,
//! plus a 12-voice pulse pool per string. Everything here is baked in at
//! compile time; nothing is runtime-configurable beyond the engine seed.

/// Audio sample rate in Hz.
pub const AUDIO_RATE: u32 = 32768;

/// Control (parameter update) rate in Hz.
pub const CONTROL_RATE: u32 = 64;

/// Audio samples produced per control tick.
pub const SAMPLES_PER_CONTROL_TICK: u32 = AUDIO_RATE / CONTROL_RATE;

/// First control tick strictly later than `ms` milliseconds.
///
/// Wall-clock intervals from the behavioral tuning (drone decay rate,
/// trigger-rate snapshots) are converted once to control-tick counts so the
/// engine never consults a host clock.
pub const fn ms_to_control_ticks(ms: u32) -> u32 {
    (ms * CONTROL_RATE) / 1000 + 1
}

// ---------------------------------------------------------------------------
// Harmony

/// Number of chords (one per light band).
pub const NUM_CHORDS: usize = 5;

/// Strings per chord.
pub const NUM_STRINGS: usize = 3;

/// Additive partials per string.
pub const NUM_PARTIALS: usize = 12;

/// Upper bound (inclusive) for the random cutoff-partial draw; the drawn
/// value in [1, MAX_TUNING_OFFSET] selects which harmonic the first partial
/// of a string represents.
pub const MAX_TUNING_OFFSET: u32 = 3;

// Chord fundamentals walk the circle of fifths from 110 Hz, folded back
// into range every other step.
const FUND1: f32 = 110.0;
const FUND2: f32 = FUND1 / 2.0 * 3.0;
const FUND3: f32 = (FUND2 / 2.0 * 3.0) / 2.0;
const FUND4: f32 = FUND3 / 2.0 * 3.0;
const FUND5: f32 = (FUND4 / 2.0 * 3.0) / 2.0;

/// Five candidate scale degrees per chord: unison, just major third (5:4),
/// fifth (3:2), just major sixth (5:3), octave.
pub const CHORD_DEGREES: [[f32; 5]; NUM_CHORDS] = [
    [
        FUND1,
        FUND1 / 4.0 * 5.0,
        FUND1 / 2.0 * 3.0,
        FUND1 / 3.0 * 5.0,
        FUND1 * 2.0,
    ],
    [
        FUND2,
        FUND2 / 4.0 * 5.0,
        FUND2 / 2.0 * 3.0,
        FUND2 / 3.0 * 5.0,
        FUND2 * 2.0,
    ],
    [
        FUND3,
        FUND3 / 4.0 * 5.0,
        FUND3 / 2.0 * 3.0,
        FUND3 / 3.0 * 5.0,
        FUND3 * 2.0,
    ],
    [
        FUND4,
        FUND4 / 4.0 * 5.0,
        FUND4 / 2.0 * 3.0,
        FUND4 / 3.0 * 5.0,
        FUND4 * 2.0,
    ],
    [
        FUND5,
        FUND5 / 4.0 * 5.0,
        FUND5 / 2.0 * 3.0,
        FUND5 / 3.0 * 5.0,
        FUND5 * 2.0,
    ],
];

/// Number of predefined voicings.
pub const NUM_CHORD_VOICINGS: usize = 5;

/// On every chord retune one of these is picked uniformly at random;
/// each row maps the chord's 3 string slots onto 3 of the 5 degrees.
pub const CHORD_VOICINGS: [[usize; NUM_STRINGS]; NUM_CHORD_VOICINGS] = [
    [0, 1, 2],
    [0, 1, 3],
    [0, 2, 3],
    [0, 2, 4],
    [1, 3, 4],
];

/// Light bands per chord, half-open `[min, max)` on the scaled light range.
/// Neighboring bands overlap by 50 so chord handover is gradual.
pub const CHORD_LIGHT_BANDS: [(i32, i32); NUM_CHORDS] =
    [(0, 250), (200, 450), (400, 650), (600, 850), (800, 1050)];

// ---------------------------------------------------------------------------
// Drones

/// Common multiplier on all accumulator-domain constants.
pub const T_MUL: i32 = 15;

/// Master gain on the summed drone layer.
pub const DRONE_MASTER_GAIN: f32 = 2.5;

/// Gain rolloff vs frequency: partials above this cutoff are attenuated.
pub const FREQ_CUTOFF: f32 = 300.0;
/// Frequency at which the gain rolloff reaches its floor.
pub const FREQ_MAX: f32 = 6000.0;
/// Gain rolloff floor.
pub const GAIN_HF: f32 = 0.001;
/// Gain rolloff slope (<1 sags early, >1 holds on). Range 0.25-3.0.
pub const GAIN_SLOPE: f32 = 0.8;

/// Random detune span as a fraction of each partial's base frequency.
pub const DETUNE_FACTOR: f32 = 0.01;

/// Detune LFO rate per string slot, Hz.
pub const LFO_RATES: [f32; NUM_STRINGS] = [0.10, 0.045, 0.06];
/// The detune LFO is stepped at this rate (Hz).
pub const LFO_SAMPLE_RATE: u32 = 6;
/// Control ticks between LFO steps.
pub const LFO_UPDATE_INTERVAL: u32 = CONTROL_RATE / LFO_SAMPLE_RATE;

/// Single-pole smoothing constant for partial gains.
pub const GAIN_SMOOTHNESS: f32 = 0.975;

/// Drone level below which a partial contributes no gain.
pub const DRONE_START_THRESHOLD: i32 = 10 * T_MUL;
/// Drone level ceiling per string slot.
pub const DRONE_RANGES: [i32; NUM_STRINGS] = [1100 * T_MUL, 1100 * T_MUL, 1100 * T_MUL];

/// Master drone decay step per string slot.
pub const DRONE_DECREASE_STEPS: [i32; NUM_STRINGS] = [5 * T_MUL, 6 * T_MUL, 7 * T_MUL];
/// Wall-clock interval between decay steps, ms.
pub const DRONE_DECREASE_INTERVAL_MS: u32 = 20;
/// Same interval in control ticks.
pub const DRONE_DECREASE_TICKS: u32 = ms_to_control_ticks(DRONE_DECREASE_INTERVAL_MS);

/// Decay-step rolloff vs frequency: partials above this cutoff decay faster.
pub const DECR_CUTOFF: f32 = 800.0;
/// Frequency at which the decay-step rolloff reaches its floor.
pub const DECR_FREQ_MAX: f32 = 6000.0;
/// Decay-step rolloff floor (1 = no effect, <1 shortens higher partials).
pub const DECR_HF: f32 = 0.1;
/// Decay-step rolloff slope.
pub const DECR_SLOPE: f32 = 0.8;

/// Partial gain ceiling (8-bit domain).
pub const GAIN_MAX: i32 = 255;
/// Partial gain floor; a string whose smoothed gain sum sits here is muted.
pub const GAIN_MIN: u32 = 0;

// ---------------------------------------------------------------------------
// Pulses

/// Pulse voices per string pool.
pub const NUM_PULSE_VOICES: usize = 12;

/// Minimum noise-burst length in audio samples.
pub const PULSE_IMPULSE_DUR_MIN: u32 = 10;
/// Random extra burst length, exclusive upper bound.
pub const PULSE_IMPULSE_DUR_RANGE: u32 = 20;

/// Worst-case audible decay per pulse, ms; drives the voice-slot life
/// estimate (an approximation, not an envelope-complete detector).
pub const PULSE_DUR_ESTIMATE_MS: f32 = 50.0;

/// Base gain of a large / medium / small pulse tier.
pub const PULSE_GAIN_LARGE: f32 = 14.0;
/// Medium tier base gain.
pub const PULSE_GAIN_MEDIUM: f32 = 6.0;
/// Small tier base gain.
pub const PULSE_GAIN_SMALL: f32 = 2.0;

/// Large-pulse accumulator thresholds per string slot.
pub const PULSE_LARGE_THRESHOLDS: [i32; NUM_STRINGS] =
    [2000 * T_MUL, 3000 * T_MUL, 4000 * T_MUL];
/// Medium-pulse accumulator thresholds per string slot.
pub const PULSE_MEDIUM_THRESHOLDS: [i32; NUM_STRINGS] =
    [1000 * T_MUL, 1500 * T_MUL, 2000 * T_MUL];
/// Small-pulse accumulator thresholds per string slot.
pub const PULSE_SMALL_THRESHOLDS: [i32; NUM_STRINGS] = [500 * T_MUL, 800 * T_MUL, 1000 * T_MUL];

/// Wall-clock interval between trigger-rate snapshots, ms.
pub const TRIGGERS_INTERVAL_MS: u32 = 1000;
/// Same interval in control ticks.
pub const TRIGGERS_INTERVAL_TICKS: u32 = ms_to_control_ticks(TRIGGERS_INTERVAL_MS);
/// Trigger-rate rolling window, in snapshots.
pub const TRIGGERS_ROLLING_SIZE: usize = 30;

/// Low end of the activity range for the pulse-gain bell (triggers/interval).
pub const TRIGGERS_AVG_MIN: i32 = 1;
/// High end of the activity range (one trigger per control tick).
pub const TRIGGERS_AVG_MAX: i32 = CONTROL_RATE as i32;

/// Pulse master gain at the activity extremes.
pub const PULSE_MASTER_GAIN_MIN: f32 = 0.2;
/// Pulse master gain at the activity midpoint.
pub const PULSE_MASTER_GAIN_MAX: f32 = 1.3;

/// Light excursion window, seconds.
pub const LIGHT_EXCURSION_INTERVAL_SECS: usize = 60;
/// Excursion mapping domain, on the scaled light range.
pub const LIGHT_EXCURSION_MIN: f32 = 0.0;
/// Excursion mapping domain upper edge.
pub const LIGHT_EXCURSION_MAX: f32 = 300.0;
/// Pulse resonance at the excursion extremes.
pub const PULSE_RESONANCE_MIN: f32 = 20.0;
/// Pulse resonance at the excursion midpoint.
pub const PULSE_RESONANCE_MAX: f32 = 50.0;
/// Random dither applied per pulse trigger, +-.
pub const PULSE_RESONANCE_RAND_RANGE: f32 = 5.0;

// ---------------------------------------------------------------------------
// Light signal conditioning

/// Slow rolling window on the scaled light sample (chord selection), ~15 s.
pub const LIGHT_SLOW_ROLLING_SIZE: usize = 1000;
/// Fast rolling window on the raw light sample (delta detection), ~0.5 s.
pub const LIGHT_FAST_ROLLING_SIZE: usize = 32;
/// Rolling window on the scaled delta (adaptive scaler), ~32 s.
pub const DELTA_ROLLING_SIZE: usize = 2048;

/// Delta scaler bounds and default, in thousandths.
pub const DELTA_SCALER_MIN: i32 = 500;
/// Delta scaler default, in thousandths.
pub const DELTA_SCALER_DEFAULT: i32 = 1000;
/// Delta scaler maximum, in thousandths.
pub const DELTA_SCALER_MAX: i32 = 20000;

/// Scaled light delta above which a trigger fires.
pub const LIGHT_TRIGGER_THRESHOLD: i32 = 80;

/// Upper edge of the perceptually scaled light range.
pub const LIGHT_RANGE: f32 = 1050.0;
