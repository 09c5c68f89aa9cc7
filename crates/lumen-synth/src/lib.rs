//! Lumen Synth - light-reactive generative drone and percussion engine
//!
//! The instrument listens to an ambient-light signal and plays a layered
//! texture in response: slowly breathing additive drones plus resonant
//! percussive pulses, both fed by how the light moves rather than by any
//! score.
//!
//! # Topology
//!
//! Fixed at compile time: 5 [`ChordVoice`]s, one per band of the scaled
//! light range, each holding 3 [`StringVoice`]s tuned to a just-intonation
//! voicing, each string an additive bank of 12 partials plus a 12-voice
//! [`PulseSynth`] pool.
//!
//! # Rates
//!
//! Two clocks, both driven by the host: [`SynthEngine::update`] at 64 Hz
//! consumes one light sample pair and moves all behavioral state;
//! [`SynthEngine::process`] at 32768 Hz emits one signed 16-bit sample.
//! The host interleaves them at [`constants::SAMPLES_PER_CONTROL_TICK`]
//! samples per tick.
//!
//! # Determinism
//!
//! Every random draw flows through one seedable stream ([`SynthRng`]); the
//! same seed and light sequence reproduce the output sample-for-sample.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod chord;
pub mod constants;
pub mod engine;
pub mod light;
pub mod partials;
pub mod pulse;
pub mod rng;
pub mod string;

pub use chord::ChordVoice;
pub use engine::SynthEngine;
pub use light::{LightConditioner, LightExcursion, LightFrame, TriggerRate};
pub use partials::PartialBank;
pub use pulse::{PulseSynth, PulseVoice};
pub use rng::SynthRng;
pub use string::StringVoice;
