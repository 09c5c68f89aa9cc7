//! Lumen Core - DSP primitives for a light-reactive drone synthesizer
//!
//! Foundational building blocks shared by the synthesis engine, designed for
//! real-time use on embedded targets: zero allocation, fixed-size state,
//! `libm`-backed math.
//!
//! # Components
//!
//! - [`SineOscillator`] - Audio-rate sine oscillator (phase accumulator)
//! - [`Smoother`] - Single-pole exponential smoother for zipper-free gains
//! - [`TriangleLfo`] - Stepped unipolar triangle LFO for slow detune drift
//! - [`Resonator`] - Two-pole resonant band-pass filter for percussive bursts
//! - [`WhiteNoise`] - LCG white-noise source
//! - [`RollingAverage`] - Fixed-window integer rolling average
//! - [`FreqGainTable`] - Tabulated high-frequency gain rolloff
//! - [`bell_curve`] / [`freq_rolloff`] - Control-signal mapping curves
//! - [`map_range`] - Integer range remapping
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in audio or control paths
//! - **no_std**: pure core + `libm`, `std` feature only for tests/hosts
//! - **Coefficients computed on change**, never per-sample

#![cfg_attr(not(feature = "std"), no_std)]

pub mod curve;
pub mod lfo;
pub mod math;
pub mod noise;
pub mod osc;
pub mod resonator;
pub mod rolling;
pub mod smooth;

pub use curve::{FreqGainTable, bell_curve, freq_rolloff};
pub use lfo::TriangleLfo;
pub use math::map_range;
pub use noise::WhiteNoise;
pub use osc::SineOscillator;
pub use resonator::Resonator;
pub use rolling::RollingAverage;
pub use smooth::Smoother;
