//! CSV trace of the conditioned light signal and engine state.
//!
//! Useful for tuning the simulator and eyeballing the behavioral
//! statistics without listening through a whole session.

use clap::Args;
use lumen_synth::SynthEngine;
use lumen_synth::constants::CONTROL_RATE;

use crate::sensor::{LightSimulator, scale_lux};

#[derive(Args)]
pub struct TraceArgs {
    /// Duration in seconds
    #[arg(long, default_value = "60.0")]
    duration: f32,

    /// Engine seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Light gestures per minute in the simulated session
    #[arg(long, default_value = "40.0")]
    gestures: f32,

    /// Emit every Nth control tick (64 = once per second)
    #[arg(long, default_value = "64")]
    every: u64,
}

pub fn run(args: TraceArgs) -> anyhow::Result<()> {
    let ticks = (args.duration * CONTROL_RATE as f32).ceil() as u64;
    let every = args.every.max(1);

    let mut engine = SynthEngine::new(args.seed);
    let mut simulator = LightSimulator::new(args.seed.wrapping_add(1), args.gestures, CONTROL_RATE);

    println!("tick,raw,scaled,slow_avg,delta,triggered,active_chords,pulse_gain,pulse_resonance");
    for tick in 0..ticks {
        let raw = simulator.next();
        let scaled = scale_lux(raw);
        let frame = engine.update(raw, scaled);
        if tick % every == 0 {
            println!(
                "{tick},{raw},{scaled},{},{},{},{},{:.3},{:.1}",
                frame.slow_avg,
                frame.delta,
                u8::from(frame.triggered),
                engine.active_chord_count(),
                engine.pulse_gain(),
                engine.pulse_resonance()
            );
        }
    }
    Ok(())
}
