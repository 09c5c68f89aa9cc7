//! Offline render of a simulated light session to WAV.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use hound::{SampleFormat, WavSpec, WavWriter};
use indicatif::{ProgressBar, ProgressStyle};
use lumen_synth::SynthEngine;
use lumen_synth::constants::{AUDIO_RATE, CONTROL_RATE, SAMPLES_PER_CONTROL_TICK};
use thiserror::Error;

use crate::sensor::{LightSimulator, scale_lux};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Duration in seconds
    #[arg(long, default_value = "60.0")]
    duration: f32,

    /// Engine seed; fixes voicings, detunes and pulse dither
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Light gestures per minute in the simulated session
    #[arg(long, default_value = "40.0")]
    gestures: f32,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// Errors specific to the render pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("WAV write failed: {0}")]
    Wav(#[from] hound::Error),
    #[error("duration must be positive, got {0}")]
    BadDuration(f32),
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    render(&args).with_context(|| format!("rendering {}", args.output.display()))?;

    println!(
        "Wrote {} ({:.1} s at {} Hz, seed {})",
        args.output.display(),
        args.duration,
        AUDIO_RATE,
        args.seed
    );
    Ok(())
}

fn render(args: &RenderArgs) -> Result<(), RenderError> {
    if args.duration <= 0.0 {
        return Err(RenderError::BadDuration(args.duration));
    }
    let ticks = (args.duration * CONTROL_RATE as f32).ceil() as u64;

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(ticks);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    render_session(&args.output, args.seed, args.gestures, ticks, |done| {
        progress.set_position(done);
    })?;

    progress.finish_and_clear();
    Ok(())
}

/// Drive the engine through `ticks` control blocks and stream the audio to
/// a 16-bit mono WAV.
pub fn render_session(
    output: &Path,
    seed: u64,
    gestures_per_minute: f32,
    ticks: u64,
    mut on_tick: impl FnMut(u64),
) -> Result<(), RenderError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: AUDIO_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(output, spec)?;

    let mut engine = SynthEngine::new(seed);
    // offset the simulator stream from the engine stream
    let mut simulator = LightSimulator::new(seed.wrapping_add(1), gestures_per_minute, CONTROL_RATE);

    for tick in 0..ticks {
        let raw = simulator.next();
        let frame = engine.update(raw, scale_lux(raw));
        if frame.triggered {
            tracing::debug!(tick, raw, delta = frame.delta, "light trigger");
        }
        for _ in 0..SAMPLES_PER_CONTROL_TICK {
            writer.write_sample(engine.process())?;
        }
        on_tick(tick + 1);
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_short_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.wav");

        render_session(&path, 3, 120.0, 128, |_| {}).expect("render");

        let reader = hound::WavReader::open(&path).expect("open wav");
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, AUDIO_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(
            reader.len() as u64,
            128 * u64::from(SAMPLES_PER_CONTROL_TICK)
        );
    }

    #[test]
    fn same_seed_renders_identical_audio() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");

        render_session(&a, 7, 200.0, 256, |_| {}).expect("render a");
        render_session(&b, 7, 200.0, 256, |_| {}).expect("render b");

        let read = |p: &Path| {
            hound::WavReader::open(p)
                .expect("open")
                .samples::<i16>()
                .collect::<Result<Vec<_>, _>>()
                .expect("samples")
        };
        assert_eq!(read(&a), read(&b));
    }
}
