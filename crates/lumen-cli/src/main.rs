//! Lumen CLI - offline renderer and diagnostics for the light-reactive
//! drone engine.

mod commands;
mod sensor;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about = "Lumen light-reactive synthesizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a simulated light session to a WAV file
    Render(commands::render::RenderArgs),

    /// Print the conditioned light signal and engine state as CSV
    Trace(commands::trace::TraceArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Trace(args) => commands::trace::run(args),
    }
}
