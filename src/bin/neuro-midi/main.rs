//! neuro-midi - convert neuro data types to MIDI
//!
//! Run with: cargo run -- nwb units -p session.nwb

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, ensure};
use neuro_midi::prelude::*;
use tracing_subscriber::EnvFilter;

/// Convert neuro data types to MIDI!
#[derive(Parser)]
#[command(name = "neuro-midi", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert from NWB to MIDI
    #[command(subcommand)]
    Nwb(NwbCommand),
}

#[derive(Subcommand)]
enum NwbCommand {
    /// Convert NWB units (spike times for individual neurons) to MIDI notes
    Units(UnitsArgs),
}

#[derive(Args)]
struct UnitsArgs {
    /// Path to NWB file
    #[arg(short, long)]
    path: PathBuf,

    /// Output .midi file, defaults to the NWB path with a .midi extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Duration of each note in milliseconds
    #[arg(short, long, default_value_t = 1.)]
    duration: f64,

    /// Velocity of each note, 0-127
    #[arg(short, long, default_value_t = 64, value_parser = clap::value_parser!(u8).range(0..=127))]
    velocity: u8,

    /// Tempo of the midi file in BPM
    #[arg(short, long, default_value_t = 120.)]
    tempo: f64,

    /// Index of unit to start iterating over
    #[arg(short, long, default_value_t = 0)]
    start: usize,

    /// Number of units to convert, starting from --start. All if not given
    #[arg(short)]
    n: Option<usize>,

    /// Number of note (0-127) to start from (middle C is 60)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=127))]
    note: u8,

    /// Keep every unit on its own track instead of merging them into one
    #[arg(long)]
    separate_tracks: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Nwb(NwbCommand::Units(args)) => nwb_units(args),
    }
}

fn nwb_units(args: UnitsArgs) -> color_eyre::Result<()> {
    ensure!(args.path.exists(), "{} does not exist", args.path.display());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.path));

    let options = ConvertOptions {
        duration_ms: args.duration,
        velocity: Velocity::new(args.velocity)?,
        tempo_bpm: args.tempo,
        start: args.start,
        n: args.n,
        start_note: Note::from_databyte(args.note)?,
        merge_tracks: !args.separate_tracks,
    };

    let file = units_to_midi(&args.path, &options)
        .wrap_err_with(|| format!("converting {}", args.path.display()))?;
    file.save(&output)?;

    println!("Wrote midi file to {}", output.display());
    Ok(())
}
