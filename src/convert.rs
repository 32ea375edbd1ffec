#![doc = r#"
Converting every unit of a recording into one MIDI file

Units are given notes and channels by their position in the conversion:
the first unit plays `start_note`, each next unit one note higher,
wrapping after note 127. Every 128 units move to the next channel.
With 16 channels that is room for 2048 units.

```no_run
# fn main() -> neuro_midi::Result<()> {
use neuro_midi::prelude::*;

let file = units_to_midi("session.nwb", &ConvertOptions::default())?;
file.save(default_output_path("session.nwb"))?;
# Ok(())
# }
```
"#]

use std::path::{Path, PathBuf};

use crate::{
    Result,
    file::{MidiFile, builder::MidiFileBuilder},
    nwb::iter_units,
    prelude::*,
};

/// Settings for a whole conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertOptions {
    /// Note length in milliseconds
    pub duration_ms: f64,
    /// Velocity of every note
    pub velocity: Velocity,
    /// Tempo in beats per minute
    pub tempo_bpm: f64,
    /// First unit to convert
    pub start: usize,
    /// Number of units to convert, all remaining if `None`
    pub n: Option<usize>,
    /// Note of the first converted unit
    pub start_note: Note,
    /// Interleave every unit into a single track
    pub merge_tracks: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1.,
            velocity: Velocity::default(),
            tempo_bpm: 120.,
            start: 0,
            n: None,
            start_note: Note::default(),
            merge_tracks: true,
        }
    }
}

/// The note and channel of the unit at `position` within the conversion.
///
/// # Errors
/// [`Error::ChannelOverflow`](crate::Error::ChannelOverflow) from the 2049th unit on.
pub fn assign(position: usize, start_note: Note) -> Result<(Note, Channel)> {
    let channel = Channel::from_unit_index(position)?;
    Ok((Note::wrapping_from_index(position, start_note), channel))
}

/// Builds a MIDI file from spike trains, one per unit, in order.
pub fn tracks_to_midi<I>(units: I, options: &ConvertOptions) -> Result<MidiFile>
where
    I: IntoIterator<Item = Result<Vec<f64>>>,
{
    let tempo = Tempo::from_bpm(options.tempo_bpm)?;
    let mut builder = MidiFileBuilder::default()
        .timing(Timing::default())
        .tempo(tempo)
        .merge(options.merge_tracks);

    let mut spikes_in = 0;
    let mut notes_out = 0;
    for (position, spike_times) in units.into_iter().enumerate() {
        let spike_times = spike_times?;
        let (note, channel) = assign(position, options.start_note)?;
        let quantize = QuantizeOptions {
            note,
            channel,
            duration_ms: options.duration_ms,
            velocity: options.velocity,
            tempo,
            timing: Timing::default(),
        };
        let track = timestamps_to_track(&spike_times, &quantize)?;

        tracing::debug!(
            "unit {} -> note {} ({}) on channel {}: {} spikes, {} notes",
            options.start + position,
            note.byte(),
            note,
            channel.index(),
            spike_times.len(),
            track.note_on_count()
        );
        spikes_in += spike_times.len();
        notes_out += track.note_on_count();
        builder.push_track(track);
    }

    let file = builder.build()?;
    if notes_out < spikes_in {
        tracing::info!(
            "{} of {} spikes dropped where notes would overlap",
            spikes_in - notes_out,
            spikes_in
        );
    }
    tracing::info!(
        "converted {} spikes into {} notes across {} tracks",
        spikes_in,
        notes_out,
        file.tracks().len()
    );
    Ok(file)
}

/// Reads the units of the NWB file at `path` and converts them.
///
/// # Errors
/// Anything [`iter_units`] or [`tracks_to_midi`] reports.
pub fn units_to_midi<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<MidiFile> {
    let units = iter_units(path, options.start, options.n)?;
    tracing::info!("converting {} units", units.len());
    tracks_to_midi(units, options)
}

/// `input` with its extension replaced by `.midi`
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("midi")
}
