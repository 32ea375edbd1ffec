pub mod chunk;

use super::MidiFile;
use crate::prelude::*;

/// A builder used to create a new [`MidiFile`].
///
/// ```rust
/// # use neuro_midi::prelude::*;
/// let file = MidiFileBuilder::default()
///     .tempo(Tempo::from_bpm(90.).unwrap())
///     .track(Track::default())
///     .build()
///     .unwrap();
/// assert_eq!(file.tracks().len(), 1);
/// ```
#[derive(Default)]
pub struct MidiFileBuilder {
    timing: Timing,
    tempo: Option<Tempo>,
    merge: bool,
    tracks: Vec<Track>,
}

impl MidiFileBuilder {
    /// Sets the header timing. Defaults to 1000 ticks per quarter note.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Open the first track with a set tempo event.
    pub fn tempo(mut self, tempo: Tempo) -> Self {
        self.tempo = Some(tempo);
        self
    }

    /// Merge every track into one when building.
    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Adds a track.
    pub fn track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Adds a track through a mutable reference.
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Attempts to finish the midifile from the provided tracks.
    ///
    /// # Errors
    /// - [`Error::DeltaOverflow`] if merging puts two events too far apart
    /// - [`Error::TooManyTracks`] if the track count does not fit the header
    pub fn build(self) -> Result<MidiFile> {
        let mut tracks = if self.merge {
            vec![Track::merge(self.tracks)?]
        } else {
            self.tracks
        };

        if let Some(tempo) = self.tempo {
            match tracks.first_mut() {
                Some(first) => *first = core::mem::take(first).with_tempo(tempo),
                None => tracks.push(Track::default().with_tempo(tempo)),
            }
        }

        if u16::try_from(tracks.len()).is_err() {
            return Err(Error::TooManyTracks(tracks.len()));
        }

        Ok(MidiFile {
            timing: self.timing,
            tracks,
        })
    }
}

#[test]
fn test_build_merged_with_tempo() {
    let on = |delta| {
        TrackEvent::new(
            delta,
            ChannelVoiceMessage::new(
                Channel::One,
                VoiceEvent::NoteOn {
                    note: Note::default(),
                    velocity: Velocity::default(),
                },
            ),
        )
    };
    let file = MidiFileBuilder::default()
        .tempo(Tempo::DEFAULT)
        .merge(true)
        .track(Track::new(vec![on(10)]))
        .track(Track::new(vec![on(5)]))
        .build()
        .unwrap();

    let tracks = file.tracks();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].len(), 3);
    assert_eq!(
        tracks[0].events()[0].message(),
        &TrackMessage::Meta(MetaMessage::Tempo(Tempo::DEFAULT))
    );
    assert_eq!(tracks[0].end_tick(), 10);
}

#[test]
fn test_build_separate_tracks() {
    let file = MidiFileBuilder::default()
        .track(Track::default())
        .track(Track::default())
        .build()
        .unwrap();
    assert_eq!(file.tracks().len(), 2);
    assert!(file.tracks().iter().all(Track::is_empty));
}

#[test]
fn test_build_without_tracks_still_sets_tempo() {
    let file = MidiFileBuilder::default()
        .tempo(Tempo::DEFAULT)
        .build()
        .unwrap();
    assert_eq!(file.tracks().len(), 1);
    assert_eq!(file.tracks()[0].len(), 1);
}
