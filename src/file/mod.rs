#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder) and the
/// chunk encoding used to write a file.
pub mod builder;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

mod meta;
pub use meta::*;

use std::{fs, path::Path};

use crate::{
    Error, Result,
    file::builder::chunk::{RawHeaderChunk, RawTrackChunk},
};

#[doc = r#"
A Standard MIDI File: a header timing plus one or more tracks played simultaneously.

Written as format 1, even with a single track.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    timing: Timing,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Returns header info
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Returns the track list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of note-on events over all tracks
    pub fn note_on_count(&self) -> usize {
        self.tracks.iter().map(Track::note_on_count).sum()
    }

    /// Serialize into the bytes of a `.mid` file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let num_tracks =
            u16::try_from(self.tracks.len()).map_err(|_| Error::TooManyTracks(self.tracks.len()))?;

        let mut out = Vec::new();
        RawHeaderChunk::simultaneous(num_tracks, self.timing).write(&mut out);
        for track in &self.tracks {
            RawTrackChunk::new(track).write(&mut out)?;
        }
        Ok(out)
    }

    /// Serialize and write to `path`, replacing any file there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("wrote {} tracks to {}", self.tracks.len(), path.display());
        Ok(())
    }
}

#[test]
fn test_empty_file_bytes() {
    use pretty_assertions::assert_eq;
    let file = builder::MidiFileBuilder::default()
        .merge(true)
        .build()
        .unwrap();
    let bytes = file.to_bytes().unwrap();
    assert_eq!(
        bytes,
        vec![
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0x03, 0xE8, // header
            b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00, // empty track
        ]
    );
}
