#![doc = r#"
Encoding of MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length field and then the chunk data.

## [`RawHeaderChunk`]

The header chunk (identified by "MThd") must be the first chunk in a MIDI file. It
always has a length of 6 bytes:

- the format word (`1` for simultaneous tracks, which is what this crate writes)
- the number of track chunks that follow
- the division word, see [`Timing`](crate::prelude::Timing)

## [`RawTrackChunk`]

Track chunks (identified by "MTrk") hold the events. Each event is a delta time,
encoded as a variable length quantity, followed by the event bytes. A track chunk
must end with an end-of-track meta event, which is appended here when the track
does not already end with one.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
...
[Track Chunk N: "MTrk"]
```
"#]

use crate::prelude::*;

/// Largest value a variable length quantity can hold (28 bits).
pub const MAX_DELTA_TICKS: u32 = 0x0FFF_FFFF;

/// `MThd` with its fixed contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeaderChunk {
    format: u16,
    num_tracks: u16,
    timing: Timing,
}

impl RawHeaderChunk {
    /// A format 1 header
    pub const fn simultaneous(num_tracks: u16, timing: Timing) -> Self {
        Self {
            format: 1,
            num_tracks,
            timing,
        }
    }

    /// Append the chunk to `out`
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"MThd");
        out.extend_from_slice(&6u32.to_be_bytes());
        out.extend_from_slice(&self.format.to_be_bytes());
        out.extend_from_slice(&self.num_tracks.to_be_bytes());
        out.extend_from_slice(&self.timing.to_bytes());
    }
}

/// `MTrk` for a borrowed [`Track`]
pub struct RawTrackChunk<'a> {
    track: &'a Track,
}

impl<'a> RawTrackChunk<'a> {
    /// Wrap a track for writing
    pub const fn new(track: &'a Track) -> Self {
        Self { track }
    }

    /// Append the chunk to `out`
    ///
    /// # Errors
    /// [`Error::DeltaOverflow`] if an event's delta exceeds [`MAX_DELTA_TICKS`].
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(b"MTrk");
        let length_at = out.len();
        out.extend_from_slice(&[0; 4]);
        let data_start = out.len();

        let mut ended = false;
        for event in self.track.events() {
            write_vlq(event.delta_ticks(), out)?;
            write_message(event.message(), out);
            ended = matches!(event.message(), TrackMessage::Meta(MetaMessage::EndOfTrack));
        }
        if !ended {
            write_vlq(0, out)?;
            write_message(&TrackMessage::Meta(MetaMessage::EndOfTrack), out);
        }

        let length = (out.len() - data_start) as u32;
        out[length_at..data_start].copy_from_slice(&length.to_be_bytes());
        Ok(())
    }
}

fn write_message(message: &TrackMessage, out: &mut Vec<u8>) {
    match message {
        // running status is never used; every event carries its status byte
        TrackMessage::ChannelVoice(voice) => out.extend_from_slice(&voice.to_bytes()),
        TrackMessage::Meta(meta) => {
            out.push(0xFF);
            out.push(meta.type_byte());
            match meta {
                MetaMessage::Tempo(tempo) => {
                    out.push(3);
                    out.extend_from_slice(&tempo.to_bytes());
                }
                MetaMessage::EndOfTrack => out.push(0),
            }
        }
    }
}

/// Append `value` as a variable length quantity: 7 bits per byte,
/// most significant group first, continuation bit on all but the last byte.
pub fn write_vlq(value: u32, out: &mut Vec<u8>) -> Result<()> {
    if value > MAX_DELTA_TICKS {
        return Err(Error::DeltaOverflow(value as u64));
    }
    let mut groups = [0u8; 4];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
    Ok(())
}

#[cfg(test)]
fn vlq(value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    write_vlq(value, &mut out).unwrap();
    out
}

#[test]
fn test_vlq_encoding() {
    use pretty_assertions::assert_eq;
    assert_eq!(vlq(0), vec![0x00]);
    assert_eq!(vlq(0x40), vec![0x40]);
    assert_eq!(vlq(0x7F), vec![0x7F]);
    assert_eq!(vlq(0x80), vec![0x81, 0x00]);
    assert_eq!(vlq(1000), vec![0x87, 0x68]);
    assert_eq!(vlq(0x3FFF), vec![0xFF, 0x7F]);
    assert_eq!(vlq(0x4000), vec![0x81, 0x80, 0x00]);
    assert_eq!(vlq(MAX_DELTA_TICKS), vec![0xFF, 0xFF, 0xFF, 0x7F]);
}

#[test]
fn test_vlq_overflow() {
    let mut out = Vec::new();
    let err = write_vlq(MAX_DELTA_TICKS + 1, &mut out).unwrap_err();
    assert!(matches!(err, Error::DeltaOverflow(0x1000_0000)));
    assert!(out.is_empty());
}

#[test]
fn test_header_chunk() {
    use pretty_assertions::assert_eq;
    let mut out = Vec::new();
    RawHeaderChunk::simultaneous(1, Timing::default()).write(&mut out);
    assert_eq!(
        out,
        vec![
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, // type, length
            0, 1, // format 1
            0, 1, // one track
            0x03, 0xE8, // 1000 ticks per quarter note
        ]
    );
}

#[test]
fn test_track_chunk_appends_end_of_track() {
    use pretty_assertions::assert_eq;
    let track = Track::new(vec![
        TrackEvent::new(
            200,
            ChannelVoiceMessage::new(
                Channel::One,
                VoiceEvent::NoteOn {
                    note: Note::from_databyte_unchecked(60),
                    velocity: Velocity::default(),
                },
            ),
        ),
        TrackEvent::new(
            2,
            ChannelVoiceMessage::new(
                Channel::One,
                VoiceEvent::NoteOff {
                    note: Note::from_databyte_unchecked(60),
                    velocity: Velocity::default(),
                },
            ),
        ),
    ]);
    let mut out = Vec::new();
    RawTrackChunk::new(&track).write(&mut out).unwrap();
    assert_eq!(
        out,
        vec![
            b'M', b'T', b'r', b'k', 0, 0, 0, 13, // type, length
            0x81, 0x48, 0x90, 60, 64, // delta 200, note on
            0x02, 0x80, 60, 64, // delta 2, note off
            0x00, 0xFF, 0x2F, 0x00, // end of track
        ]
    );
}

#[test]
fn test_empty_track_chunk() {
    let mut out = Vec::new();
    RawTrackChunk::new(&Track::default()).write(&mut out).unwrap();
    assert_eq!(out, b"MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00");
}
