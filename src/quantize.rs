#![doc = r#"
Turning spike times into notes

Each spike becomes a note-on at the tick nearest to the spike, followed by
a note-off a fixed duration later. Delta times are measured from the
previous event of the track, so the quantizer keeps a cursor at the
absolute tick the track has reached so far.

A spike whose tick is not strictly after the cursor is dropped: the note
it would start overlaps the one still sounding (or starts at tick 0).
Bursts faster than the note duration therefore collapse into fewer notes
than spikes.

```rust
# use neuro_midi::prelude::*;
let options = QuantizeOptions::default(); // 1ms notes at 120 BPM
let track = timestamps_to_track(&[0.2, 0.1, 0.10025], &options).unwrap();

// 0.10025s lands on the note started at 0.1s
assert_eq!(track.note_on_count(), 2);
```
"#]

use crate::{
    Error, Result,
    file::builder::chunk::MAX_DELTA_TICKS,
    prelude::*,
};

/// How to render one unit's spike train.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantizeOptions {
    /// Note every spike is played as
    pub note: Note,
    /// Channel the notes are sent on
    pub channel: Channel,
    /// Note length in milliseconds
    pub duration_ms: f64,
    /// Velocity of both note-on and note-off
    pub velocity: Velocity,
    /// Tempo the timeline is measured in
    pub tempo: Tempo,
    /// Ticks per quarter note
    pub timing: Timing,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            note: Note::default(),
            channel: Channel::default(),
            duration_ms: 1.,
            velocity: Velocity::default(),
            tempo: Tempo::default(),
            timing: Timing::default(),
        }
    }
}

/// Converts spike times in seconds into a track of note-on/note-off pairs.
///
/// Timestamps are sorted first, so their order does not matter.
///
/// # Errors
/// - [`Error::InvalidDuration`] for a negative or non-finite `duration_ms`
/// - [`Error::DeltaOverflow`] if two kept spikes are further apart than a
///   delta time can express
pub fn timestamps_to_track(timestamps: &[f64], options: &QuantizeOptions) -> Result<Track> {
    let QuantizeOptions {
        note,
        channel,
        duration_ms,
        velocity,
        tempo,
        timing,
    } = *options;

    if !duration_ms.is_finite() || duration_ms < 0. {
        return Err(Error::InvalidDuration(duration_ms));
    }

    let mut sorted = timestamps.to_vec();
    sorted.sort_by(f64::total_cmp);

    let delta_off = to_delta(timing.seconds_to_ticks(duration_ms / 1000., tempo) as u64)?;
    let on = ChannelVoiceMessage::new(channel, VoiceEvent::NoteOn { note, velocity });
    let off = ChannelVoiceMessage::new(channel, VoiceEvent::NoteOff { note, velocity });

    let mut events = Vec::with_capacity(sorted.len() * 2);
    let mut cursor: u64 = 0;
    for seconds in sorted {
        let on_tick = timing.seconds_to_ticks(seconds, tempo);
        if on_tick <= cursor as i64 {
            continue;
        }
        let delta_on = on_tick as u64 - cursor;
        events.push(TrackEvent::new(to_delta(delta_on)?, on));
        events.push(TrackEvent::new(delta_off, off));
        cursor += delta_on + delta_off as u64;
    }

    Ok(Track::new(events))
}

fn to_delta(ticks: u64) -> Result<u32> {
    u32::try_from(ticks)
        .ok()
        .filter(|t| *t <= MAX_DELTA_TICKS)
        .ok_or(Error::DeltaOverflow(ticks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deltas(track: &Track) -> Vec<u32> {
        track.events().iter().map(TrackEvent::delta_ticks).collect()
    }

    #[test]
    fn one_pair_per_spike() {
        let track = timestamps_to_track(&[0.1, 0.2], &QuantizeOptions::default()).unwrap();
        // 2000 ticks per second, 1ms is 2 ticks
        assert_eq!(deltas(&track), vec![200, 2, 198, 2]);
        assert!(track.events()[0].is_note_on());
        assert!(!track.events()[1].is_note_on());
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let options = QuantizeOptions::default();
        let sorted = timestamps_to_track(&[0.1, 0.2, 0.35], &options).unwrap();
        let shuffled = timestamps_to_track(&[0.35, 0.1, 0.2], &options).unwrap();
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn colliding_spikes_are_dropped() {
        let track = timestamps_to_track(&[0.0, 0.0005], &QuantizeOptions::default()).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.note_on_count(), 1);
    }

    #[test]
    fn spike_during_a_note_is_dropped() {
        // the note at 200 lasts until 202
        let track =
            timestamps_to_track(&[0.1, 0.1005, 0.101, 0.1015], &QuantizeOptions::default())
                .unwrap();
        assert_eq!(deltas(&track), vec![200, 2, 1, 2]);
    }

    #[test]
    fn spike_at_zero_is_dropped() {
        let track = timestamps_to_track(&[0.0], &QuantizeOptions::default()).unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn negative_and_nan_spikes_are_dropped() {
        let track =
            timestamps_to_track(&[-1.0, f64::NAN, 0.1], &QuantizeOptions::default()).unwrap();
        assert_eq!(deltas(&track), vec![200, 2]);
    }

    #[test]
    fn empty_train_gives_empty_track() {
        let track = timestamps_to_track(&[], &QuantizeOptions::default()).unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn note_channel_and_velocity_are_applied() {
        let options = QuantizeOptions {
            note: Note::from_databyte(60u8).unwrap(),
            channel: Channel::Three,
            velocity: Velocity::new(100u8).unwrap(),
            ..Default::default()
        };
        let track = timestamps_to_track(&[0.1], &options).unwrap();
        for event in track.events() {
            let voice = event.voice().unwrap();
            assert_eq!(voice.channel(), Channel::Three);
            let (VoiceEvent::NoteOn { note, velocity } | VoiceEvent::NoteOff { note, velocity }) =
                voice.event();
            assert_eq!(note.byte(), 60);
            assert_eq!(velocity.byte(), 100);
        }
    }

    #[test]
    fn tempo_scales_ticks() {
        let options = QuantizeOptions {
            tempo: Tempo::from_bpm(60.).unwrap(),
            duration_ms: 10.,
            ..Default::default()
        };
        // 1000 ticks per second
        let track = timestamps_to_track(&[0.1], &options).unwrap();
        assert_eq!(deltas(&track), vec![100, 10]);
    }

    #[test]
    fn zero_duration_notes() {
        let options = QuantizeOptions {
            duration_ms: 0.,
            ..Default::default()
        };
        let track = timestamps_to_track(&[0.1, 0.1005], &options).unwrap();
        assert_eq!(deltas(&track), vec![200, 0, 1, 0]);
    }

    #[test]
    fn invalid_duration() {
        for duration_ms in [-1., f64::NAN, f64::INFINITY] {
            let options = QuantizeOptions {
                duration_ms,
                ..Default::default()
            };
            assert!(matches!(
                timestamps_to_track(&[0.1], &options),
                Err(Error::InvalidDuration(_))
            ));
        }
    }

    #[test]
    fn gap_beyond_a_delta_time() {
        // 2^28 ticks at 2000 ticks per second
        let far = (MAX_DELTA_TICKS as f64 + 1.) / 2000.;
        let err = timestamps_to_track(&[far], &QuantizeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::DeltaOverflow(0x1000_0000)));
    }
}
