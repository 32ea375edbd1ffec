use crate::prelude::*;

#[doc = r#"
An ordered list of delta-timed events.

A track built from spike times holds note-on/note-off pairs only;
the end-of-track marker is appended when the file is written.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Create a track from delta-timed events
    pub fn new(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }

    /// Returns the events of the track
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of note-on events
    pub fn note_on_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_note_on()).count()
    }

    /// Events paired with their absolute position in ticks.
    pub fn ticked(&self) -> impl Iterator<Item = Ticked<&TrackEvent>> {
        self.events.iter().scan(0u64, |acc, event| {
            *acc += event.delta_ticks() as u64;
            Some(Ticked::new(*acc, event))
        })
    }

    /// Absolute tick of the last event
    pub fn end_tick(&self) -> u64 {
        self.events.iter().map(|e| e.delta_ticks() as u64).sum()
    }

    /// Insert a set tempo event at the very start of the track.
    pub fn with_tempo(mut self, tempo: Tempo) -> Self {
        self.events.insert(0, TrackEvent::new(0, MetaMessage::Tempo(tempo)));
        self
    }

    /// Interleave several tracks into one, keeping every event at its
    /// absolute position.
    ///
    /// Events at the same tick keep the order of their tracks, then their
    /// order within the track.
    ///
    /// # Errors
    /// [`Error::DeltaOverflow`] if two neighbouring events of the merged
    /// track are further apart than a delta time can express.
    pub fn merge<I>(tracks: I) -> Result<Self>
    where
        I: IntoIterator<Item = Track>,
    {
        let mut absolute: Vec<Ticked<TrackEvent>> = tracks
            .into_iter()
            .flat_map(|track| {
                let mut acc = 0u64;
                track.events.into_iter().map(move |event| {
                    acc += event.delta_ticks() as u64;
                    Ticked::new(acc, event)
                })
            })
            .collect();

        // stable, so ties keep track order
        absolute.sort_by_key(|t| t.accumulated_ticks());

        let mut previous = 0;
        let events = absolute
            .into_iter()
            .map(|ticked| -> Result<TrackEvent> {
                let delta = ticked.accumulated_ticks() - previous;
                previous = ticked.accumulated_ticks();
                let delta = u32::try_from(delta).map_err(|_| Error::DeltaOverflow(delta))?;
                Ok(ticked.into_event().with_delta(delta))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { events })
    }
}

/// An event at an absolute position in ticks from the start of its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticked<T> {
    accumulated_ticks: u64,
    event: T,
}

impl<T> Ticked<T> {
    /// Create a new ticked event
    pub const fn new(accumulated_ticks: u64, event: T) -> Self {
        Self {
            accumulated_ticks,
            event,
        }
    }

    /// Ticks since the start of the track
    pub const fn accumulated_ticks(&self) -> u64 {
        self.accumulated_ticks
    }

    /// Returns a reference to the event
    pub const fn event(&self) -> &T {
        &self.event
    }

    /// Returns the event
    pub fn into_event(self) -> T {
        self.event
    }
}

#[cfg(test)]
fn note_on_event(delta_ticks: u32, note: u8, channel: Channel) -> TrackEvent {
    TrackEvent::new(
        delta_ticks,
        ChannelVoiceMessage::new(
            channel,
            VoiceEvent::NoteOn {
                note: Note::from_databyte_unchecked(note),
                velocity: Velocity::default(),
            },
        ),
    )
}

#[cfg(test)]
fn note_off_event(delta_ticks: u32, note: u8, channel: Channel) -> TrackEvent {
    TrackEvent::new(
        delta_ticks,
        ChannelVoiceMessage::new(
            channel,
            VoiceEvent::NoteOff {
                note: Note::from_databyte_unchecked(note),
                velocity: Velocity::default(),
            },
        ),
    )
}

#[test]
fn test_ticked_accumulates_deltas() {
    let track = Track::new(vec![
        note_on_event(200, 0, Channel::One),
        note_off_event(2, 0, Channel::One),
        note_on_event(198, 0, Channel::One),
    ]);

    let ticks: Vec<_> = track.ticked().map(|t| t.accumulated_ticks()).collect();
    assert_eq!(ticks, vec![200, 202, 400]);
    assert_eq!(track.end_tick(), 400);
    assert_eq!(track.note_on_count(), 2);
}

#[test]
fn test_merge_interleaves_by_absolute_tick() {
    use pretty_assertions::assert_eq;
    let first = Track::new(vec![
        note_on_event(200, 0, Channel::One),
        note_off_event(2, 0, Channel::One),
        note_on_event(198, 0, Channel::One),
        note_off_event(2, 0, Channel::One),
    ]);
    let second = Track::new(vec![
        note_on_event(300, 1, Channel::One),
        note_off_event(2, 1, Channel::One),
    ]);

    let merged = Track::merge([first, second]).unwrap();
    assert_eq!(
        merged.events(),
        &[
            note_on_event(200, 0, Channel::One),
            note_off_event(2, 0, Channel::One),
            note_on_event(98, 1, Channel::One),
            note_off_event(2, 1, Channel::One),
            note_on_event(98, 0, Channel::One),
            note_off_event(2, 0, Channel::One),
        ]
    );
}

#[test]
fn test_merge_ties_keep_track_order() {
    use pretty_assertions::assert_eq;
    let first = Track::new(vec![
        note_on_event(10, 5, Channel::One),
        note_off_event(2, 5, Channel::One),
    ]);
    let second = Track::new(vec![note_on_event(12, 6, Channel::Two)]);

    let merged = Track::merge([first, second]).unwrap();
    assert_eq!(
        merged.events(),
        &[
            note_on_event(10, 5, Channel::One),
            note_off_event(2, 5, Channel::One),
            note_on_event(0, 6, Channel::Two),
        ]
    );
}

#[test]
fn test_merge_nothing() {
    let merged = Track::merge(Vec::new()).unwrap();
    assert!(merged.is_empty());
}

#[test]
fn test_with_tempo_prepends() {
    let track = Track::new(vec![note_on_event(5, 0, Channel::One)]).with_tempo(Tempo::DEFAULT);
    assert_eq!(
        track.events()[0].message(),
        &TrackMessage::Meta(MetaMessage::Tempo(Tempo::DEFAULT))
    );
    assert_eq!(track.end_tick(), 5);
}
