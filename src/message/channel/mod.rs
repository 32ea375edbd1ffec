#![doc = r#"
Contains the Channel Voice Message types the converter emits

# Hierarchy
```text
        |-----------------------|
        | Channel Voice Message |
        |-----------------------|
              /          \
     |---------|    |----------|
     | NoteOn  |    | NoteOff  |
     |---------|    |----------|
```

Only note-on and note-off are ever written. Other voice messages
(control change, program change, pitch bend) have no source in spike data.
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{Error, Note, Velocity};

/// One of the sixteen MIDI channels.
///
/// `Channel::One` is sent on the wire as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// The channel for the unit at `index`: one channel per 128 units.
    ///
    /// # Errors
    /// [`Error::ChannelOverflow`] past 2048 units, since there is no
    /// seventeenth channel.
    pub fn from_unit_index(index: usize) -> Result<Self, Error> {
        u8::try_from(index / 128)
            .ok()
            .and_then(|c| Self::try_from_primitive(c).ok())
            .ok_or(Error::ChannelOverflow { unit: index })
    }

    /// The 0-based wire value of the channel
    pub fn index(&self) -> u8 {
        (*self).into()
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::One
    }
}

/// A voice message on some channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// The channel the message is sent on
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The voice event
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The status byte: message kind in the high nibble, channel in the low.
    pub fn status(&self) -> u8 {
        self.event.status_nibble() | self.channel.index()
    }

    /// Status byte followed by both data bytes.
    pub fn to_bytes(&self) -> [u8; 3] {
        let (note, velocity) = match self.event {
            VoiceEvent::NoteOn { note, velocity } | VoiceEvent::NoteOff { note, velocity } => {
                (note, velocity)
            }
        };
        [self.status(), note.byte(), velocity.byte()]
    }
}

#[doc = r#"
The voice events a converted track is made of.

A note-off carries the velocity of the note-on it closes.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// A note starts sounding
    NoteOn {
        /// The note
        note: Note,
        /// How hard it was struck
        velocity: Velocity,
    },
    /// A note stops sounding
    NoteOff {
        /// The note
        note: Note,
        /// Release velocity
        velocity: Velocity,
    },
}

impl VoiceEvent {
    const fn status_nibble(&self) -> u8 {
        match self {
            VoiceEvent::NoteOff { .. } => 0x80,
            VoiceEvent::NoteOn { .. } => 0x90,
        }
    }

    /// True for [`VoiceEvent::NoteOn`]
    pub const fn is_note_on(&self) -> bool {
        matches!(self, VoiceEvent::NoteOn { .. })
    }
}

#[test]
fn channel_from_unit_index() {
    assert_eq!(Channel::from_unit_index(0).unwrap(), Channel::One);
    assert_eq!(Channel::from_unit_index(127).unwrap(), Channel::One);
    assert_eq!(Channel::from_unit_index(130).unwrap(), Channel::Two);
    assert_eq!(Channel::from_unit_index(2047).unwrap(), Channel::Sixteen);
    assert!(matches!(
        Channel::from_unit_index(2048),
        Err(Error::ChannelOverflow { unit: 2048 })
    ));
    assert!(Channel::from_unit_index(usize::MAX).is_err());
}

#[test]
fn note_on_bytes() {
    let msg = ChannelVoiceMessage::new(
        Channel::Three,
        VoiceEvent::NoteOn {
            note: Note::from_databyte_unchecked(60),
            velocity: Velocity::default(),
        },
    );
    assert_eq!(msg.to_bytes(), [0x92, 60, 64]);
}

#[test]
fn note_off_bytes() {
    let msg = ChannelVoiceMessage::new(
        Channel::Sixteen,
        VoiceEvent::NoteOff {
            note: Note::from_databyte_unchecked(2),
            velocity: Velocity::default(),
        },
    );
    assert_eq!(msg.to_bytes(), [0x8F, 2, 64]);
}
