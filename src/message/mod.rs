#![doc = r#"
Messages as they appear inside a track chunk

Every [`TrackEvent`] is a delta time followed by either a
[`ChannelVoiceMessage`] or a [`MetaMessage`].
"#]

pub mod channel;
pub use channel::*;

use crate::file::Tempo;

/// A message that only makes sense inside a MIDI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// `FF 51 03 tt tt tt`
    Tempo(Tempo),
    /// `FF 2F 00`
    EndOfTrack,
}

impl MetaMessage {
    /// The meta type byte following `0xFF`
    pub const fn type_byte(&self) -> u8 {
        match self {
            MetaMessage::Tempo(_) => 0x51,
            MetaMessage::EndOfTrack => 0x2F,
        }
    }
}

/// The body of a [`TrackEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A note on or off
    ChannelVoice(ChannelVoiceMessage),
    /// A meta event
    Meta(MetaMessage),
}

impl From<ChannelVoiceMessage> for TrackMessage {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<MetaMessage> for TrackMessage {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}

#[doc = r#"
A message with the number of ticks elapsed since the previous event on the same track.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    delta_ticks: u32,
    message: TrackMessage,
}

impl TrackEvent {
    /// Create a new track event
    pub fn new(delta_ticks: u32, message: impl Into<TrackMessage>) -> Self {
        Self {
            delta_ticks,
            message: message.into(),
        }
    }

    /// Ticks since the previous event
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The message
    pub const fn message(&self) -> &TrackMessage {
        &self.message
    }

    /// The voice message, if this is one
    pub const fn voice(&self) -> Option<&ChannelVoiceMessage> {
        match &self.message {
            TrackMessage::ChannelVoice(v) => Some(v),
            TrackMessage::Meta(_) => None,
        }
    }

    /// True if this is a note-on
    pub fn is_note_on(&self) -> bool {
        self.voice().is_some_and(|v| v.event().is_note_on())
    }

    pub(crate) fn with_delta(self, delta_ticks: u32) -> Self {
        Self {
            delta_ticks,
            ..self
        }
    }
}
