#![warn(missing_docs)]
#![warn(clippy::all)]
#![doc = r#"
Listen to your neurons.

`neuro_midi` turns the spike trains of an NWB (Neurodata Without Borders)
recording into a Standard MIDI File. Every unit becomes a note, every spike
a short note-on/note-off pair on a 1000 ticks per beat timeline.

# Overview

- [`nwb`] reads the spike times of each unit out of the ragged
  `/units/spike_times` array.
- [`quantize`] converts one unit's spike times into a [`Track`](file::Track).
- [`convert`] assigns notes and channels to units and assembles the
  [`MidiFile`](file::MidiFile).
- [`file`] and [`message`] hold the MIDI structures and write them out.

```no_run
# fn main() -> neuro_midi::Result<()> {
use neuro_midi::prelude::*;

let options = ConvertOptions {
    start_note: Note::from_databyte(60u8)?, // middle C
    ..Default::default()
};
let file = units_to_midi("session.nwb", &options)?;
file.save("session.midi")?;
# Ok(())
# }
```
"#]

mod byte;
pub use byte::*;

mod error;
pub use error::*;

mod note;
pub use note::*;

mod velocity;
pub use velocity::*;

pub mod convert;
pub mod file;
pub mod message;
pub mod nwb;
pub mod quantize;

#[doc = r#"
Common re-exports
"#]
pub mod prelude {
    pub use crate::{
        DataByte, DataByteError, Error, Key, Note, Octave, Result, Velocity,
        convert::{ConvertOptions, assign, default_output_path, tracks_to_midi, units_to_midi},
        file::{MidiFile, Tempo, Ticked, Timing, Track, builder::MidiFileBuilder},
        message::{
            Channel, ChannelVoiceMessage, MetaMessage, TrackEvent, TrackMessage, VoiceEvent,
        },
        quantize::{QuantizeOptions, timestamps_to_track},
    };
}
