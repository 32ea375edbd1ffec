use core::fmt;

use crate::{DataByte, DataByteError};

#[doc = r#"
Identifies a key for some message.

Keys are interpeted as a 7-bit number.

Each value corresponds to some [`Key`] and [`Octave`].

[`Note`] `0` is `C(-1)`, and [`Note`] `127` is `G9`.

Units of a recording are assigned notes by position, wrapping
around after `127`. See [`Note::wrapping_from_index`].

# Example
```rust
# use neuro_midi::prelude::*;

let note = Note::from_databyte(63u8).unwrap(); // 63 is between 0-127

assert_eq!(note.key(), Key::DSharp);
assert_eq!(note.octave(), Octave::new(4))
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(DataByte);

impl Note {
    /// Create a new note.
    ///
    /// Checks for correctness (leading 0 bit).
    pub fn from_databyte<B>(rep: B) -> Result<Self, DataByteError>
    where
        B: TryInto<DataByte, Error = DataByteError>,
    {
        rep.try_into().map(Self)
    }

    /// Creates a new note without checking for the validity of the byte
    pub const fn from_databyte_unchecked(byte: u8) -> Self {
        Self(DataByte::new_unchecked(byte))
    }

    /// The note for the unit at `index`, counted from `start`.
    ///
    /// Wraps around every 128 units.
    pub const fn wrapping_from_index(index: usize, start: Note) -> Self {
        let byte = (index % 128 + start.0.0 as usize) % 128;
        Self(DataByte(byte as u8))
    }

    /// Identifies the key of the note pressed
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_data_byte(&self.0)
    }

    /// Identifies the octave of the note pressed
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave::from_data_byte(&self.0)
    }

    /// Returns the underlying byte of the note
    pub const fn byte(&self) -> u8 {
        self.0.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.octave())
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[doc = r#"
Identifies the pitch class of a [`Note`]
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    /// Identify the key from a data byte.
    #[inline]
    pub const fn from_data_byte(byte: &DataByte) -> Self {
        use Key::*;
        match byte.value() % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

/// The octave of a [`Note`]. Values range from -1 to 9.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Octave(i8);

impl Octave {
    /// Identify an octave from a data byte.
    pub const fn from_data_byte(byte: &DataByte) -> Self {
        Self((byte.value() / 12) as i8 - 1)
    }

    /// Should be a value between [-1, 9]. Clamps between these two values.
    pub const fn new(mut octave: i8) -> Self {
        if octave < -1 {
            octave = -1
        } else if octave > 9 {
            octave = 9;
        }
        Self(octave)
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_note() {
    let c = Note::from_databyte(12u8).unwrap();
    assert_eq!(Key::C, c.key());
    assert_eq!(0, c.octave().value());

    let a_sharp = Note::from_databyte(94u8).unwrap();
    assert_eq!(Key::ASharp, a_sharp.key());
    assert_eq!(6, a_sharp.octave().value());
}

#[test]
fn display_middle_c() {
    assert_eq!(Note::from_databyte_unchecked(60).to_string(), "C4");
    assert_eq!(Note::from_databyte_unchecked(0).to_string(), "C-1");
}

#[test]
fn notes_wrap_every_128_units() {
    let zero = Note::default();
    assert_eq!(Note::wrapping_from_index(0, zero).byte(), 0);
    assert_eq!(Note::wrapping_from_index(127, zero).byte(), 127);
    assert_eq!(Note::wrapping_from_index(128, zero).byte(), 0);
    assert_eq!(Note::wrapping_from_index(130, zero).byte(), 2);

    let middle_c = Note::from_databyte_unchecked(60);
    assert_eq!(Note::wrapping_from_index(70, middle_c).byte(), 2);
    assert_eq!(Note::wrapping_from_index(usize::MAX, middle_c).byte(), 59);
}
