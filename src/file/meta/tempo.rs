#![doc = r#"
Tempo - how long a quarter note lasts

MIDI files do not store tempo in beats per minute. A set tempo meta event
(`FF 51 03 tt tt tt`) carries the number of microseconds per quarter note
as a 24-bit big-endian integer. 120 BPM is therefore stored as `500_000`.
"#]

use crate::Error;

/// Microseconds per quarter note
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// 120 BPM, the tempo a player assumes when a file sets none.
    pub const DEFAULT: Self = Self(500_000);

    /// Largest value a set tempo event can carry.
    pub const MAX_MICROS: u32 = 0x00FF_FFFF;

    /// Tempo from microseconds per quarter note. Clamped to 24 bits.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        if micros_per_quarter_note > Self::MAX_MICROS {
            Self(Self::MAX_MICROS)
        } else {
            Self(micros_per_quarter_note)
        }
    }

    /// Converts beats per minute to microseconds per quarter note,
    /// rounding halves to even.
    ///
    /// # Errors
    /// If `bpm` is not a positive finite number, or is so slow that a quarter
    /// note would not fit in a set tempo event.
    pub fn from_bpm(bpm: f64) -> Result<Self, Error> {
        if !bpm.is_finite() || bpm <= 0. {
            return Err(Error::InvalidTempo(bpm));
        }
        let micros = (60_000_000. / bpm).round_ties_even();
        if micros < 1. || micros > Self::MAX_MICROS as f64 {
            return Err(Error::InvalidTempo(bpm));
        }
        Ok(Self(micros as u32))
    }

    /// Parse the three data bytes of a set tempo event
    pub const fn new_from_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// The three data bytes of a set tempo event
    pub const fn to_bytes(&self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Beats per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn tempo_from_bpm() {
    use pretty_assertions::assert_eq;
    assert_eq!(Tempo::from_bpm(120.).unwrap(), Tempo::DEFAULT);
    assert_eq!(Tempo::from_bpm(60.).unwrap().micros_per_quarter_note(), 1_000_000);
    // 60e6 / 7 = 8571428.57...
    assert_eq!(Tempo::from_bpm(7.).unwrap().micros_per_quarter_note(), 8_571_429);
    assert_eq!(Tempo::from_bpm(150.).unwrap().bpm(), 150.);
}

#[test]
fn reject_unwritable_tempo() {
    assert!(Tempo::from_bpm(0.).is_err());
    assert!(Tempo::from_bpm(-120.).is_err());
    assert!(Tempo::from_bpm(f64::NAN).is_err());
    // a quarter note of more than ~16.7 seconds
    assert!(Tempo::from_bpm(3.).is_err());
    // less than a microsecond per beat
    assert!(Tempo::from_bpm(1e9).is_err());
}

#[test]
fn tempo_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(Tempo::DEFAULT.to_bytes(), [0x07, 0xA1, 0x20]);
    assert_eq!(Tempo::new_from_bytes([0x07, 0xA1, 0x20]), Tempo::DEFAULT);
    assert_eq!(Tempo::new(u32::MAX).micros_per_quarter_note(), Tempo::MAX_MICROS);
}
