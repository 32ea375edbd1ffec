use crate::file::Tempo;

/// The resolution spike trains are written at: 1000 ticks per beat.
///
/// At 120 BPM one tick is half a millisecond.
pub const TICKS_PER_BEAT: u16 = 1000;

/// The header timing of a MIDI file.
///
/// Files written by this crate always define delta times as a tick rate
/// per quarter note. The leading bit of the division word selects SMPTE
/// timing, which is never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    ticks_per_quarter_note: u16,
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self {
            ticks_per_quarter_note: tpqn & 0x7FFF,
        }
    }

    /// Returns the ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// The division word of the header chunk
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.ticks_per_quarter_note.to_be_bytes()
    }

    /// µs_per_tick = tempo / TPQN
    pub fn micros_per_tick(&self, tempo: Tempo) -> f64 {
        tempo.micros_per_quarter_note() as f64 / self.ticks_per_quarter_note as f64
    }

    /// Converts a time in seconds into an absolute tick count,
    /// rounding halves to even.
    ///
    /// Negative times give negative ticks. NaN gives `0`.
    pub fn seconds_to_ticks(&self, seconds: f64, tempo: Tempo) -> i64 {
        let seconds_per_tick =
            tempo.micros_per_quarter_note() as f64 * 1e-6 / self.ticks_per_quarter_note as f64;
        (seconds / seconds_per_tick).round_ties_even() as i64
    }

    /// Converts an absolute tick count back into seconds
    pub fn ticks_to_seconds(&self, ticks: u64, tempo: Tempo) -> f64 {
        ticks as f64 * self.micros_per_tick(tempo) / 1_000_000.
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new_ticks_per_quarter_note(TICKS_PER_BEAT)
    }
}

#[test]
fn seconds_to_ticks_at_default_tempo() {
    let timing = Timing::default();
    let tempo = Tempo::DEFAULT;
    assert_eq!(timing.seconds_to_ticks(0.1, tempo), 200);
    assert_eq!(timing.seconds_to_ticks(0.5, tempo), 1000);
    assert_eq!(timing.seconds_to_ticks(0.001, tempo), 2);
    assert_eq!(timing.seconds_to_ticks(0.0005, tempo), 1);
    assert_eq!(timing.seconds_to_ticks(-0.1, tempo), -200);
    assert_eq!(timing.seconds_to_ticks(f64::NAN, tempo), 0);
}

#[test]
fn seconds_to_ticks_rounds_half_to_even() {
    let timing = Timing::new_ticks_per_quarter_note(1);
    // one tick per second
    let tempo = Tempo::new(1_000_000);
    assert_eq!(timing.seconds_to_ticks(0.5, tempo), 0);
    assert_eq!(timing.seconds_to_ticks(1.5, tempo), 2);
    assert_eq!(timing.seconds_to_ticks(2.5, tempo), 2);
}

#[test]
fn ticks_back_to_seconds() {
    let timing = Timing::default();
    assert_eq!(timing.ticks_to_seconds(2000, Tempo::DEFAULT), 1.);
    assert_eq!(timing.micros_per_tick(Tempo::DEFAULT), 500.);
}

#[test]
fn division_word() {
    assert_eq!(Timing::default().to_bytes(), [0x03, 0xE8]);
    assert_eq!(Timing::new_ticks_per_quarter_note(0x8000 | 96).ticks_per_quarter_note(), 96);
}
