use std::{io, path::PathBuf};

use thiserror::Error;

use crate::DataByteError;

#[doc = r#"
A set of errors that can occur while converting a recording into a MIDI file.

Asking for units past the end of the recording while iterating is not
an error; the iteration just ends early.
"#]
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be read as HDF5, or lacks the units table
    #[error("HDF5 {0}")]
    Hdf5(#[from] hdf5::Error),
    /// The ragged index does not describe slices of the timestamp array
    #[error("Malformed spike_times_index at unit {unit}: {reason}")]
    MalformedIndex {
        /// Position of the offending index entry
        unit: usize,
        /// What is wrong with it
        reason: IndexError,
    },
    /// A single unit was requested that the file does not hold
    #[error("Unit {unit} is out of range, the file holds {len} units")]
    UnitOutOfRange {
        /// The requested unit
        unit: usize,
        /// Number of units in the file
        len: usize,
    },
    /// More units than notes times channels
    #[error("Unit {unit} would need MIDI channel {}, only 16 exist", .unit / 128 + 1)]
    ChannelOverflow {
        /// Position of the unit within the conversion
        unit: usize,
    },
    /// A note or velocity outside of 0-127
    #[error(transparent)]
    DataByte(#[from] DataByteError),
    /// A tempo that can't be written to a set tempo event
    #[error("Invalid tempo of {0} BPM")]
    InvalidTempo(f64),
    /// A note length that is negative or not a number
    #[error("Invalid note duration of {0}ms")]
    InvalidDuration(f64),
    /// More tracks than a header chunk can count
    #[error("{0} tracks do not fit in a MIDI file")]
    TooManyTracks(usize),
    /// A delta time too large for a variable length quantity
    #[error("Delta of {0} ticks does not fit in a MIDI delta time")]
    DeltaOverflow(u64),
    /// Writing the output
    #[error("Writing {}: {source}", .path.display())]
    Io {
        /// Where we were writing
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },
}

/// Why an entry of the ragged index was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// An end offset smaller than the previous one
    #[error("offset {end} is smaller than the preceding offset {start}")]
    Decreasing {
        /// Start of the span
        start: u64,
        /// End of the span
        end: u64,
    },
    /// An end offset past the last timestamp
    #[error("offset {end} is past the {len} stored spike times")]
    PastEnd {
        /// End of the span
        end: u64,
        /// Number of spike times stored
        len: u64,
    },
}

/// Result type of this crate (see [`Error`])
pub type Result<T, E = Error> = core::result::Result<T, E>;
