#![doc = r#"
Reading spike times out of the units table of an NWB file

NWB stores the spike trains of all units in a single flat dataset,
`/units/spike_times`, and marks where each unit's train ends in
`/units/spike_times_index` (see [`SpikeIndex`]).

```no_run
# fn main() -> neuro_midi::Result<()> {
use neuro_midi::nwb::NwbUnits;

for spike_times in NwbUnits::open("session.nwb")?.iter(0, Some(10)) {
    let spike_times = spike_times?;
    println!("{} spikes", spike_times.len());
}
# Ok(())
# }
```
"#]

mod index;
pub use index::*;

use core::ops::Range;
use std::path::Path;

use hdf5::{Dataset, File};
use ndarray::s;

use crate::{Error, Result};

/// Path of the units table inside the file
pub const UNITS_GROUP: &str = "units";
/// Flat array of every unit's spike times, in seconds
pub const SPIKE_TIMES: &str = "spike_times";
/// Exclusive end offset of each unit within [`SPIKE_TIMES`]
pub const SPIKE_TIMES_INDEX: &str = "spike_times_index";

/// An open NWB file and its units table.
///
/// The file stays open until this (or the [`UnitIter`] made from it) is dropped.
pub struct NwbUnits {
    _file: File,
    spike_times: Dataset,
    index: SpikeIndex,
}

impl NwbUnits {
    /// Open `path` and read the ragged index of its units table.
    ///
    /// # Errors
    /// [`Error::Hdf5`] if the file is not HDF5 or has no `/units` table,
    /// [`Error::MalformedIndex`] if the index does not fit the spike times.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let units = file.group(UNITS_GROUP)?;
        let spike_times = units.dataset(SPIKE_TIMES)?;
        let ends = units.dataset(SPIKE_TIMES_INDEX)?.read_raw::<u64>()?;
        let index = SpikeIndex::new(ends, spike_times.size() as u64)?;

        tracing::debug!(
            "opened {} with {} units and {} spike times",
            path.display(),
            index.len(),
            spike_times.size()
        );

        Ok(Self {
            _file: file,
            spike_times,
            index,
        })
    }

    /// Number of units in the file
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if the file holds no units
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The ragged index of the units table
    pub fn index(&self) -> &SpikeIndex {
        &self.index
    }

    /// The spike times of a single unit, in storage order.
    ///
    /// # Errors
    /// [`Error::UnitOutOfRange`] if there is no such unit.
    pub fn spike_times(&self, unit: usize) -> Result<Vec<f64>> {
        let span = self.index.span(unit).ok_or(Error::UnitOutOfRange {
            unit,
            len: self.len(),
        })?;
        self.read_span(span)
    }

    /// Iterate over units `[start, start + n)`, or every unit from `start`
    /// when `n` is `None`.
    ///
    /// Requests past the last unit are cut short rather than rejected.
    pub fn iter(self, start: usize, n: Option<usize>) -> UnitIter {
        let units = self.index.units(start, n);
        UnitIter { nwb: self, units }
    }

    fn read_span(&self, span: Range<usize>) -> Result<Vec<f64>> {
        if span.is_empty() {
            return Ok(Vec::new());
        }
        let spikes = self
            .spike_times
            .read_slice_1d::<f64, _>(s![span.start..span.end])?;
        Ok(spikes.to_vec())
    }
}

/// Iterator over the spike times of consecutive units.
///
/// Owns the file handle, which is closed once the iterator is dropped.
pub struct UnitIter {
    nwb: NwbUnits,
    units: Range<usize>,
}

impl UnitIter {
    /// The units left to read
    pub fn remaining(&self) -> Range<usize> {
        self.units.clone()
    }
}

impl Iterator for UnitIter {
    type Item = Result<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = self.units.next()?;
        Some(self.nwb.spike_times(unit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.units.size_hint()
    }
}

impl ExactSizeIterator for UnitIter {}

/// Open `path` and iterate the spike times of its units.
/// See [`NwbUnits::iter`].
pub fn iter_units<P: AsRef<Path>>(path: P, start: usize, n: Option<usize>) -> Result<UnitIter> {
    Ok(NwbUnits::open(path)?.iter(start, n))
}
